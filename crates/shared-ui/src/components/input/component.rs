use dioxus::prelude::*;

/// Labelled text input with an inline error line.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] readonly: bool,
    /// Field error from the last save, if any.
    #[props(default)]
    error: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![
        Attribute::new("class", "input", None, false),
        Attribute::new(
            "aria-invalid",
            if error.is_some() { "true" } else { "false" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "input-wrapper",
            if !label.is_empty() {
                label { class: "input-label", "{label}" }
            }
            input {
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                readonly: readonly,
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
            if let Some(message) = error {
                p { class: "input-error", role: "alert", "{message}" }
            }
        }
    }
}
