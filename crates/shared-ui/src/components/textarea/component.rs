use dioxus::prelude::*;

/// Multi-line text input.
#[component]
pub fn Textarea(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = 4)] rows: u32,
    #[props(default = false)] disabled: bool,
    #[props(default)] error: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "textarea", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "textarea-wrapper",
            if !label.is_empty() {
                label { class: "textarea-label", "{label}" }
            }
            textarea {
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                rows: "{rows}",
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
            if let Some(message) = error {
                p { class: "textarea-error", role: "alert", "{message}" }
            }
        }
    }
}
