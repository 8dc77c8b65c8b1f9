use dioxus::prelude::*;

/// Title row at the top of a page, with optional description and actions.
#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] description: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header",
            div { class: "page-header-text",
                h1 { class: "page-title", "{title}" }
                if let Some(description) = description {
                    p { class: "page-description", "{description}" }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}
