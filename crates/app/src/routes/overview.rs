use dioxus::prelude::*;
use shared_ui::{PageHeader, SkeletonLines, StatTile};

use crate::auth::use_auth;
use crate::routes::LoadError;

#[component]
pub fn Overview() -> Element {
    let auth = use_auth();
    let first_name = auth
        .session
        .read()
        .as_ref()
        .and_then(|s| s.display_name.split_whitespace().next().map(str::to_string))
        .unwrap_or_default();

    let mut overview = use_server_future(move || async move { server::api::get_overview().await })?;
    let result = overview.read().as_ref().cloned();

    rsx! {
        PageHeader {
            title: format!("Welcome back, {first_name}"),
            description: "Your internship programme at a glance".to_string(),
        }
        match result {
            Some(Ok(cards)) if cards.is_empty() => rsx! {
                p { class: "empty-state", "Nothing to show yet." }
            },
            Some(Ok(cards)) => rsx! {
                div { class: "stat-grid",
                    for card in cards {
                        StatTile {
                            key: "{card.label}",
                            label: card.label.clone(),
                            value: card.value,
                            href: card.link.map(|s| s.path().to_string()),
                        }
                    }
                }
            },
            Some(Err(e)) => rsx! {
                LoadError { error: e.to_string(), on_retry: move |_| overview.restart() }
            },
            None => rsx! { SkeletonLines { count: 3 } },
        }
    }
}
