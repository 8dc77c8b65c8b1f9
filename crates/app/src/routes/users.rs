use dioxus::prelude::*;
use shared_types::{describe, truncation_notice, AppError, Profile, Role, DIRECTORY_MAX_LIMIT};
use shared_ui::{Badge, BadgeVariant, PageHeader, SkeletonLines};

use crate::auth::use_user_id;
use crate::routes::LoadError;

/// Account list with role assignment. Super admins only.
#[component]
pub fn Users() -> Element {
    let mut users = use_server_future(move || async move {
        server::api::list_profiles(None, Some(DIRECTORY_MAX_LIMIT)).await
    })?;
    let result = users.read().as_ref().cloned();
    let me = use_user_id();

    rsx! {
        PageHeader {
            title: "Users".to_string(),
            description: "Assign roles to accounts. Changes apply at the user's next sign-in.".to_string(),
        }
        match result {
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "empty-state", "No accounts yet." }
            },
            Some(Ok(list)) => rsx! {
                if let Some(notice) = truncation_notice(list.len(), DIRECTORY_MAX_LIMIT) {
                    p { class: "list-notice", "{notice}" }
                }
                table { class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Email" }
                            th { "Role" }
                            th { "Change role" }
                        }
                    }
                    tbody {
                        for user in list {
                            UserRow {
                                key: "{user.id}",
                                is_self: me == Some(user.id),
                                user,
                                on_changed: move |_| users.restart(),
                            }
                        }
                    }
                }
            },
            Some(Err(e)) => rsx! {
                LoadError { error: e.to_string(), on_retry: move |_| users.restart() }
            },
            None => rsx! { SkeletonLines { count: 6 } },
        }
    }
}

fn role_variant(role: &str) -> BadgeVariant {
    match Role::parse(role) {
        Some(Role::SuperAdmin) => BadgeVariant::Danger,
        Some(Role::TpOfficer) => BadgeVariant::Info,
        Some(Role::Teacher) => BadgeVariant::Success,
        Some(Role::Student) => BadgeVariant::Neutral,
        None => BadgeVariant::Warning,
    }
}

#[component]
fn UserRow(user: Profile, is_self: bool, on_changed: EventHandler<()>) -> Element {
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);
    let id = user.id;
    let current = user.role.clone();
    let label = describe(&user.role).display_label;
    let variant = role_variant(&user.role);

    let change_role = move |evt: FormEvent| {
        let role = evt.value();
        spawn(async move {
            busy.set(true);
            error_msg.set(None);
            match server::api::assign_role(id, role).await {
                Ok(_) => on_changed.call(()),
                Err(e) => error_msg.set(Some(AppError::friendly_message(&e.to_string()))),
            }
            busy.set(false);
        });
    };

    rsx! {
        tr {
            td { "{user.name}" }
            td { "{user.email}" }
            td {
                Badge { variant, "{label}" }
            }
            td {
                if is_self {
                    span { class: "muted", "Your own role" }
                } else {
                    select {
                        class: "select",
                        disabled: busy(),
                        onchange: change_role,
                        for role in Role::ALL {
                            option {
                                value: role.as_str(),
                                selected: role.as_str() == current,
                                {describe(role.as_str()).display_label}
                            }
                        }
                    }
                }
                if let Some(err) = error_msg() {
                    p { class: "form-error", role: "alert", "{err}" }
                }
            }
        }
    }
}
