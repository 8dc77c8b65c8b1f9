use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{AppError, Profile, ProfileDraft};
use shared_ui::{Button, Card, CardContent, CardFooter, Input, PageHeader, SkeletonLines};

use crate::auth::use_auth;
use crate::routes::LoadError;

#[component]
pub fn MyProfile() -> Element {
    let mut profile = use_server_future(move || async move { server::api::get_my_profile().await })?;
    let result = profile.read().as_ref().cloned();

    rsx! {
        PageHeader {
            title: "My Profile".to_string(),
            description: "Keep your contact details current for your mentors".to_string(),
        }
        match result {
            Some(Ok(stored)) => rsx! { ProfileForm { key: "{stored.id}", stored } },
            Some(Err(e)) => rsx! {
                LoadError { error: e.to_string(), on_retry: move |_| profile.restart() }
            },
            None => rsx! { SkeletonLines { count: 4 } },
        }
    }
}

/// Edit form over a local draft. A successful save replaces the draft with
/// the row the server returned.
#[component]
fn ProfileForm(stored: Profile) -> Element {
    let mut auth = use_auth();
    let mut draft = use_signal(move || ProfileDraft::new(stored));
    let mut saving = use_signal(|| false);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut notice = use_signal(|| Option::<(bool, String)>::None);

    let handle_save = move |evt: FormEvent| async move {
        evt.prevent_default();
        let patch = draft.read().patch();
        if patch.is_empty() {
            return;
        }
        saving.set(true);
        notice.set(None);
        field_errors.set(HashMap::new());

        match server::api::save_my_profile(patch).await {
            Ok(saved) => {
                draft.write().reconcile(saved);
                notice.set(Some((true, "Profile saved".to_string())));
                // Name changes show in the chrome after a refresh.
                match server::api::refresh_session().await {
                    Ok(Some(session)) => auth.set_session(session),
                    Ok(None) => auth.clear_auth(),
                    Err(e) => tracing::warn!(error = %e, "Session refresh failed"),
                }
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    notice.set(Some((false, AppError::friendly_message(&err_str))));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        saving.set(false);
    };

    let current = draft.read().clone();
    let dirty = current.is_dirty();
    let email = current.email().to_string();
    let role_label = shared_types::describe(&current.server().role).display_label;
    let errors = field_errors.read().clone();

    rsx! {
        Card { class: "profile-card",
            form { onsubmit: handle_save,
                CardContent {
                    if let Some((ok, message)) = notice() {
                        div {
                            class: if ok { "form-success" } else { "form-error" },
                            role: "status",
                            "{message}"
                        }
                    }
                    Input {
                        label: "Full name",
                        value: current.name.clone(),
                        error: errors.get("name").cloned(),
                        on_input: move |e: FormEvent| draft.write().name = e.value(),
                    }
                    Input {
                        label: "Email",
                        value: email,
                        readonly: true,
                        disabled: true,
                    }
                    Input {
                        label: "Phone",
                        input_type: "tel",
                        placeholder: "+91 98765 43210",
                        value: current.phone.clone(),
                        error: errors.get("phone").cloned(),
                        on_input: move |e: FormEvent| draft.write().phone = e.value(),
                    }
                    Input {
                        label: "Department",
                        value: current.department.clone(),
                        error: errors.get("department").cloned(),
                        on_input: move |e: FormEvent| draft.write().department = e.value(),
                    }
                    p { class: "profile-role", "Role: {role_label}" }
                }
                CardFooter {
                    Button {
                        variant: shared_ui::ButtonVariant::Secondary,
                        disabled: !dirty,
                        onclick: move |_| draft.write().reset(),
                        "Discard"
                    }
                    Button { button_type: "submit", disabled: !dirty, busy: saving(), "Save" }
                }
            }
        }
    }
}
