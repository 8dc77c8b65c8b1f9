use std::collections::HashMap;

use chrono::NaiveDate;
use dioxus::prelude::*;
use shared_types::{
    AppError, Application, ApplicationStatus, ApplicationStatusUpdate, NewApplication, Role,
};
use shared_ui::{
    Button, Card, CardContent, CardFooter, CardHeader, CardTitle, Input, PageHeader,
    SkeletonLines, StatusBadge,
};

use crate::auth::use_auth;
use crate::routes::LoadError;

/// Students track their own applications; the placement cell and admins
/// see every application and move them through the pipeline.
#[component]
pub fn Applications() -> Element {
    let auth = use_auth();
    let role = auth.session.read().as_ref().and_then(|s| s.role());
    let is_student = role == Some(Role::Student);

    let mut applications =
        use_server_future(move || async move { server::api::list_applications().await })?;
    let result = applications.read().as_ref().cloned();

    let description = if is_student {
        "Record where you have applied and follow each application"
    } else {
        "Every student application across the programme"
    };

    rsx! {
        PageHeader {
            title: "Applications".to_string(),
            description: description.to_string(),
        }
        if is_student {
            NewApplicationCard { on_recorded: move |_| applications.restart() }
        }
        match result {
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "empty-state", "No applications recorded yet." }
            },
            Some(Ok(list)) => rsx! {
                table { class: "data-table",
                    thead {
                        tr {
                            if !is_student {
                                th { "Student" }
                            }
                            th { "Company" }
                            th { "Position" }
                            th { "Applied" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        for application in list {
                            ApplicationRow {
                                key: "{application.id}",
                                application,
                                editable: !is_student,
                                on_changed: move |_| applications.restart(),
                            }
                        }
                    }
                }
            },
            Some(Err(e)) => rsx! {
                LoadError { error: e.to_string(), on_retry: move |_| applications.restart() }
            },
            None => rsx! { SkeletonLines { count: 4 } },
        }
    }
}

#[component]
fn ApplicationRow(
    application: Application,
    editable: bool,
    on_changed: EventHandler<()>,
) -> Element {
    let mut error_msg = use_signal(|| Option::<String>::None);
    let id = application.id;
    let applied = application
        .applied_on
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    let current = application.status;

    let change_status = move |evt: FormEvent| {
        let Some(status) = ApplicationStatus::parse(&evt.value()) else {
            return;
        };
        if status == current {
            return;
        }
        spawn(async move {
            error_msg.set(None);
            let update = ApplicationStatusUpdate { status, note: None };
            match server::api::update_application_status(id, update).await {
                Ok(_) => on_changed.call(()),
                Err(e) => error_msg.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    rsx! {
        tr {
            if editable {
                td { "{application.student_name}" }
            }
            td { "{application.company}" }
            td { "{application.position}" }
            td { "{applied}" }
            td {
                if editable {
                    select {
                        class: "select",
                        value: current.as_str(),
                        onchange: change_status,
                        for status in ApplicationStatus::ALL {
                            option {
                                value: status.as_str(),
                                selected: status == current,
                                {status.as_str()}
                            }
                        }
                    }
                    if let Some(err) = error_msg() {
                        p { class: "form-error", role: "alert", "{err}" }
                    }
                } else {
                    StatusBadge { status: current.as_str().to_string() }
                }
            }
        }
    }
}

#[component]
fn NewApplicationCard(on_recorded: EventHandler<()>) -> Element {
    let mut company = use_signal(String::new);
    let mut position = use_signal(String::new);
    let mut applied_on = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut error_msg = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let applied = match applied_on().trim() {
            "" => None,
            s => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    let mut fe = HashMap::new();
                    fe.insert("applied_on".to_string(), "Use YYYY-MM-DD".to_string());
                    field_errors.set(fe);
                    return;
                }
            },
        };

        let application = NewApplication {
            company: company().trim().to_string(),
            position: position().trim().to_string(),
            applied_on: applied,
        };

        saving.set(true);
        match server::api::record_application(application).await {
            Ok(_) => {
                company.set(String::new());
                position.set(String::new());
                applied_on.set(String::new());
                on_recorded.call(());
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        saving.set(false);
    };

    let errors = field_errors.read().clone();

    rsx! {
        Card { class: "form-card",
            form { onsubmit: handle_submit,
                CardHeader {
                    CardTitle { "Record an application" }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "form-error", role: "alert", "{err}" }
                    }
                    div { class: "form-row",
                        Input {
                            label: "Company",
                            value: company(),
                            error: errors.get("company").cloned(),
                            on_input: move |e: FormEvent| company.set(e.value()),
                        }
                        Input {
                            label: "Position",
                            value: position(),
                            error: errors.get("position").cloned(),
                            on_input: move |e: FormEvent| position.set(e.value()),
                        }
                        Input {
                            label: "Applied on",
                            input_type: "date",
                            value: applied_on(),
                            error: errors.get("applied_on").cloned(),
                            on_input: move |e: FormEvent| applied_on.set(e.value()),
                        }
                    }
                }
                CardFooter {
                    Button { button_type: "submit", busy: saving(), "Add" }
                }
            }
        }
    }
}
