use std::collections::HashMap;

use chrono::NaiveDate;
use dioxus::prelude::*;
use shared_types::{AppError, NewNocRequest, NocRequest};
use shared_ui::{
    Button, Card, CardContent, CardFooter, CardHeader, CardTitle, Input, PageHeader,
    SkeletonLines, StatusBadge, Textarea,
};

use crate::routes::LoadError;

/// Student's NOC request form and the history of their requests.
#[component]
pub fn NocRequestForm() -> Element {
    let mut requests =
        use_server_future(move || async move { server::api::list_noc_requests(None).await })?;
    let result = requests.read().as_ref().cloned();

    rsx! {
        PageHeader {
            title: "NOC Request".to_string(),
            description: "Ask your department for a No-Objection Certificate".to_string(),
        }
        NewRequestCard { on_submitted: move |_| requests.restart() }
        h2 { class: "section-heading", "My requests" }
        match result {
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "empty-state", "You have not requested a NOC yet." }
            },
            Some(Ok(list)) => rsx! { RequestTable { requests: list } },
            Some(Err(e)) => rsx! {
                LoadError { error: e.to_string(), on_retry: move |_| requests.restart() }
            },
            None => rsx! { SkeletonLines { count: 3 } },
        }
    }
}

#[component]
fn NewRequestCard(on_submitted: EventHandler<()>) -> Element {
    let mut company = use_signal(String::new);
    let mut role_title = use_signal(String::new);
    let mut start_date = use_signal(String::new);
    let mut weeks = use_signal(|| "8".to_string());
    let mut notes = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut error_msg = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let mut local = HashMap::new();
        let duration_weeks = match weeks().trim().parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                local.insert("duration_weeks".to_string(), "Enter a number of weeks".to_string());
                0
            }
        };
        let start = match start_date().trim() {
            "" => None,
            s => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    local.insert("start_date".to_string(), "Use YYYY-MM-DD".to_string());
                    None
                }
            },
        };
        if !local.is_empty() {
            field_errors.set(local);
            return;
        }

        let notes_value = notes();
        let request = NewNocRequest {
            company: company().trim().to_string(),
            role_title: role_title().trim().to_string(),
            start_date: start,
            duration_weeks,
            notes: (!notes_value.trim().is_empty()).then(|| notes_value.trim().to_string()),
        };

        saving.set(true);
        match server::api::submit_noc_request(request).await {
            Ok(_) => {
                company.set(String::new());
                role_title.set(String::new());
                start_date.set(String::new());
                notes.set(String::new());
                on_submitted.call(());
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
                    CardTitle { "New request" }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "form-error", role: "alert", "{err}" }
                    }
                    Input {
                        label: "Company",
                        value: company(),
                        error: errors.get("company").cloned(),
                        on_input: move |e: FormEvent| company.set(e.value()),
                    }
                    Input {
                        label: "Role",
                        placeholder: "Software Engineering Intern",
                        value: role_title(),
                        error: errors.get("role_title").cloned(),
                        on_input: move |e: FormEvent| role_title.set(e.value()),
                    }
                    div { class: "form-row",
                        Input {
                            label: "Start date",
                            input_type: "date",
                            value: start_date(),
                            error: errors.get("start_date").cloned(),
                            on_input: move |e: FormEvent| start_date.set(e.value()),
                        }
                        Input {
                            label: "Duration (weeks)",
                            input_type: "number",
                            value: weeks(),
                            error: errors.get("duration_weeks").cloned(),
                            on_input: move |e: FormEvent| weeks.set(e.value()),
                        }
                    }
                    Textarea {
                        label: "Notes",
                        rows: 3,
                        value: notes(),
                        error: errors.get("notes").cloned(),
                        on_input: move |e: FormEvent| notes.set(e.value()),
                    }
                }
                CardFooter {
                    Button { button_type: "submit", busy: saving(), "Submit request" }
                }
            }
        }
    }
}

#[component]
fn RequestTable(requests: Vec<NocRequest>) -> Element {
    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    th { "Company" }
                    th { "Role" }
                    th { "Start" }
                    th { "Weeks" }
                    th { "Status" }
                    th { "Reviewer note" }
                }
            }
            tbody {
                for request in requests {
                    RequestRow { key: "{request.id}", request }
                }
            }
        }
    }
}

#[component]
fn RequestRow(request: NocRequest) -> Element {
    let start = request
        .start_date
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    let note = request.reviewer_note.clone().unwrap_or_default();
    rsx! {
        tr {
            td { "{request.company}" }
            td { "{request.role_title}" }
            td { "{start}" }
            td { "{request.duration_weeks}" }
            td { StatusBadge { status: request.status.as_str().to_string() } }
            td { class: "muted", "{note}" }
        }
    }
}
