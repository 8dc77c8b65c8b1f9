use dioxus::prelude::*;
use shared_types::{AppError, NocRequest, NocReview, RequestStatus};
use shared_ui::{Button, ButtonVariant, PageHeader, SkeletonLines, StatusBadge};

use crate::routes::LoadError;

/// Review queue for faculty and the placement cell.
#[component]
pub fn NocApprovals() -> Element {
    let mut show_all = use_signal(|| false);
    let mut requests = use_server_future(move || {
        let status = if show_all() {
            None
        } else {
            Some(RequestStatus::Pending.as_str().to_string())
        };
        async move { server::api::list_noc_requests(status).await }
    })?;
    let result = requests.read().as_ref().cloned();

    rsx! {
        PageHeader {
            title: "NOC Approvals".to_string(),
            description: "Approve or reject students' No-Objection Certificate requests".to_string(),
            div { class: "segmented",
                button {
                    class: "segmented-item",
                    "aria-pressed": if show_all() { "false" } else { "true" },
                    onclick: move |_| show_all.set(false),
                    "Pending"
                }
                button {
                    class: "segmented-item",
                    "aria-pressed": if show_all() { "true" } else { "false" },
                    onclick: move |_| show_all.set(true),
                    "All"
                }
            }
        }
        match result {
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "empty-state", "No requests waiting for review." }
            },
            Some(Ok(list)) => rsx! {
                div { class: "review-list",
                    for request in list {
                        ReviewCard {
                            key: "{request.id}",
                            request,
                            on_reviewed: move |_| requests.restart(),
                        }
                    }
                }
            },
            Some(Err(e)) => rsx! {
                LoadError { error: e.to_string(), on_retry: move |_| requests.restart() }
            },
            None => rsx! { SkeletonLines { count: 4 } },
        }
    }
}

#[component]
fn ReviewCard(request: NocRequest, on_reviewed: EventHandler<()>) -> Element {
    let mut note = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let id = request.id;

    let decide = move |decision: RequestStatus| {
        spawn(async move {
            busy.set(true);
            error_msg.set(None);
            let text = note();
            let review = NocReview {
                decision,
                note: (!text.trim().is_empty()).then(|| text.trim().to_string()),
            };
            match server::api::review_noc_request(id, review).await {
                Ok(_) => on_reviewed.call(()),
                Err(e) => error_msg.set(Some(AppError::friendly_message(&e.to_string()))),
            }
            busy.set(false);
        });
    };

    let pending = request.status == RequestStatus::Pending;
    let start = request
        .start_date
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "not set".to_string());
    let notes = request.notes.clone().unwrap_or_default();
    let reviewer_note = request.reviewer_note.clone().unwrap_or_default();

    rsx! {
        div { class: "review-card",
            div { class: "review-card-header",
                div {
                    p { class: "review-student", "{request.student_name}" }
                    p { class: "muted", "{request.student_email}" }
                }
                StatusBadge { status: request.status.as_str().to_string() }
            }
            p { class: "review-summary",
                "{request.role_title} at {request.company}, {request.duration_weeks} weeks from {start}"
            }
            if !notes.is_empty() {
                p { class: "review-notes", "{notes}" }
            }
            if pending {
                div { class: "review-actions",
                    input {
                        class: "input",
                        placeholder: "Note to the student (optional)",
                        value: note(),
                        oninput: move |e| note.set(e.value()),
                    }
                    Button {
                        busy: busy(),
                        onclick: move |_| decide(RequestStatus::Approved),
                        "Approve"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        busy: busy(),
                        onclick: move |_| decide(RequestStatus::Rejected),
                        "Reject"
                    }
                }
            } else if !reviewer_note.is_empty() {
                p { class: "muted", "Reviewer note: {reviewer_note}" }
            }
            if let Some(err) = error_msg() {
                p { class: "form-error", role: "alert", "{err}" }
            }
        }
    }
}
