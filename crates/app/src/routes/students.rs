use dioxus::prelude::*;
use shared_types::{truncation_notice, Profile, Role, DIRECTORY_MAX_LIMIT};
use shared_ui::{PageHeader, SkeletonLines};

use crate::routes::LoadError;

/// Directory of student profiles for mentors and the placement cell.
#[component]
pub fn Students() -> Element {
    let mut search = use_signal(String::new);
    let mut students = use_server_future(move || async move {
        server::api::list_profiles(
            Some(Role::Student.as_str().to_string()),
            Some(DIRECTORY_MAX_LIMIT),
        )
        .await
    })?;
    let needle = search().trim().to_lowercase();
    let notice = match students.read().as_ref() {
        Some(Ok(list)) => truncation_notice(list.len(), DIRECTORY_MAX_LIMIT),
        _ => None,
    };
    let result = students.read().as_ref().cloned().map(|r| {
        r.map(|list| {
            list.into_iter()
                .filter(|p| matches_filter(p, &needle))
                .collect::<Vec<Profile>>()
        })
    });

    rsx! {
        PageHeader {
            title: "Students".to_string(),
            description: "Contact details for every registered student".to_string(),
            input {
                class: "input search-input",
                r#type: "search",
                placeholder: "Filter by name or department",
                value: search(),
                oninput: move |e| search.set(e.value()),
            }
        }
        match result {
            Some(Ok(rows)) if rows.is_empty() => rsx! {
                p { class: "empty-state", "No students match." }
            },
            Some(Ok(rows)) => rsx! {
                table { class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Email" }
                            th { "Phone" }
                            th { "Department" }
                        }
                    }
                    tbody {
                        for student in rows {
                            StudentRow { key: "{student.id}", student }
                        }
                    }
                }
                if let Some(notice) = notice {
                    p { class: "list-notice", "{notice}" }
                }
            },
            Some(Err(e)) => rsx! {
                LoadError { error: e.to_string(), on_retry: move |_| students.restart() }
            },
            None => rsx! { SkeletonLines { count: 5 } },
        }
    }
}

fn matches_filter(profile: &Profile, needle: &str) -> bool {
    needle.is_empty()
        || profile.name.to_lowercase().contains(needle)
        || profile
            .department
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[component]
fn StudentRow(student: Profile) -> Element {
    let phone = student.phone.clone().unwrap_or_else(|| "-".to_string());
    let department = student.department.clone().unwrap_or_else(|| "-".to_string());
    rsx! {
        tr {
            td { "{student.name}" }
            td {
                a { href: "mailto:{student.email}", "{student.email}" }
            }
            td { "{phone}" }
            td { "{department}" }
        }
    }
}
