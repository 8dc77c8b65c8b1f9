//! Dashboard shell: renders a [`ShellPlan`] as sidebar, topbar and content.

use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBookOpen, LdBriefcase, LdFileText, LdLayoutDashboard, LdLogOut, LdMenu, LdSettings,
    LdShield, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{NavItem, SectionId, ShellChrome, ShellPlan, SidebarVariant, TopbarVariant};

use crate::components::badge::{Badge, BadgeVariant};
use crate::components::skeleton::SkeletonLines;
use crate::components::sidebar::{
    Sidebar, SidebarContent, SidebarFooter, SidebarGroup, SidebarHeader, SidebarInset,
    SidebarMenuLink, SidebarProvider, SidebarTrigger,
};

/// Outer frame of every signed-in page.
///
/// While the plan is `Loading` only a placeholder renders; page content and
/// role chrome wait for the session.
#[component]
pub fn AppShell(
    plan: ShellPlan,
    #[props(default)] on_sign_out: Option<EventHandler<()>>,
    children: Element,
) -> Element {
    match plan {
        ShellPlan::Loading => rsx! {
            document::Link { rel: "stylesheet", href: asset!("./style.css") }
            div {
                class: "shell-loading",
                "data-shell": "loading",
                "aria-busy": "true",
                SkeletonLines { count: 4 }
            }
        },
        ShellPlan::Bare => rsx! {
            document::Link { rel: "stylesheet", href: asset!("./style.css") }
            div { class: "shell-bare", "data-shell": "bare",
                main { class: "shell-main", {children} }
            }
        },
        ShellPlan::Chrome(chrome) => rsx! {
            document::Link { rel: "stylesheet", href: asset!("./style.css") }
            SidebarProvider { default_open: true,
                div { class: "shell", "data-shell": "chrome",
                    RoleSidebar { chrome: chrome.clone() }
                    SidebarInset {
                        RoleTopbar {
                            chrome: chrome.clone(),
                            show_sign_out: on_sign_out.is_some(),
                            on_sign_out: move |_| {
                                if let Some(handler) = on_sign_out {
                                    handler.call(());
                                }
                            },
                        }
                        main { class: "shell-main", {children} }
                    }
                }
            }
        },
    }
}

#[component]
fn RoleSidebar(chrome: ShellChrome) -> Element {
    match chrome.sidebar {
        SidebarVariant::Student => rsx! { StudentSidebar { chrome } },
        SidebarVariant::Teacher => rsx! { TeacherSidebar { chrome } },
        SidebarVariant::Placement => rsx! { PlacementSidebar { chrome } },
        SidebarVariant::Admin => rsx! { AdminSidebar { chrome } },
        SidebarVariant::None => rsx! {},
    }
}

fn pick(nav: &[NavItem], sections: &[SectionId]) -> Vec<NavItem> {
    nav.iter()
        .filter(|item| sections.contains(&item.section))
        .cloned()
        .collect()
}

const HOME: &[SectionId] = &[SectionId::Overview, SectionId::Profile];

#[component]
fn StudentSidebar(chrome: ShellChrome) -> Element {
    rsx! {
        SidebarFrame { chrome: chrome.clone(),
            NavGroup { label: "Dashboard", items: pick(&chrome.nav, HOME) }
            NavGroup {
                label: "My Internship",
                items: pick(&chrome.nav, &[SectionId::NocRequest, SectionId::Applications]),
            }
        }
    }
}

#[component]
fn TeacherSidebar(chrome: ShellChrome) -> Element {
    rsx! {
        SidebarFrame { chrome: chrome.clone(),
            NavGroup { label: "Dashboard", items: pick(&chrome.nav, HOME) }
            NavGroup {
                label: "Mentoring",
                items: pick(&chrome.nav, &[SectionId::NocApprovals, SectionId::Students]),
            }
        }
    }
}

#[component]
fn PlacementSidebar(chrome: ShellChrome) -> Element {
    rsx! {
        SidebarFrame { chrome: chrome.clone(),
            NavGroup { label: "Dashboard", items: pick(&chrome.nav, HOME) }
            NavGroup {
                label: "Placements",
                items: pick(
                    &chrome.nav,
                    &[SectionId::NocApprovals, SectionId::Applications, SectionId::Students],
                ),
            }
        }
    }
}

#[component]
fn AdminSidebar(chrome: ShellChrome) -> Element {
    rsx! {
        SidebarFrame { chrome: chrome.clone(),
            NavGroup { label: "Dashboard", items: pick(&chrome.nav, HOME) }
            NavGroup {
                label: "Programme",
                items: pick(
                    &chrome.nav,
                    &[SectionId::NocApprovals, SectionId::Applications, SectionId::Students],
                ),
            }
            NavGroup { label: "Administration", items: pick(&chrome.nav, &[SectionId::Users]) }
        }
    }
}

/// Brand header and signed-in user footer shared by every sidebar variant.
#[component]
fn SidebarFrame(chrome: ShellChrome, children: Element) -> Element {
    let heading = chrome.sidebar.heading();
    rsx! {
        div { class: "sidebar-frame", "data-sidebar-variant": chrome.sidebar.as_str(),
            Sidebar {
                SidebarHeader {
                    div { class: "sidebar-brand",
                        span { class: "sidebar-brand-name", "InternHub" }
                        span { class: "sidebar-brand-heading", "{heading}" }
                    }
                }
                SidebarContent { {children} }
                SidebarFooter {
                    div { class: "sidebar-user",
                        UserAvatar { initials: chrome.initials.clone(), avatar_url: chrome.avatar_url.clone() }
                        div { class: "sidebar-user-text",
                            span { class: "sidebar-user-name", "{chrome.user_name}" }
                            span { class: "sidebar-user-email", "{chrome.user_email}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NavGroup(label: String, items: Vec<NavItem>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        SidebarGroup { label,
            for item in items {
                SidebarMenuLink {
                    key: "{item.section}",
                    href: item.path,
                    active: item.active,
                    SectionIcon { section: item.section }
                    span { "{item.label}" }
                }
            }
        }
    }
}

#[component]
fn SectionIcon(section: SectionId) -> Element {
    match section {
        SectionId::Overview => rsx! {
            Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 }
        },
        SectionId::Profile => rsx! {
            Icon::<LdSettings> { icon: LdSettings, width: 18, height: 18 }
        },
        SectionId::NocRequest => rsx! {
            Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 }
        },
        SectionId::Applications => rsx! {
            Icon::<LdBriefcase> { icon: LdBriefcase, width: 18, height: 18 }
        },
        SectionId::NocApprovals => rsx! {
            Icon::<LdShield> { icon: LdShield, width: 18, height: 18 }
        },
        SectionId::Students => rsx! {
            Icon::<LdBookOpen> { icon: LdBookOpen, width: 18, height: 18 }
        },
        SectionId::Users => rsx! {
            Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 }
        },
    }
}

#[component]
fn UserAvatar(initials: String, avatar_url: Option<String>) -> Element {
    rsx! {
        span { class: "user-avatar",
            if let Some(url) = avatar_url {
                img { src: "{url}", alt: "{initials}" }
            } else {
                "{initials}"
            }
        }
    }
}

#[component]
fn RoleTopbar(chrome: ShellChrome, show_sign_out: bool, on_sign_out: EventHandler<()>) -> Element {
    let badge = match chrome.topbar {
        TopbarVariant::Student => BadgeVariant::Info,
        TopbarVariant::Teacher => BadgeVariant::Success,
        TopbarVariant::Placement => BadgeVariant::Warning,
        TopbarVariant::Admin => BadgeVariant::Danger,
        TopbarVariant::None => return rsx! {},
    };
    let caption = chrome.topbar.caption();

    rsx! {
        header { class: "topbar", "data-topbar-variant": chrome.topbar.as_str(),
            SidebarTrigger {
                Icon::<LdMenu> { icon: LdMenu, width: 18, height: 18 }
            }
            div { class: "topbar-heading",
                h1 { class: "topbar-title", "{chrome.title}" }
                p { class: "topbar-caption", "{caption}" }
            }
            div { class: "topbar-actions",
                if let Some(action) = chrome.quick_action.clone() {
                    a {
                        class: "topbar-quick-action",
                        href: action.path,
                        "data-section": action.section.key(),
                        "{action.label}"
                    }
                }
                Badge { variant: badge, "{chrome.role_label}" }
                if show_sign_out {
                    button {
                        class: "topbar-sign-out",
                        r#type: "button",
                        "aria-label": "Sign out",
                        onclick: move |_| on_sign_out.call(()),
                        Icon::<LdLogOut> { icon: LdLogOut, width: 18, height: 18 }
                    }
                }
            }
        }
    }
}
