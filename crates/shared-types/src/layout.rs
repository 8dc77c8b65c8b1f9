//! Layout composition: turns a session and the active section into a
//! render plan for the dashboard shell.

use crate::role::{SectionId, SidebarVariant, TopbarVariant};
use crate::session::Session;

impl SidebarVariant {
    /// Brand line at the top of the sidebar.
    pub fn heading(&self) -> &'static str {
        match self {
            SidebarVariant::Student => "Student Portal",
            SidebarVariant::Teacher => "Faculty Desk",
            SidebarVariant::Placement => "Placement Cell",
            SidebarVariant::Admin => "Administration",
            SidebarVariant::None => "",
        }
    }
}

impl TopbarVariant {
    pub fn caption(&self) -> &'static str {
        match self {
            TopbarVariant::Student => "Track your internship journey",
            TopbarVariant::Teacher => "Review your mentees' requests",
            TopbarVariant::Placement => "Coordinate placements and NOCs",
            TopbarVariant::Admin => "Manage the internship programme",
            TopbarVariant::None => "",
        }
    }

    /// Section promoted as the topbar's call to action.
    pub fn quick_action(&self) -> Option<SectionId> {
        match self {
            TopbarVariant::Student => Some(SectionId::NocRequest),
            TopbarVariant::Teacher | TopbarVariant::Placement => Some(SectionId::NocApprovals),
            TopbarVariant::Admin => Some(SectionId::Users),
            TopbarVariant::None => None,
        }
    }
}

/// One sidebar link.
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub section: SectionId,
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Everything the chrome needs to render for a recognized role.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellChrome {
    pub sidebar: SidebarVariant,
    pub topbar: TopbarVariant,
    pub role_label: &'static str,
    pub nav: Vec<NavItem>,
    pub active: Option<SectionId>,
    pub title: &'static str,
    pub quick_action: Option<NavItem>,
    pub user_name: String,
    pub user_email: String,
    pub avatar_url: Option<String>,
    pub initials: String,
}

/// What the shell should render.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellPlan {
    /// Session still resolving. Render a placeholder, never chrome.
    Loading,
    /// Role has no registry entry. Render children without navigation.
    Bare,
    Chrome(ShellChrome),
}

impl ShellPlan {
    pub fn is_loading(&self) -> bool {
        matches!(self, ShellPlan::Loading)
    }
}

/// Compose the shell for `session` with `active` highlighted.
///
/// `active` comes from the gate's decision; the composer never computes it.
pub fn compose(session: Option<&Session>, active: Option<SectionId>) -> ShellPlan {
    let Some(session) = session else {
        return ShellPlan::Loading;
    };

    let descriptor = session.descriptor();
    if descriptor.is_fallback() {
        return ShellPlan::Bare;
    }

    let nav: Vec<NavItem> = descriptor
        .allowed_sections
        .iter()
        .map(|section| NavItem {
            section: *section,
            label: section.label(),
            path: section.path(),
            active: active == Some(*section),
        })
        .collect();

    let quick_action = descriptor
        .topbar
        .quick_action()
        .filter(|section| descriptor.allows(*section) && active != Some(*section))
        .map(|section| NavItem {
            section,
            label: section.label(),
            path: section.path(),
            active: false,
        });

    ShellPlan::Chrome(ShellChrome {
        sidebar: descriptor.sidebar,
        topbar: descriptor.topbar,
        role_label: descriptor.display_label,
        nav,
        active,
        title: active.map(|s| s.label()).unwrap_or("Dashboard"),
        quick_action,
        user_name: session.display_name.clone(),
        user_email: session.email.clone(),
        avatar_url: session.avatar_url.clone(),
        initials: session.initials(),
    })
}
