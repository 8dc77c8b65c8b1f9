//! Role registry: the fixed table mapping each role to its navigation
//! chrome and the dashboard sections it may open.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles carried in the session claim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    TpOfficer,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Student,
        Role::Teacher,
        Role::TpOfficer,
        Role::SuperAdmin,
    ];

    /// Parse a role claim. Unknown values yield `None`; callers that need a
    /// descriptor regardless should go through [`describe`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "tp_officer" => Some(Role::TpOfficer),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Lowercase string for database / JWT storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::TpOfficer => "tp_officer",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named area of the dashboard, gated by role.
///
/// The discriminants are stable: `SectionRequired<const SECTION: u8>` on the
/// server refers to sections by tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum SectionId {
    Overview = 0,
    Profile = 1,
    NocRequest = 2,
    Applications = 3,
    NocApprovals = 4,
    Students = 5,
    Users = 6,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Overview,
        SectionId::Profile,
        SectionId::NocRequest,
        SectionId::Applications,
        SectionId::NocApprovals,
        SectionId::Students,
        SectionId::Users,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SectionId::Overview => "overview",
            SectionId::Profile => "profile",
            SectionId::NocRequest => "noc-request",
            SectionId::Applications => "applications",
            SectionId::NocApprovals => "noc-approvals",
            SectionId::Students => "students",
            SectionId::Users => "users",
        }
    }

    /// Route path of the section page.
    pub fn path(&self) -> &'static str {
        match self {
            SectionId::Overview => "/",
            SectionId::Profile => "/profile",
            SectionId::NocRequest => "/noc-request",
            SectionId::Applications => "/applications",
            SectionId::NocApprovals => "/noc-approvals",
            SectionId::Students => "/students",
            SectionId::Users => "/users",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Overview => "Overview",
            SectionId::Profile => "My Profile",
            SectionId::NocRequest => "NOC Request",
            SectionId::Applications => "Applications",
            SectionId::NocApprovals => "NOC Approvals",
            SectionId::Students => "Students",
            SectionId::Users => "Users",
        }
    }

    pub fn tag(&self) -> u8 {
        *self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Map a request path to the section that owns it.
    ///
    /// Matches on the first path segment, so `/students/<id>` belongs to
    /// `Students`. Paths outside the dashboard (`/login`, `/assets/..`,
    /// `/api/..`) yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        if first.is_empty() {
            return Some(SectionId::Overview);
        }
        Self::ALL
            .into_iter()
            .filter(|s| *s != SectionId::Overview)
            .find(|s| s.key() == first)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which sidebar implementation a role gets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SidebarVariant {
    Student,
    Teacher,
    Placement,
    Admin,
    None,
}

impl SidebarVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SidebarVariant::Student => "student",
            SidebarVariant::Teacher => "teacher",
            SidebarVariant::Placement => "placement",
            SidebarVariant::Admin => "admin",
            SidebarVariant::None => "none",
        }
    }
}

/// Which topbar implementation a role gets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TopbarVariant {
    Student,
    Teacher,
    Placement,
    Admin,
    None,
}

impl TopbarVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopbarVariant::Student => "student",
            TopbarVariant::Teacher => "teacher",
            TopbarVariant::Placement => "placement",
            TopbarVariant::Admin => "admin",
            TopbarVariant::None => "none",
        }
    }
}

/// Static navigation configuration for one role.
#[derive(Debug, PartialEq, Eq)]
pub struct RoleDescriptor {
    /// `None` only for the fallback descriptor.
    pub role: Option<Role>,
    pub sidebar: SidebarVariant,
    pub topbar: TopbarVariant,
    pub display_label: &'static str,
    /// Sections in sidebar order.
    pub allowed_sections: &'static [SectionId],
    pub default_section: SectionId,
}

impl RoleDescriptor {
    pub fn allows(&self, section: SectionId) -> bool {
        self.allowed_sections.contains(&section)
    }

    pub fn is_fallback(&self) -> bool {
        self.role.is_none()
    }
}

static DESCRIPTORS: [RoleDescriptor; 4] = [
    RoleDescriptor {
        role: Some(Role::Student),
        sidebar: SidebarVariant::Student,
        topbar: TopbarVariant::Student,
        display_label: "Student",
        allowed_sections: &[
            SectionId::Overview,
            SectionId::Profile,
            SectionId::NocRequest,
            SectionId::Applications,
        ],
        default_section: SectionId::Overview,
    },
    RoleDescriptor {
        role: Some(Role::Teacher),
        sidebar: SidebarVariant::Teacher,
        topbar: TopbarVariant::Teacher,
        display_label: "Faculty Mentor",
        allowed_sections: &[
            SectionId::Overview,
            SectionId::Profile,
            SectionId::NocApprovals,
            SectionId::Students,
        ],
        default_section: SectionId::Overview,
    },
    RoleDescriptor {
        role: Some(Role::TpOfficer),
        sidebar: SidebarVariant::Placement,
        topbar: TopbarVariant::Placement,
        display_label: "T&P Officer",
        allowed_sections: &[
            SectionId::Overview,
            SectionId::Profile,
            SectionId::NocApprovals,
            SectionId::Applications,
            SectionId::Students,
        ],
        default_section: SectionId::Overview,
    },
    RoleDescriptor {
        role: Some(Role::SuperAdmin),
        sidebar: SidebarVariant::Admin,
        topbar: TopbarVariant::Admin,
        display_label: "Administrator",
        allowed_sections: &[
            SectionId::Overview,
            SectionId::Profile,
            SectionId::NocApprovals,
            SectionId::Applications,
            SectionId::Students,
            SectionId::Users,
        ],
        default_section: SectionId::Overview,
    },
];

/// Descriptor for roles with no registry entry: no navigation chrome and
/// only the overview section, so the default-section redirect cannot loop.
pub static FALLBACK_DESCRIPTOR: RoleDescriptor = RoleDescriptor {
    role: None,
    sidebar: SidebarVariant::None,
    topbar: TopbarVariant::None,
    display_label: "Guest",
    allowed_sections: &[SectionId::Overview],
    default_section: SectionId::Overview,
};

/// Registry entry for a known role string.
pub fn lookup(role: &str) -> Option<&'static RoleDescriptor> {
    let role = Role::parse(role)?;
    DESCRIPTORS.iter().find(|d| d.role == Some(role))
}

/// Registry entry for `role`, or [`FALLBACK_DESCRIPTOR`] when the role is
/// not configured. Never fails.
pub fn describe(role: &str) -> &'static RoleDescriptor {
    lookup(role).unwrap_or(&FALLBACK_DESCRIPTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_sections() {
        for role in Role::ALL {
            let descriptor = describe(role.as_str());
            assert_eq!(descriptor.role, Some(role));
            assert!(!descriptor.allowed_sections.is_empty());
        }
    }

    #[test]
    fn default_section_is_always_allowed() {
        for role in Role::ALL {
            let d = describe(role.as_str());
            assert!(d.allows(d.default_section), "{role}");
        }
        assert!(FALLBACK_DESCRIPTOR.allows(FALLBACK_DESCRIPTOR.default_section));
    }

    #[test]
    fn unknown_role_gets_fallback() {
        let d = describe("registrar");
        assert!(d.is_fallback());
        assert_eq!(d.sidebar, SidebarVariant::None);
        assert_eq!(d.topbar, TopbarVariant::None);
        assert!(lookup("registrar").is_none());
        assert!(describe("").is_fallback());
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!(Role::parse("TP_OFFICER"), Some(Role::TpOfficer));
        assert_eq!(Role::parse(" student "), Some(Role::Student));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn teacher_cannot_see_users_or_noc_request() {
        let d = describe("teacher");
        assert!(!d.allows(SectionId::Users));
        assert!(!d.allows(SectionId::NocRequest));
        assert!(d.allows(SectionId::NocApprovals));
    }

    #[test]
    fn only_super_admin_sees_users() {
        for role in Role::ALL {
            assert_eq!(
                describe(role.as_str()).allows(SectionId::Users),
                role == Role::SuperAdmin
            );
        }
    }

    #[test]
    fn section_tags_round_trip() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_tag(section.tag()), Some(section));
            assert_eq!(SectionId::from_key(section.key()), Some(section));
        }
        assert_eq!(SectionId::from_tag(42), None);
    }

    #[test]
    fn section_from_path() {
        assert_eq!(SectionId::from_path("/"), Some(SectionId::Overview));
        assert_eq!(SectionId::from_path(""), Some(SectionId::Overview));
        assert_eq!(SectionId::from_path("/profile"), Some(SectionId::Profile));
        assert_eq!(SectionId::from_path("/profile/"), Some(SectionId::Profile));
        assert_eq!(
            SectionId::from_path("/noc-request?draft=1"),
            Some(SectionId::NocRequest)
        );
        assert_eq!(
            SectionId::from_path("/students/9f1c"),
            Some(SectionId::Students)
        );
        assert_eq!(SectionId::from_path("/login"), None);
        assert_eq!(SectionId::from_path("/api/profile"), None);
        assert_eq!(SectionId::from_path("/overview"), None);
    }

    #[test]
    fn section_serializes_as_kebab_key() {
        let json = serde_json::to_string(&SectionId::NocApprovals).unwrap();
        assert_eq!(json, "\"noc-approvals\"");
        let role = serde_json::to_string(&Role::TpOfficer).unwrap();
        assert_eq!(role, "\"tp_officer\"");
    }
}
