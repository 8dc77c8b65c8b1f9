use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::{self, Role, RoleDescriptor};

/// The authenticated identity and role claim for the current user.
///
/// Issued at sign-in and immutable for its lifetime. `role` stays a raw
/// string so an unrecognized claim can still be carried and degraded
/// gracefully instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn descriptor(&self) -> &'static RoleDescriptor {
        role::describe(&self.role)
    }

    /// Up to two uppercase initials for the avatar fallback.
    pub fn initials(&self) -> String {
        let source = if self.display_name.trim().is_empty() {
            self.email.as_str()
        } else {
            self.display_name.as_str()
        };
        let words: Vec<&str> = source.split_whitespace().collect();
        let initials: String = match words.as_slice() {
            [] => String::new(),
            [single] => single.chars().take(2).collect(),
            [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
        };
        initials.to_uppercase()
    }
}

/// Session payload returned by `GET /api/session`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionInfo {
    pub session: Session,
    pub role_label: String,
    pub allowed_sections: Vec<crate::role::SectionId>,
    pub default_path: String,
}

impl From<Session> for SessionInfo {
    fn from(session: Session) -> Self {
        let descriptor = session.descriptor();
        Self {
            role_label: descriptor.display_label.to_string(),
            allowed_sections: descriptor.allowed_sections.to_vec(),
            default_path: descriptor.default_section.path().to_string(),
            session,
        }
    }
}
