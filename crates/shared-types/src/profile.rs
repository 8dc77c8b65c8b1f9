use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::role::Role;
use crate::session::Session;

pub const NAME_MAX_LEN: usize = 100;
pub const DEPARTMENT_MAX_LEN: usize = 100;
pub const PHONE_MIN_DIGITS: usize = 3;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Rows returned by a directory listing when no limit is given.
pub const DIRECTORY_DEFAULT_LIMIT: i64 = 50;
/// Largest page a directory listing will return.
pub const DIRECTORY_MAX_LIMIT: i64 = 200;

/// A user's profile row. `email` is set at sign-in and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub role: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Profile> for Session {
    /// Session claims for a stored profile, as issued at sign-in and on
    /// refresh.
    fn from(profile: Profile) -> Self {
        Session {
            user_id: profile.id,
            email: profile.email,
            display_name: profile.name,
            role: profile.role,
            avatar_url: profile.avatar_url,
        }
    }
}

/// Partial update of the editable profile fields.
///
/// There is no `email` field: an `email` key in a request body is dropped
/// during deserialization. For `phone` and `department`, an empty string
/// clears the stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

fn phone_is_plausible(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.department.is_none()
    }

    /// Validate and normalize into the column changes to write.
    ///
    /// Values are trimmed; cleared optional fields become `null`.
    pub fn to_changes(&self) -> Result<Map<String, Value>, AppError> {
        let mut changes = Map::new();
        let mut field_errors = HashMap::new();

        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                field_errors.insert("name".to_string(), "Name is required".to_string());
            } else if name.chars().count() > NAME_MAX_LEN {
                field_errors.insert(
                    "name".to_string(),
                    format!("Name must be at most {NAME_MAX_LEN} characters"),
                );
            } else {
                changes.insert("name".to_string(), Value::String(name.to_string()));
            }
        }

        if let Some(phone) = &self.phone {
            let phone = phone.trim();
            if phone.is_empty() {
                changes.insert("phone".to_string(), Value::Null);
            } else if !phone_is_plausible(phone) {
                field_errors.insert(
                    "phone".to_string(),
                    format!(
                        "Phone must have {PHONE_MIN_DIGITS} to {PHONE_MAX_DIGITS} digits"
                    ),
                );
            } else {
                changes.insert("phone".to_string(), Value::String(phone.to_string()));
            }
        }

        if let Some(department) = &self.department {
            let department = department.trim();
            if department.is_empty() {
                changes.insert("department".to_string(), Value::Null);
            } else if department.chars().count() > DEPARTMENT_MAX_LEN {
                field_errors.insert(
                    "department".to_string(),
                    format!("Department must be at most {DEPARTMENT_MAX_LEN} characters"),
                );
            } else {
                changes.insert(
                    "department".to_string(),
                    Value::String(department.to_string()),
                );
            }
        }

        if field_errors.is_empty() {
            Ok(changes)
        } else {
            Err(AppError::validation("Validation failed", field_errors))
        }
    }
}

/// Body of `PUT /api/profiles/{id}/role`. The role arrives as a plain
/// string so unknown values surface as a bad request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoleAssignment {
    pub role: String,
}

impl RoleAssignment {
    pub fn parse_role(&self) -> Result<Role, AppError> {
        Role::parse(self.role.trim())
            .ok_or_else(|| AppError::bad_request(format!("Unknown role '{}'", self.role)))
    }
}

/// Message to show under a directory listing that filled its whole page,
/// since more rows may exist beyond it.
pub fn truncation_notice(shown: usize, limit: i64) -> Option<String> {
    let limit = usize::try_from(limit).ok()?;
    (limit > 0 && shown >= limit).then(|| {
        format!("Only the first {limit} entries are shown.")
    })
}

/// The locally edited copy of a profile on the profile page.
///
/// Holds the last server row plus the form values. After a save the
/// server's returned row replaces both, never the submitted values.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    server: Profile,
    pub name: String,
    pub phone: String,
    pub department: String,
}

impl ProfileDraft {
    pub fn new(server: Profile) -> Self {
        Self {
            name: server.name.clone(),
            phone: server.phone.clone().unwrap_or_default(),
            department: server.department.clone().unwrap_or_default(),
            server,
        }
    }

    pub fn server(&self) -> &Profile {
        &self.server
    }

    /// Read-only; the draft has no way to change it.
    pub fn email(&self) -> &str {
        &self.server.email
    }

    /// Changed fields only.
    pub fn patch(&self) -> ProfilePatch {
        let changed = |draft: &str, stored: Option<&str>| -> Option<String> {
            let stored = stored.unwrap_or_default();
            (draft.trim() != stored).then(|| draft.to_string())
        };
        ProfilePatch {
            name: changed(&self.name, Some(&self.server.name)),
            phone: changed(&self.phone, self.server.phone.as_deref()),
            department: changed(&self.department, self.server.department.as_deref()),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.patch().is_empty()
    }

    /// Replace the local copy with the authoritative row.
    pub fn reconcile(&mut self, server: Profile) {
        *self = Self::new(server);
    }

    /// Drop unsaved edits.
    pub fn reset(&mut self) {
        *self = Self::new(self.server.clone());
    }
}
