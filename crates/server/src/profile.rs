//! Profile Data Bridge: loads and saves profile rows through the data store.

use serde_json::Value;
use shared_types::{
    AppError, Profile, ProfilePatch, Role, RoleAssignment, DIRECTORY_DEFAULT_LIMIT,
    DIRECTORY_MAX_LIMIT,
};
use uuid::Uuid;

use crate::store::{from_row, DataStore, Query, Row, StoreError, Table};

/// Identity details returned by the OAuth provider at sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct SignIn {
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    /// Whether this address is the configured administrator.
    pub is_admin: bool,
}

pub struct ProfileBridge<'a> {
    store: &'a dyn DataStore,
}

impl<'a> ProfileBridge<'a> {
    pub fn new(store: &'a dyn DataStore) -> Self {
        Self { store }
    }

    pub async fn load(&self, user_id: Uuid) -> Result<Profile, AppError> {
        let rows = self
            .store
            .select(
                Table::Profiles,
                &Query::new().eq("id", user_id.to_string()).limit(1),
            )
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("Profile not found"))?;
        Ok(from_row(Table::Profiles, row)?)
    }

    /// Apply `patch` and return the stored row. Last write wins.
    pub async fn save(&self, user_id: Uuid, patch: &ProfilePatch) -> Result<Profile, AppError> {
        let changes = patch.to_changes()?;
        if changes.is_empty() {
            return self.load(user_id).await;
        }

        let row = self
            .store
            .update(Table::Profiles, user_id, changes)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => AppError::not_found("Profile not found"),
                other => other.into(),
            })?;
        Ok(from_row(Table::Profiles, row)?)
    }

    /// Directory listing ordered by name.
    pub async fn list(&self, role: Option<Role>, limit: Option<i64>) -> Result<Vec<Profile>, AppError> {
        let limit = limit.unwrap_or(DIRECTORY_DEFAULT_LIMIT).clamp(1, DIRECTORY_MAX_LIMIT);
        let mut query = Query::new().order_asc("name").limit(limit);
        if let Some(role) = role {
            query = query.eq("role", role.as_str());
        }

        self.store
            .select(Table::Profiles, &query)
            .await?
            .into_iter()
            .map(|row| from_row(Table::Profiles, row).map_err(AppError::from))
            .collect()
    }

    pub async fn count_by_role(&self, role: Role) -> Result<i64, AppError> {
        Ok(self
            .store
            .count(Table::Profiles, &Query::new().eq("role", role.as_str()))
            .await?)
    }

    /// Change another user's role. An administrator cannot change their
    /// own role.
    pub async fn assign_role(
        &self,
        actor: Uuid,
        target: Uuid,
        assignment: &RoleAssignment,
    ) -> Result<Profile, AppError> {
        let role = assignment.parse_role()?;
        if actor == target {
            return Err(AppError::bad_request("You cannot change your own role"));
        }

        let mut changes = Row::new();
        changes.insert("role".to_string(), Value::String(role.as_str().to_string()));
        let row = self
            .store
            .update(Table::Profiles, target, changes)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => AppError::not_found("Profile not found"),
                other => other.into(),
            })?;

        tracing::info!(%actor, %target, role = %role, "Role assigned");
        Ok(from_row(Table::Profiles, row)?)
    }

    /// Find or create the profile for a signed-in identity.
    ///
    /// New users start as students; the configured administrator is
    /// promoted to super admin. Existing rows get the latest avatar.
    pub async fn record_sign_in(&self, sign_in: &SignIn) -> Result<Profile, AppError> {
        let email = sign_in.email.trim().to_lowercase();
        let existing = self
            .store
            .select(Table::Profiles, &Query::new().eq("email", email.clone()).limit(1))
            .await?
            .into_iter()
            .next();

        let Some(row) = existing else {
            let role = if sign_in.is_admin {
                Role::SuperAdmin
            } else {
                Role::Student
            };
            let name = match sign_in.name.trim() {
                "" => email.split('@').next().unwrap_or_default().to_string(),
                name => name.to_string(),
            };
            let mut row = Row::new();
            row.insert("name".to_string(), Value::String(name));
            row.insert("email".to_string(), Value::String(email.clone()));
            row.insert("role".to_string(), Value::String(role.as_str().to_string()));
            row.insert(
                "avatar_url".to_string(),
                sign_in.avatar_url.clone().map(Value::String).unwrap_or(Value::Null),
            );
            let created = self.store.insert(Table::Profiles, row).await?;
            let profile: Profile = from_row(Table::Profiles, created)?;
            tracing::info!(user_id = %profile.id, role = %profile.role, "Profile created at first sign-in");
            return Ok(profile);
        };

        let profile: Profile = from_row(Table::Profiles, row)?;
        let mut changes = Row::new();
        if sign_in.avatar_url.is_some() && sign_in.avatar_url != profile.avatar_url {
            changes.insert(
                "avatar_url".to_string(),
                sign_in.avatar_url.clone().map(Value::String).unwrap_or(Value::Null),
            );
        }
        if sign_in.is_admin && profile.role != Role::SuperAdmin.as_str() {
            tracing::info!(user_id = %profile.id, "Promoting configured administrator");
            changes.insert(
                "role".to_string(),
                Value::String(Role::SuperAdmin.as_str().to_string()),
            );
        }
        if changes.is_empty() {
            return Ok(profile);
        }

        let row = self.store.update(Table::Profiles, profile.id, changes).await?;
        Ok(from_row(Table::Profiles, row)?)
    }
}
