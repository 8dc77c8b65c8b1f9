use dioxus::prelude::*;
use shared_types::{Profile, ProfilePatch};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use crate::profile::ProfileBridge;

#[cfg(feature = "server")]
use shared_types::SectionId;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_my_profile() -> Result<Profile, ServerFnError> {
    let session = require_section(SectionId::Profile).await?;
    let store = store()?;
    ProfileBridge::new(store.as_ref())
        .load(session.user_id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Save the caller's editable fields and return the stored row.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn save_my_profile(patch: ProfilePatch) -> Result<Profile, ServerFnError> {
    let session = require_section(SectionId::Profile).await?;
    let store = store()?;
    ProfileBridge::new(store.as_ref())
        .save(session.user_id, &patch)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Students directory (`role = Some("student")`) or the full user list.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_profiles(
    role: Option<String>,
    limit: Option<i64>,
) -> Result<Vec<Profile>, ServerFnError> {
    use shared_types::{AppError, Role};

    let role = match role.as_deref() {
        Some(r) => Some(Role::parse(r).ok_or_else(|| {
            AppError::bad_request(format!("Unknown role '{r}'")).into_server_fn_error()
        })?),
        None => None,
    };
    let section = match role {
        Some(Role::Student) => SectionId::Students,
        _ => SectionId::Users,
    };
    require_section(section).await?;

    let store = store()?;
    ProfileBridge::new(store.as_ref())
        .list(role, limit)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn assign_role(user_id: Uuid, role: String) -> Result<Profile, ServerFnError> {
    use shared_types::RoleAssignment;

    let session = require_section(SectionId::Users).await?;
    let store = store()?;
    ProfileBridge::new(store.as_ref())
        .assign_role(session.user_id, user_id, &RoleAssignment { role })
        .await
        .map_err(|e| e.into_server_fn_error())
}
