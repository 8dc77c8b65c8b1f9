use dioxus::prelude::*;
use shared_types::{
    Application, ApplicationStatusUpdate, NewApplication, NewNocRequest, NocRequest, NocReview,
    StatCard,
};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use crate::placement::Placements;

#[cfg(feature = "server")]
use shared_types::SectionId;

#[cfg(feature = "server")]
use super::auth::*;

/// NOC requests visible to the caller, newest first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_noc_requests(status: Option<String>) -> Result<Vec<NocRequest>, ServerFnError> {
    use shared_types::{AppError, RequestStatus};

    let session = require_session().await?;
    let status = match status.as_deref() {
        Some(s) => Some(RequestStatus::parse(s).ok_or_else(|| {
            AppError::bad_request(format!("Unknown status '{s}'")).into_server_fn_error()
        })?),
        None => None,
    };
    let store = store()?;
    Placements::new(store.as_ref())
        .list_noc(&session, status)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn submit_noc_request(request: NewNocRequest) -> Result<NocRequest, ServerFnError> {
    let session = require_section(SectionId::NocRequest).await?;
    let store = store()?;
    Placements::new(store.as_ref())
        .submit_noc(&session, &request)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn review_noc_request(id: Uuid, review: NocReview) -> Result<NocRequest, ServerFnError> {
    let session = require_section(SectionId::NocApprovals).await?;
    let store = store()?;
    Placements::new(store.as_ref())
        .review_noc(&session, id, &review)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_applications() -> Result<Vec<Application>, ServerFnError> {
    let session = require_section(SectionId::Applications).await?;
    let store = store()?;
    Placements::new(store.as_ref())
        .list_applications(&session)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn record_application(application: NewApplication) -> Result<Application, ServerFnError> {
    let session = require_section(SectionId::Applications).await?;
    let store = store()?;
    Placements::new(store.as_ref())
        .record_application(&session, &application)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_application_status(
    id: Uuid,
    update: ApplicationStatusUpdate,
) -> Result<Application, ServerFnError> {
    let session = require_section(SectionId::Applications).await?;
    let store = store()?;
    Placements::new(store.as_ref())
        .update_application_status(&session, id, &update)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Counters for the overview page.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_overview() -> Result<Vec<StatCard>, ServerFnError> {
    let session = require_section(SectionId::Overview).await?;
    let store = store()?;
    Placements::new(store.as_ref())
        .overview(&session)
        .await
        .map_err(|e| e.into_server_fn_error())
}
