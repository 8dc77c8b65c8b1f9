// Server-only helpers shared by the server functions.

use dioxus::prelude::ServerFnError;
use shared_types::{evaluate, SectionId, Session};

use crate::auth::identity::{resolve_session, RequestIdentity};
use crate::db::{get_store, SharedStore};
use crate::error_convert::AppErrorExt;

/// The caller's session, or an `Unauthenticated` error.
pub(crate) async fn require_session() -> Result<Session, ServerFnError> {
    resolve_session(&RequestIdentity::current())
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

/// The caller's session if their role may open `section`.
pub(crate) async fn require_section(section: SectionId) -> Result<Session, ServerFnError> {
    let session = require_session().await?;
    evaluate(Some(&session), section)
        .map_err(|denial| denial.to_error(section).into_server_fn_error())?;
    Ok(session)
}

pub(crate) fn store() -> Result<SharedStore, ServerFnError> {
    get_store().map_err(AppErrorExt::into_server_fn_error)
}
