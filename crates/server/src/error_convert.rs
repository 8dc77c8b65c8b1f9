use dioxus::prelude::ServerFnError;
use shared_types::AppError;

use crate::store::StoreError;

/// Convert a data store error into an AppError.
pub fn store_to_app_error(err: StoreError) -> AppError {
    match err {
        StoreError::Network(detail) => {
            tracing::warn!(%detail, "Data store unavailable");
            AppError::transient("The data store is temporarily unavailable. Please try again.")
        }
        StoreError::Permission(detail) => AppError::unauthorized(detail),
        StoreError::NotFound { table } => AppError::not_found(format!("No matching {table} record")),
        StoreError::Invalid(detail) => AppError::bad_request(detail),
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        store_to_app_error(err)
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on StoreError.
pub trait StoreErrorExt {
    fn into_app_error(self) -> AppError;
}

impl StoreErrorExt for StoreError {
    fn into_app_error(self) -> AppError {
        store_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
