//! Server functions consumed by the UI.

#[cfg(feature = "server")]
pub(crate) mod auth;

mod placement;
pub use placement::*;

mod profile;
pub use profile::*;

mod session;
pub use session::*;
