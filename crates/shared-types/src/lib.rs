pub mod error;
pub mod feature_flags;

pub mod gate;
pub mod layout;
pub mod placement;
pub mod profile;
pub mod role;
pub mod session;

pub use error::*;
pub use feature_flags::*;

pub use gate::*;
pub use layout::*;
pub use placement::*;
pub use profile::*;
pub use role::*;
pub use session::*;
