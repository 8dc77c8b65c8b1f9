pub mod badge;
pub mod button;
pub mod card;
pub mod input;
pub mod page_header;
pub mod skeleton;
pub mod textarea;

// Depends on badge, skeleton and sidebar
pub mod sidebar;
pub mod shell;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use input::*;
pub use page_header::*;
pub use shell::*;
pub use sidebar::*;
pub use skeleton::*;
pub use textarea::*;
