pub mod context;
pub mod event;
pub mod user;

pub use context::*;
pub use event::*;
pub use user::*;
