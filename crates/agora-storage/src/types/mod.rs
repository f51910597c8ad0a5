//! Type definitions for agora storage.

mod clubs;
mod executives;
mod ids;
mod memberships;
mod requests;
mod roles;
mod users;

// Re-export all types from submodules
pub use clubs::*;
pub use executives::*;
pub use ids::*;
pub use memberships::*;
pub use requests::*;
pub use roles::*;
pub use users::*;
