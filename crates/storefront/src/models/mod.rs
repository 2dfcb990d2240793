//! Domain models for storefront.

pub mod session;
pub mod user;

pub use session::SessionData;
pub use user::User;
