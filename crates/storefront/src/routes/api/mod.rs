//! JSON API handlers.

pub mod auth;
pub mod products;
