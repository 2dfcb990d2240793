//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Password signup and login
//! - `catalog` - Live catalog reads with static fallback
//! - `identity` - Signed identity cookie
//! - `stores` - Cart, wishlist and order snapshot in the visitor session

pub mod auth;
pub mod catalog;
pub mod identity;
pub mod stores;
