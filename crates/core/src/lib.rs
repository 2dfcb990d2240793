//! Aurelia Core - Shared domain library for the Aurelia Jewels storefront.
//!
//! This crate provides the types and pure logic used by every Aurelia component:
//! - `storefront` - Public-facing e-commerce site
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and logic - no I/O, no database access,
//! no HTTP. Persistence of the stores defined here (cart, wishlist, order
//! snapshot) is the storefront's concern; this crate only knows how they mutate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and categories
//! - [`catalog`] - Products, the static fallback catalog, listing refinement
//! - [`cart`] - Cart line items and cart mutations
//! - [`wishlist`] - Set-semantics wishlist
//! - [`resolve`] - Enrichment of stored ids against live and fallback data
//! - [`order`] - Order snapshot captured at checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod resolve;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartItem, ProductSnapshot};
pub use catalog::{
    DEFAULT_MAX_PRICE, ListingFilter, ListingSort, Product, category_counts, fallback_catalog,
    merge_listing, refine,
};
pub use order::OrderSnapshot;
pub use types::*;
pub use wishlist::Wishlist;
