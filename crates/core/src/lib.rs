//! Four Skincare Core - Shared types library.
//!
//! This crate provides common types used across all Four Skincare components:
//! - `storefront` - Catalog, cart store, search and form handling
//! - `cli` - Terminal front end that renders the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access, no timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, categories, products and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
