//! Four Skincare Storefront library.
//!
//! The client-side core of the storefront: a read-only product [`catalog`],
//! the persisted [`cart`] store, debounced [`search`], and the helpers the
//! render layer calls for outbound links and form handling.
//!
//! Nothing here paints anything. A render adapter (the `skincare` CLI, or any
//! other front end) holds a [`state::Storefront`] and re-renders from it after
//! every mutation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod search;
pub mod services;
pub mod state;
pub mod storage;
