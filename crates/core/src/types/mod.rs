//! Core types for Four Skincare.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod product;

pub use category::{Category, CategoryFilter, UnknownCategory};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use product::{Badge, Product, Rating, RatingError};
