//! Helpers the render layer calls around the catalog and cart.
//!
//! # Services
//!
//! - `whatsapp` - Product enquiry deep links
//! - `forms` - Newsletter and contact form validation
//!
//! Neither talks to a backend: enquiry links are opened by the shopper's
//! device, and accepted form submissions are only logged.

pub mod forms;
pub mod whatsapp;
