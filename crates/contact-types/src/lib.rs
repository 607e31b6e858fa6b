//! Contact Types - Pure type definitions for contact form submissions
//!
//! This crate has no async runtime dependencies. It holds the stored entry
//! shape, the raw form payload and the rules that turn one into the other.

pub mod contact;
pub mod form;

pub use contact::*;
pub use form::*;
