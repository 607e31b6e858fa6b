//! HTTP handlers

pub mod admin;
pub mod api;
pub mod contact;
pub mod error;
pub mod health;

pub use health::health;
