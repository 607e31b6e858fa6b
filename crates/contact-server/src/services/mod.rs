//! Business logic services

pub mod submissions;

pub use submissions::SubmissionService;
