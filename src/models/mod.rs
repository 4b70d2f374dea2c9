//! Request and Response models for the media API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{MediaIdsQuery, MediaQuery};
pub use responses::{ErrorResponse, MediaIdsResponse, StatusResponse};
