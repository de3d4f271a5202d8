//! Data models for the Netro API.
//!
//! This module contains the response envelope and the request payloads sent
//! to each endpoint.

// Export submodules
pub mod envelope;
pub mod requests;
