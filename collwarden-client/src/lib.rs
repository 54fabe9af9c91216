//! # collwarden-client
//!
//! Blocking HTTP client for the bookmark service's `/api/v1` endpoints.
//! [`LinkwardenClient`] implements both remote traits from
//! `collwarden-core`, mapping every failure onto
//! [`RemoteError`](collwarden_core::RemoteError).

mod client;
mod wire;

pub use client::{LinkwardenClient, API_PREFIX};
