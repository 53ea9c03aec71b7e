// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod discovery_service;
pub mod tracking_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use discovery_service::DiscoveryService;

pub use tracking_service::{CommandOutcome, Discovery, TrackingService};
