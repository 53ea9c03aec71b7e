// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement beyond what loading requires
// - Explicit SQL only

pub mod blob_store;
pub mod tracking_store;

pub use blob_store::{BlobStore, InMemoryBlobStore, SqliteBlobStore};
pub use tracking_store::{TrackedItemRecord, TrackingStore};
