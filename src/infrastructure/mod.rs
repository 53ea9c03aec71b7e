// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the application
// but are not part of the domain itself.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod shared_data_file;

pub use shared_data_file::SharedDataFile;
