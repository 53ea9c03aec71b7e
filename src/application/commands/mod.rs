// src/application/commands/mod.rs
//
// HTTP Command Handlers
//
// ARCHITECTURE:
// - Handlers are thin adapters between the page and Services
// - Handlers accept DTOs, return DTOs
// - Handlers rely on AppError's IntoResponse for error conversion
// - Handlers NEVER contain business logic

pub mod catalog_commands;
pub mod data_commands;
pub mod tracking_commands;

pub use catalog_commands::*;
pub use data_commands::*;
pub use tracking_commands::*;
