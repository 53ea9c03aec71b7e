// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE services and the domain
// - It provides the boundary between the page (HTTP) and Domain (Services)
// - It never holds state of its own
// - It translates between DTOs and domain types

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod router;
pub mod server;
pub mod state;

pub use dto::*;
pub use error_handling::{ApiJson, ErrorResponse, ErrorType};
pub use router::build_router;
pub use server::{build_state, start_server};
pub use state::AppState;
