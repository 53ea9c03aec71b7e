// src/integrations/mod.rs
//
// External Integrations Module

pub mod anilist;

pub use anilist::{AniListClient, CatalogGateway, GraphQlRequest};
