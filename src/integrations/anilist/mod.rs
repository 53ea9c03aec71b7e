// src/integrations/anilist/mod.rs
//
// AniList GraphQL catalog

pub mod client;
pub mod query;

pub use client::{AniListClient, CatalogGateway, CatalogResponse, ANILIST_GRAPHQL_URL};
pub use query::{build_popular_manga_query, parse_page_response, GraphQlRequest, PAGE_SIZE};
