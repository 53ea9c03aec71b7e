// src/services/test_support.rs
//
// Scripted catalog used by service and route tests.
// Answers each (year, page) with a canned media list and records every call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{CoverImage, MangaSummary, MangaTitle};
use crate::error::{AppError, AppResult};
use crate::integrations::anilist::{CatalogGateway, CatalogResponse};

pub fn manga(id: i64, romaji: &str) -> MangaSummary {
    MangaSummary {
        id,
        title: MangaTitle {
            romaji: romaji.to_string(),
            english: None,
            native: None,
        },
        cover_image: CoverImage {
            large: Some(format!("https://img.example/{id}.jpg")),
            ..CoverImage::default()
        },
    }
}

pub fn page_json(mangas: &[MangaSummary]) -> Value {
    json!({ "data": { "Page": { "media": mangas } } })
}

#[derive(Default)]
pub struct ScriptedCatalog {
    pages: HashMap<(i64, i64), Value>,
    failing_years: HashMap<i64, String>,
    delay: Option<Duration>,
    status: Option<u16>,
    calls: Mutex<Vec<(i64, i64)>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `year`/`page` with these mangas
    pub fn page(mut self, year: i64, page: i64, mangas: &[MangaSummary]) -> Self {
        self.pages.insert((year, page), page_json(mangas));
        self
    }

    /// Answer `year`/`page` with an arbitrary body
    pub fn raw(mut self, year: i64, page: i64, body: Value) -> Self {
        self.pages.insert((year, page), body);
        self
    }

    /// Every request for `year` fails as if the catalog were unreachable
    pub fn unreachable(mut self, year: i64) -> Self {
        self.failing_years.insert(year, "connection refused".to_string());
        self
    }

    /// Answer with this HTTP status instead of 200
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every (year, page) requested, sorted
    pub fn calls(&self) -> Vec<(i64, i64)> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }

    pub fn calls_for(&self, year: i64) -> Vec<i64> {
        self.calls()
            .into_iter()
            .filter(|(y, _)| *y == year)
            .map(|(_, page)| page)
            .collect()
    }
}

#[async_trait]
impl CatalogGateway for ScriptedCatalog {
    async fn forward(&self, body: &Value) -> AppResult<CatalogResponse> {
        let variable = |name: &str| body["variables"][name].as_i64().unwrap_or_default();
        let year = variable("startYear") / 10000;
        let page = variable("page");
        self.calls.lock().unwrap().push((year, page));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(reason) = self.failing_years.get(&year) {
            return Err(AppError::Network(reason.clone()));
        }

        Ok(CatalogResponse {
            status: self.status.unwrap_or(200),
            body: self
                .pages
                .get(&(year, page))
                .cloned()
                .unwrap_or_else(|| page_json(&[])),
        })
    }
}
