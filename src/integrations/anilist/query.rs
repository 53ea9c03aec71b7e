// src/integrations/anilist/query.rs
//
// Popular-manga query construction and response validation.
//
// ARCHITECTURE:
// - Pure functions, no I/O
// - One request per (year, page); five items per page
// - Response checks map to the catalog error taxonomy:
//   `errors` array → UpstreamQuery, wrong shape → MalformedResponse

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{DomainError, MangaSummary};
use crate::error::{AppError, AppResult};

/// Fixed page size used by every discovery request
pub const PAGE_SIZE: usize = 5;

const POPULAR_MANGA_QUERY: &str = r#"
    query ($startYear: FuzzyDateInt, $endYear: FuzzyDateInt, $page: Int) {
        Page(page: $page, perPage: 5) {
            media(format: MANGA, countryOfOrigin: JP, sort: POPULARITY_DESC, startDate_greater: $startYear, startDate_lesser: $endYear) {
                id
                title {
                    romaji
                    english
                    native
                }
                coverImage {
                    extraLarge
                    large
                    medium
                    color
                }
            }
        }
    }
"#;

/// A GraphQL request body, as sent to the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Value,
}

impl GraphQlRequest {
    /// Read back an integer variable, e.g. `page`
    pub fn variable_i64(&self, name: &str) -> Option<i64> {
        self.variables.get(name).and_then(Value::as_i64)
    }
}

/// Build the popular-manga query for one year and page
///
/// Start dates are FuzzyDateInt (`YYYYMMDD`), so a year spans
/// `year*10000` to `(year+1)*10000`, both exclusive.
pub fn build_popular_manga_query(year: i32, page: u32) -> AppResult<GraphQlRequest> {
    if !(1000..=9999).contains(&year) {
        return Err(DomainError::InvalidYear(year).into());
    }
    if page == 0 {
        return Err(DomainError::InvalidPage(page).into());
    }

    let year = i64::from(year);
    Ok(GraphQlRequest {
        query: POPULAR_MANGA_QUERY.to_string(),
        variables: json!({
            "startYear": year * 10000,
            "endYear": (year + 1) * 10000,
            "page": page,
        }),
    })
}

/// Extract `data.Page.media` from a raw catalog response
pub fn parse_page_response(response: Value) -> AppResult<Vec<MangaSummary>> {
    if let Some(errors) = response.get("errors").filter(|e| !e.is_null()) {
        let messages: Vec<String> = errors
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown error")
                            .to_string()
                    })
                    .collect()
            })
            .unwrap_or_else(|| vec![errors.to_string()]);

        return Err(AppError::UpstreamQuery(messages.join(", ")));
    }

    let media = response
        .pointer("/data/Page/media")
        .filter(|media| media.is_array())
        .cloned()
        .ok_or_else(|| AppError::MalformedResponse("missing data.Page.media".to_string()))?;

    serde_json::from_value(media).map_err(|e| AppError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_variables() {
        let request = build_popular_manga_query(2015, 2).unwrap();
        assert_eq!(request.variable_i64("startYear"), Some(20150000));
        assert_eq!(request.variable_i64("endYear"), Some(20160000));
        assert_eq!(request.variable_i64("page"), Some(2));
        assert!(request.query.contains("perPage: 5"));
        assert!(request.query.contains("format: MANGA"));
        assert!(request.query.contains("countryOfOrigin: JP"));
        assert!(request.query.contains("sort: POPULARITY_DESC"));
    }

    #[test]
    fn test_rejects_bad_year_and_page() {
        assert!(matches!(
            build_popular_manga_query(199, 1),
            Err(AppError::Domain(DomainError::InvalidYear(199)))
        ));
        assert!(build_popular_manga_query(20150, 1).is_err());
        assert!(matches!(
            build_popular_manga_query(2015, 0),
            Err(AppError::Domain(DomainError::InvalidPage(0)))
        ));
    }

    #[test]
    fn test_parse_media() {
        let response = json!({
            "data": { "Page": { "media": [
                { "id": 1, "title": { "romaji": "Berserk", "english": null, "native": null },
                  "coverImage": { "large": "b.jpg" } },
                { "id": 2, "title": { "romaji": "Vagabond", "english": "Vagabond", "native": "バガボンド" },
                  "coverImage": { "large": "v.jpg" } }
            ] } }
        });

        let mangas = parse_page_response(response).unwrap();
        assert_eq!(mangas.len(), 2);
        assert_eq!(mangas[1].display_title(), "Vagabond");
    }

    #[test]
    fn test_upstream_errors_joined() {
        let response = json!({
            "data": null,
            "errors": [ { "message": "Too Many Requests", "status": 429 }, { "message": "Try later" } ]
        });

        match parse_page_response(response) {
            Err(AppError::UpstreamQuery(message)) => assert_eq!(message, "Too Many Requests, Try later"),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_shapes() {
        for response in [
            json!({}),
            json!({ "data": {} }),
            json!({ "data": { "Page": {} } }),
            json!({ "data": { "Page": { "media": "nope" } } }),
            json!({ "data": { "Page": { "media": [ { "id": 1 } ] } } }),
        ] {
            assert!(matches!(parse_page_response(response), Err(AppError::MalformedResponse(_))));
        }
    }

    #[test]
    fn test_empty_page_is_valid() {
        let response = json!({ "data": { "Page": { "media": [] } } });
        assert!(parse_page_response(response).unwrap().is_empty());
    }
}
