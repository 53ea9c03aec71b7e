use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A manga as the catalog describes it
/// Read-only: never mutated after it is parsed from a catalog page
///
/// Serialized in the catalog's own JSON shape so it can be handed
/// back to clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaSummary {
    /// Opaque catalog identifier
    pub id: i64,

    pub title: MangaTitle,

    #[serde(default)]
    pub cover_image: CoverImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MangaTitle {
    pub romaji: String,
    pub english: Option<String>,
    pub native: Option<String>,
}

/// Cover variants returned by the catalog, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub color: Option<String>,
}

impl MangaSummary {
    /// De-duplication identity
    pub fn title_key(&self) -> DomainResult<TitleKey> {
        TitleKey::new(&self.title.romaji)
    }

    /// English title when present, romaji otherwise
    pub fn display_title(&self) -> &str {
        match self.title.english.as_deref() {
            Some(english) if !english.trim().is_empty() => english,
            _ => &self.title.romaji,
        }
    }

    /// `large` is the default variant
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_image
            .large
            .as_deref()
            .or(self.cover_image.extra_large.as_deref())
            .or(self.cover_image.medium.as_deref())
    }
}

/// Discovery results for a single year, in catalog popularity order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBatch {
    pub year: i32,
    pub mangas: Vec<MangaSummary>,
}

/// Identity of a manga across discovery results and tracked lists
///
/// Derived once from the romanized title and carried through every operation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TitleKey(String);

impl TitleKey {
    pub fn new(raw: &str) -> DomainResult<Self> {
        if raw.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Title key cannot be empty".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TitleKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TitleKey> for String {
    fn from(key: TitleKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for TitleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(romaji: &str, english: Option<&str>) -> MangaSummary {
        MangaSummary {
            id: 1,
            title: MangaTitle {
                romaji: romaji.to_string(),
                english: english.map(str::to_string),
                native: None,
            },
            cover_image: CoverImage::default(),
        }
    }

    #[test]
    fn test_display_title_prefers_english() {
        assert_eq!(summary("Shingeki no Kyojin", Some("Attack on Titan")).display_title(), "Attack on Titan");
        assert_eq!(summary("Shingeki no Kyojin", None).display_title(), "Shingeki no Kyojin");
        assert_eq!(summary("Shingeki no Kyojin", Some("  ")).display_title(), "Shingeki no Kyojin");
    }

    #[test]
    fn test_cover_url_falls_back() {
        let mut manga = summary("Berserk", None);
        assert_eq!(manga.cover_url(), None);

        manga.cover_image.medium = Some("m.jpg".to_string());
        assert_eq!(manga.cover_url(), Some("m.jpg"));

        manga.cover_image.large = Some("l.jpg".to_string());
        assert_eq!(manga.cover_url(), Some("l.jpg"));
    }

    #[test]
    fn test_title_key_rejects_blank() {
        assert!(TitleKey::new("   ").is_err());
        assert!(summary("", None).title_key().is_err());
    }

    #[test]
    fn test_parses_catalog_shape() {
        let json = serde_json::json!({
            "id": 30002,
            "title": { "romaji": "Berserk", "english": "Berserk", "native": "ベルセルク" },
            "coverImage": { "extraLarge": "xl.jpg", "large": "l.jpg", "medium": "m.jpg", "color": "#e4a15d" }
        });

        let manga: MangaSummary = serde_json::from_value(json).unwrap();
        assert_eq!(manga.id, 30002);
        assert_eq!(manga.cover_url(), Some("l.jpg"));
        assert_eq!(manga.title_key().unwrap().as_str(), "Berserk");
    }
}
