use serde::{Deserialize, Serialize};

use crate::domain::manga::{MangaSummary, TitleKey};
use crate::domain::{DomainError, DomainResult};

/// User rating for a completed manga, always within 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> DomainResult<Self> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(DomainError::InvalidRating(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// The two lists a manga can be tracked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackingList {
    CaughtUp,
    Completed,
}

impl TrackingList {
    /// Actions the view offers for an item living in this list
    pub fn actions(self) -> &'static [TrackingAction] {
        match self {
            TrackingList::CaughtUp => &[
                TrackingAction::ResumeCaughtUp,
                TrackingAction::DropTracking,
                TrackingAction::SetCoverOverride,
            ],
            TrackingList::Completed => &[
                TrackingAction::SetRating,
                TrackingAction::SetCoverOverride,
            ],
        }
    }
}

/// Actions the view offers for a discovery result
pub const CANDIDATE_ACTIONS: &[TrackingAction] = &[
    TrackingAction::MarkCaughtUp,
    TrackingAction::MarkCompleted,
    TrackingAction::SetCoverOverride,
];

/// Every user action that can change tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackingAction {
    MarkCaughtUp,
    MarkCompleted,
    ResumeCaughtUp,
    DropTracking,
    SetRating,
    SetCoverOverride,
}

/// A manga the user follows, as plain data
///
/// Presentation (effective cover, available actions) is derived
/// from it, never stored on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedItem {
    /// Catalog identifier
    pub id: i64,

    pub title_key: TitleKey,

    /// English title if the catalog had one, romaji otherwise
    pub display_title: String,

    /// Catalog cover URL
    pub cover_image: Option<String>,

    /// Replacement cover supplied by the user
    pub cover_image_override: Option<String>,

    /// Only ever set while the item is in the completed list
    pub rating: Option<Rating>,
}

impl TrackedItem {
    pub fn from_summary(summary: &MangaSummary) -> DomainResult<Self> {
        Ok(Self {
            id: summary.id,
            title_key: summary.title_key()?,
            display_title: summary.display_title().to_string(),
            cover_image: summary.cover_url().map(str::to_string),
            cover_image_override: None,
            rating: None,
        })
    }

    /// Override first, catalog cover otherwise
    pub fn effective_cover(&self) -> Option<&str> {
        self.cover_image_override
            .as_deref()
            .or(self.cover_image.as_deref())
    }

    /// Sort weight: unrated items count as 0
    pub fn effective_rating(&self) -> u8 {
        self.rating.map(Rating::value).unwrap_or(0)
    }
}
