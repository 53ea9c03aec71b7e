// src/repositories/tracking_store.rs
//
// Persists tracking state as four independent slots in a blob store.
//
// RULES:
// - Items are stored as plain data records, never as rendered markup
// - A missing slot is an empty default, not an error
// - Ratings and covers are stored once, in their maps, and layered
//   back onto the items on load

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::blob_store::BlobStore;
use crate::domain::{validate_tracking_state, Rating, TitleKey, TrackedItem, TrackingState};
use crate::error::AppResult;

pub const CAUGHT_UP_SLOT: &str = "caughtUpList";
pub const COMPLETED_SLOT: &str = "completedItList";
pub const COVER_OVERRIDES_SLOT: &str = "mangaImages";
pub const RATINGS_SLOT: &str = "mangaRatings";

/// Stored form of a tracked item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedItemRecord {
    pub id: i64,
    pub title_key: TitleKey,
    pub display_title: String,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl From<&TrackedItem> for TrackedItemRecord {
    fn from(item: &TrackedItem) -> Self {
        Self {
            id: item.id,
            title_key: item.title_key.clone(),
            display_title: item.display_title.clone(),
            cover_image: item.cover_image.clone(),
        }
    }
}

impl From<TrackedItemRecord> for TrackedItem {
    fn from(record: TrackedItemRecord) -> Self {
        Self {
            id: record.id,
            title_key: record.title_key,
            display_title: record.display_title,
            cover_image: record.cover_image,
            cover_image_override: None,
            rating: None,
        }
    }
}

pub struct TrackingStore {
    blobs: Arc<dyn BlobStore>,
}

impl TrackingStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Write every slot
    pub fn save(&self, state: &TrackingState) -> AppResult<()> {
        let caught_up: Vec<TrackedItemRecord> = state.caught_up().iter().map(Into::into).collect();
        let completed: Vec<TrackedItemRecord> = state.completed().iter().map(Into::into).collect();

        self.write_slot(CAUGHT_UP_SLOT, &caught_up)?;
        self.write_slot(COMPLETED_SLOT, &completed)?;
        self.write_slot(COVER_OVERRIDES_SLOT, state.cover_overrides())?;
        self.write_slot(RATINGS_SLOT, state.ratings())?;

        Ok(())
    }

    /// Read every slot and rebuild live state
    pub fn load(&self) -> AppResult<TrackingState> {
        let caught_up: Vec<TrackedItemRecord> = self.read_slot(CAUGHT_UP_SLOT)?;
        let completed: Vec<TrackedItemRecord> = self.read_slot(COMPLETED_SLOT)?;
        let cover_overrides: BTreeMap<TitleKey, String> = self.read_slot(COVER_OVERRIDES_SLOT)?;
        let ratings: BTreeMap<TitleKey, Rating> = self.read_slot(RATINGS_SLOT)?;

        let state = TrackingState::from_parts(
            caught_up.into_iter().map(Into::into).collect(),
            completed.into_iter().map(Into::into).collect(),
            cover_overrides,
            ratings,
        );
        validate_tracking_state(&state)?;

        Ok(state)
    }

    fn write_slot<T: Serialize + ?Sized>(&self, slot: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.blobs.put(slot, &json)
    }

    fn read_slot<T: DeserializeOwned + Default>(&self, slot: &str) -> AppResult<T> {
        match self.blobs.get(slot)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(T::default()),
        }
    }
}
