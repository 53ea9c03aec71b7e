use serde::Serialize;

use super::entity::{TrackedItem, TrackingAction, TrackingList, CANDIDATE_ACTIONS};
use super::state::TrackingState;
use crate::domain::manga::{MangaSummary, TitleKey};
use crate::domain::DomainResult;

/// One card as the page renders it
///
/// Derived on every read. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub title_key: TitleKey,
    pub display_title: String,
    pub cover_url: Option<String>,
    pub rating: Option<u8>,
    pub actions: Vec<TrackingAction>,
}

impl ItemView {
    pub fn tracked(item: &TrackedItem, list: TrackingList) -> Self {
        Self {
            title_key: item.title_key.clone(),
            display_title: item.display_title.clone(),
            cover_url: item.effective_cover().map(str::to_string),
            rating: item.rating.map(|r| r.value()),
            actions: list.actions().to_vec(),
        }
    }

    /// A discovery result, with the user's cover override applied
    pub fn candidate(summary: &MangaSummary, state: &TrackingState) -> DomainResult<Self> {
        let title_key = summary.title_key()?;
        let cover_url = state
            .cover_override(&title_key)
            .or(summary.cover_url())
            .map(str::to_string);

        Ok(Self {
            display_title: summary.display_title().to_string(),
            title_key,
            cover_url,
            rating: None,
            actions: CANDIDATE_ACTIONS.to_vec(),
        })
    }
}

/// Both tracked lists, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    pub caught_up: Vec<ItemView>,
    pub completed: Vec<ItemView>,
}

impl TrackingView {
    pub fn of(state: &TrackingState) -> Self {
        Self {
            caught_up: list_view(state.caught_up(), TrackingList::CaughtUp),
            completed: list_view(state.completed(), TrackingList::Completed),
        }
    }
}

fn list_view(items: &[TrackedItem], list: TrackingList) -> Vec<ItemView> {
    items.iter().map(|item| ItemView::tracked(item, list)).collect()
}
