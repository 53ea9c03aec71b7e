// src/domain/tracking/state.rs
//
// Tracking state: discovery candidates, the caught-up list and the
// completed list, plus the cover and rating maps layered on top.
//
// RULES:
// - A title key lives in at most one of {caught-up, completed}
// - Re-adding an already tracked key to the same list is a no-op
// - Completed is always sorted by rating, highest first (stable)
// - Candidates never contain a tracked key
// - Pure and synchronous; persistence is the caller's job

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use super::entity::{Rating, TrackedItem, TrackingList};
use crate::domain::manga::{MangaSummary, TitleKey, YearBatch};
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingState {
    candidates: Vec<YearBatch>,
    caught_up: Vec<TrackedItem>,
    completed: Vec<TrackedItem>,
    cover_overrides: BTreeMap<TitleKey, String>,
    ratings: BTreeMap<TitleKey, Rating>,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from its stored parts
    ///
    /// Duplicates are collapsed (first occurrence wins), a key present in
    /// both lists is kept in completed only, and the maps are layered back
    /// onto the items.
    pub fn from_parts(
        caught_up: Vec<TrackedItem>,
        completed: Vec<TrackedItem>,
        cover_overrides: BTreeMap<TitleKey, String>,
        ratings: BTreeMap<TitleKey, Rating>,
    ) -> Self {
        let mut state = Self {
            cover_overrides,
            ratings,
            ..Self::default()
        };

        for item in completed {
            state.insert(item, TrackingList::Completed);
        }
        for item in caught_up {
            if state.list_of(&item.title_key).is_none() {
                state.insert(item, TrackingList::CaughtUp);
            }
        }

        state
    }

    // ========================================================================
    // READ ACCESS
    // ========================================================================

    pub fn caught_up(&self) -> &[TrackedItem] {
        &self.caught_up
    }

    pub fn completed(&self) -> &[TrackedItem] {
        &self.completed
    }

    pub fn candidates(&self) -> &[YearBatch] {
        &self.candidates
    }

    pub fn cover_overrides(&self) -> &BTreeMap<TitleKey, String> {
        &self.cover_overrides
    }

    pub fn ratings(&self) -> &BTreeMap<TitleKey, Rating> {
        &self.ratings
    }

    pub fn cover_override(&self, key: &TitleKey) -> Option<&str> {
        self.cover_overrides.get(key).map(String::as_str)
    }

    /// Which list, if any, currently holds `key`
    pub fn list_of(&self, key: &TitleKey) -> Option<TrackingList> {
        if self.completed.iter().any(|item| &item.title_key == key) {
            Some(TrackingList::Completed)
        } else if self.caught_up.iter().any(|item| &item.title_key == key) {
            Some(TrackingList::CaughtUp)
        } else {
            None
        }
    }

    pub fn tracked_item(&self, key: &TitleKey) -> Option<&TrackedItem> {
        self.completed
            .iter()
            .chain(self.caught_up.iter())
            .find(|item| &item.title_key == key)
    }

    /// Discovery result carrying `key`, if one is currently shown
    pub fn candidate(&self, key: &TitleKey) -> Option<&MangaSummary> {
        self.candidates
            .iter()
            .flat_map(|batch| batch.mangas.iter())
            .find(|manga| manga.title_key().is_ok_and(|k| &k == key))
    }

    /// Snapshot of every tracked key, for use outside the lock
    pub fn tracked_keys(&self) -> TrackedKeys {
        TrackedKeys {
            keys: self
                .caught_up
                .iter()
                .chain(self.completed.iter())
                .map(|item| item.title_key.clone())
                .collect(),
        }
    }

    pub fn filter_untracked(&self, summaries: Vec<MangaSummary>) -> Vec<MangaSummary> {
        self.tracked_keys().filter_untracked(summaries)
    }

    // ========================================================================
    // MUTATIONS
    // Each returns whether state changed, so callers know when to save.
    // ========================================================================

    /// Replace discovery results, dropping anything already tracked
    pub fn replace_candidates(&mut self, batches: Vec<YearBatch>) {
        let tracked = self.tracked_keys();
        self.candidates = batches
            .into_iter()
            .map(|batch| YearBatch {
                year: batch.year,
                mangas: tracked.filter_untracked(batch.mangas),
            })
            .collect();
    }

    pub fn mark_caught_up(&mut self, summary: &MangaSummary) -> DomainResult<bool> {
        self.mark(summary, TrackingList::CaughtUp)
    }

    pub fn mark_completed(&mut self, summary: &MangaSummary) -> DomainResult<bool> {
        self.mark(summary, TrackingList::Completed)
    }

    /// Move an already tracked item into `target`
    pub fn move_to(&mut self, key: &TitleKey, target: TrackingList) -> DomainResult<bool> {
        match self.list_of(key) {
            Some(list) if list == target => Ok(false),
            Some(list) => {
                let item = self
                    .take(key, list)
                    .ok_or_else(|| DomainError::NotTracked(key.to_string()))?;
                Ok(self.insert(item, target))
            }
            None => Err(DomainError::NotTracked(key.to_string())),
        }
    }

    /// "Just read new chapters": bring the item to the front of caught-up
    pub fn resume_caught_up(&mut self, key: &TitleKey) -> bool {
        match self.caught_up.iter().position(|item| &item.title_key == key) {
            Some(0) | None => false,
            Some(index) => {
                let item = self.caught_up.remove(index);
                self.caught_up.insert(0, item);
                true
            }
        }
    }

    /// "No longer up to date": forget the item in both lists
    ///
    /// Cover and rating entries are kept so re-tracking restores them.
    pub fn drop_tracking(&mut self, key: &TitleKey) -> bool {
        let before = self.caught_up.len() + self.completed.len();
        self.caught_up.retain(|item| &item.title_key != key);
        self.completed.retain(|item| &item.title_key != key);
        before != self.caught_up.len() + self.completed.len()
    }

    pub fn set_rating(&mut self, key: &TitleKey, rating: Rating) -> DomainResult<bool> {
        let item = self
            .completed
            .iter_mut()
            .find(|item| &item.title_key == key)
            .ok_or_else(|| DomainError::NotTracked(key.to_string()))?;

        let changed = item.rating != Some(rating);
        item.rating = Some(rating);
        self.ratings.insert(key.clone(), rating);
        self.sort_completed();

        Ok(changed)
    }

    /// Record a replacement cover, tracked or not
    pub fn set_cover_override(&mut self, key: &TitleKey, url: &str) -> DomainResult<bool> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DomainError::EmptyCoverUrl);
        }

        let changed = self.cover_override(key) != Some(url);
        self.cover_overrides.insert(key.clone(), url.to_string());

        for item in self
            .caught_up
            .iter_mut()
            .chain(self.completed.iter_mut())
            .filter(|item| &item.title_key == key)
        {
            item.cover_image_override = Some(url.to_string());
        }

        Ok(changed)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn mark(&mut self, summary: &MangaSummary, target: TrackingList) -> DomainResult<bool> {
        let key = summary.title_key()?;

        match self.list_of(&key) {
            Some(list) if list == target => Ok(false),
            Some(_) => self.move_to(&key, target),
            None => {
                let item = TrackedItem::from_summary(summary)?;
                Ok(self.insert(item, target))
            }
        }
    }

    fn take(&mut self, key: &TitleKey, list: TrackingList) -> Option<TrackedItem> {
        let items = self.list_mut(list);
        let index = items.iter().position(|item| &item.title_key == key)?;
        Some(items.remove(index))
    }

    fn insert(&mut self, mut item: TrackedItem, target: TrackingList) -> bool {
        if self.list(target).iter().any(|i| i.title_key == item.title_key) {
            return false;
        }

        item.cover_image_override = self.cover_overrides.get(&item.title_key).cloned();
        item.rating = match target {
            TrackingList::Completed => self.ratings.get(&item.title_key).copied(),
            TrackingList::CaughtUp => None,
        };

        let key = item.title_key.clone();
        self.list_mut(target).push(item);
        if target == TrackingList::Completed {
            self.sort_completed();
        }

        for batch in &mut self.candidates {
            batch.mangas.retain(|manga| manga.title_key().map_or(true, |k| k != key));
        }

        true
    }

    fn list(&self, list: TrackingList) -> &Vec<TrackedItem> {
        match list {
            TrackingList::CaughtUp => &self.caught_up,
            TrackingList::Completed => &self.completed,
        }
    }

    fn list_mut(&mut self, list: TrackingList) -> &mut Vec<TrackedItem> {
        match list {
            TrackingList::CaughtUp => &mut self.caught_up,
            TrackingList::Completed => &mut self.completed,
        }
    }

    /// Stable: equal ratings keep their relative order
    fn sort_completed(&mut self) {
        self.completed
            .sort_by_key(|item| Reverse(item.effective_rating()));
    }
}

/// Tracked title keys captured at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedKeys {
    keys: HashSet<TitleKey>,
}

impl TrackedKeys {
    pub fn contains(&self, key: &TitleKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keep the summaries whose key is not tracked
    ///
    /// A summary without a usable key can never be tracked and is dropped.
    pub fn filter_untracked(&self, summaries: Vec<MangaSummary>) -> Vec<MangaSummary> {
        summaries
            .into_iter()
            .filter(|summary| {
                summary
                    .title_key()
                    .is_ok_and(|key| !self.keys.contains(&key))
            })
            .collect()
    }
}

impl FromIterator<TitleKey> for TrackedKeys {
    fn from_iter<I: IntoIterator<Item = TitleKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manga::{CoverImage, MangaTitle};
    use crate::domain::tracking::validate_tracking_state;

    fn manga(id: i64, romaji: &str) -> MangaSummary {
        MangaSummary {
            id,
            title: MangaTitle {
                romaji: romaji.to_string(),
                english: None,
                native: None,
            },
            cover_image: CoverImage {
                large: Some(format!("{id}.jpg")),
                ..CoverImage::default()
            },
        }
    }

    fn key(raw: &str) -> TitleKey {
        TitleKey::new(raw).unwrap()
    }

    fn rating(value: i64) -> Rating {
        Rating::new(value).unwrap()
    }

    fn completed_keys(state: &TrackingState) -> Vec<&str> {
        state.completed().iter().map(|i| i.title_key.as_str()).collect()
    }

    #[test]
    fn test_mark_caught_up_is_idempotent() {
        let mut state = TrackingState::new();
        assert!(state.mark_caught_up(&manga(1, "Berserk")).unwrap());
        assert!(!state.mark_caught_up(&manga(1, "Berserk")).unwrap());
        assert_eq!(state.caught_up().len(), 1);
    }

    #[test]
    fn test_marking_moves_between_lists() {
        let mut state = TrackingState::new();
        let berserk = manga(1, "Berserk");

        state.mark_caught_up(&berserk).unwrap();
        state.mark_completed(&berserk).unwrap();
        assert!(state.caught_up().is_empty());
        assert_eq!(state.list_of(&key("Berserk")), Some(TrackingList::Completed));

        state.mark_caught_up(&berserk).unwrap();
        assert!(state.completed().is_empty());
        assert_eq!(state.list_of(&key("Berserk")), Some(TrackingList::CaughtUp));
        validate_tracking_state(&state).unwrap();
    }

    #[test]
    fn test_no_key_in_both_lists_for_any_sequence() {
        let mut state = TrackingState::new();
        let titles = ["A", "B", "C"];

        for step in 0..30 {
            let title = titles[step % titles.len()];
            let summary = manga(step as i64, title);
            if step % 2 == 0 {
                state.mark_caught_up(&summary).unwrap();
            } else {
                state.mark_completed(&summary).unwrap();
            }
            validate_tracking_state(&state).unwrap();
        }
    }

    #[test]
    fn test_rating_orders_completed() {
        let mut state = TrackingState::new();
        state.mark_completed(&manga(1, "A")).unwrap();
        state.mark_completed(&manga(2, "B")).unwrap();

        state.set_rating(&key("A"), rating(5)).unwrap();
        state.set_rating(&key("B"), rating(9)).unwrap();

        assert_eq!(completed_keys(&state), vec!["B", "A"]);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        let mut state = TrackingState::new();
        for (id, title) in ["A", "B", "C", "D"].iter().enumerate() {
            state.mark_completed(&manga(id as i64, title)).unwrap();
        }

        state.set_rating(&key("C"), rating(7)).unwrap();
        state.set_rating(&key("A"), rating(7)).unwrap();

        // C was ahead of A once rated, unrated B and D keep their order
        assert_eq!(completed_keys(&state), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_rating_requires_completed_item() {
        let mut state = TrackingState::new();
        state.mark_caught_up(&manga(1, "A")).unwrap();

        let err = state.set_rating(&key("A"), rating(8)).unwrap_err();
        assert!(matches!(err, DomainError::NotTracked(_)));
        assert!(state.ratings().is_empty());
    }

    #[test]
    fn test_rating_survives_round_trip_through_caught_up() {
        let mut state = TrackingState::new();
        let a = manga(1, "A");
        state.mark_completed(&a).unwrap();
        state.set_rating(&key("A"), rating(6)).unwrap();

        state.mark_caught_up(&a).unwrap();
        assert_eq!(state.caught_up()[0].rating, None);

        state.mark_completed(&a).unwrap();
        assert_eq!(state.completed()[0].rating, Some(rating(6)));
    }

    #[test]
    fn test_resume_moves_to_front() {
        let mut state = TrackingState::new();
        for (id, title) in ["A", "B", "C"].iter().enumerate() {
            state.mark_caught_up(&manga(id as i64, title)).unwrap();
        }

        assert!(state.resume_caught_up(&key("C")));
        let order: Vec<_> = state.caught_up().iter().map(|i| i.title_key.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);

        assert!(!state.resume_caught_up(&key("C")));
        assert!(!state.resume_caught_up(&key("missing")));
    }

    #[test]
    fn test_drop_makes_item_eligible_again() {
        let mut state = TrackingState::new();
        let a = manga(1, "A");
        state.mark_caught_up(&a).unwrap();
        assert!(state.filter_untracked(vec![a.clone()]).is_empty());

        assert!(state.drop_tracking(&key("A")));
        assert_eq!(state.filter_untracked(vec![a.clone()]), vec![a]);
        assert!(!state.drop_tracking(&key("A")));
    }

    #[test]
    fn test_cover_override_applies_with_or_without_tracking() {
        let mut state = TrackingState::new();
        assert!(state.set_cover_override(&key("A"), "vol2.jpg").unwrap());
        assert!(!state.set_cover_override(&key("A"), "vol2.jpg").unwrap());

        state.mark_caught_up(&manga(1, "A")).unwrap();
        assert_eq!(state.caught_up()[0].effective_cover(), Some("vol2.jpg"));

        state.set_cover_override(&key("A"), "vol3.jpg").unwrap();
        assert_eq!(state.caught_up()[0].effective_cover(), Some("vol3.jpg"));
    }

    #[test]
    fn test_empty_cover_override_rejected() {
        let mut state = TrackingState::new();
        let err = state.set_cover_override(&key("A"), "   ").unwrap_err();
        assert!(matches!(err, DomainError::EmptyCoverUrl));
        assert!(state.cover_overrides().is_empty());
    }

    #[test]
    fn test_candidates_exclude_tracked() {
        let mut state = TrackingState::new();
        state.mark_completed(&manga(1, "A")).unwrap();

        state.replace_candidates(vec![YearBatch {
            year: 2015,
            mangas: vec![manga(1, "A"), manga(2, "B")],
        }]);
        assert_eq!(state.candidates()[0].mangas, vec![manga(2, "B")]);
        assert!(state.candidate(&key("B")).is_some());

        state.mark_caught_up(&manga(2, "B")).unwrap();
        assert!(state.candidates()[0].mangas.is_empty());
        assert!(state.candidate(&key("B")).is_none());
    }

    #[test]
    fn test_move_to_requires_tracked_item() {
        let mut state = TrackingState::new();
        assert!(state.move_to(&key("A"), TrackingList::Completed).is_err());

        state.mark_caught_up(&manga(1, "A")).unwrap();
        assert!(state.move_to(&key("A"), TrackingList::Completed).unwrap());
        assert!(!state.move_to(&key("A"), TrackingList::Completed).unwrap());
    }

    #[test]
    fn test_from_parts_normalizes() {
        let a = TrackedItem::from_summary(&manga(1, "A")).unwrap();
        let b = TrackedItem::from_summary(&manga(2, "B")).unwrap();

        let mut ratings = BTreeMap::new();
        ratings.insert(key("B"), rating(9));
        let mut covers = BTreeMap::new();
        covers.insert(key("A"), "a2.jpg".to_string());

        let state = TrackingState::from_parts(
            vec![a.clone(), a.clone(), b.clone()],
            vec![a.clone(), b.clone()],
            covers,
            ratings,
        );

        assert!(state.caught_up().is_empty());
        assert_eq!(completed_keys(&state), vec!["B", "A"]);
        assert_eq!(state.completed()[1].effective_cover(), Some("a2.jpg"));
        validate_tracking_state(&state).unwrap();
    }
}
