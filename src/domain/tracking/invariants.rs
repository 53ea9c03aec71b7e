use std::collections::HashSet;

use super::entity::TrackedItem;
use super::state::TrackingState;
use crate::domain::{DomainError, DomainResult};

/// Validates all tracking invariants
/// These are the absolute rules that must hold after any action or load
pub fn validate_tracking_state(state: &TrackingState) -> DomainResult<()> {
    validate_unique("caught-up", state.caught_up())?;
    validate_unique("completed", state.completed())?;
    validate_disjoint(state)?;
    validate_completed_order(state.completed())?;
    validate_ratings(state)?;
    Ok(())
}

/// A title key appears once per list
fn validate_unique(name: &str, items: &[TrackedItem]) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(&item.title_key) {
            return Err(DomainError::InvariantViolation(format!(
                "{} appears twice in the {} list",
                item.title_key, name
            )));
        }
    }
    Ok(())
}

/// No title key is both caught-up and completed
fn validate_disjoint(state: &TrackingState) -> DomainResult<()> {
    let completed: HashSet<_> = state.completed().iter().map(|i| &i.title_key).collect();
    match state
        .caught_up()
        .iter()
        .find(|item| completed.contains(&item.title_key))
    {
        Some(item) => Err(DomainError::InvariantViolation(format!(
            "{} is both caught-up and completed",
            item.title_key
        ))),
        None => Ok(()),
    }
}

/// Completed is ordered by rating, highest first
fn validate_completed_order(items: &[TrackedItem]) -> DomainResult<()> {
    if items
        .windows(2)
        .any(|pair| pair[0].effective_rating() < pair[1].effective_rating())
    {
        return Err(DomainError::InvariantViolation(
            "Completed list is not sorted by rating".to_string(),
        ));
    }
    Ok(())
}

/// Ratings only live on completed items, and agree with the ratings map
fn validate_ratings(state: &TrackingState) -> DomainResult<()> {
    if let Some(item) = state.caught_up().iter().find(|i| i.rating.is_some()) {
        return Err(DomainError::InvariantViolation(format!(
            "Caught-up item {} carries a rating",
            item.title_key
        )));
    }

    for item in state.completed() {
        if item.rating != state.ratings().get(&item.title_key).copied() {
            return Err(DomainError::InvariantViolation(format!(
                "Rating of {} disagrees with the ratings map",
                item.title_key
            )));
        }
    }
    Ok(())
}

/// Invariants that must hold true for tracking state:
///
/// 1. Title key unique within each list
/// 2. Title key in at most one of {caught-up, completed}
/// 3. Completed sorted by rating descending, unrated as 0
/// 4. Ratings within 1..=10 (enforced by `Rating`)
/// 5. Caught-up items never carry a rating
/// 6. Candidates never contain a tracked key
