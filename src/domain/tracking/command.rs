use super::entity::{Rating, TrackingAction};
use crate::domain::manga::TitleKey;
use crate::domain::{DomainError, DomainResult};

/// A validated user action
///
/// Built from the raw `{action, titleKey, payload}` request before any
/// state is touched, so a bad rating or empty URL never reaches the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingCommand {
    MarkCaughtUp(TitleKey),
    MarkCompleted(TitleKey),
    ResumeCaughtUp(TitleKey),
    DropTracking(TitleKey),
    SetRating(TitleKey, Rating),
    SetCoverOverride(TitleKey, String),
}

impl TrackingCommand {
    pub fn parse(
        action: TrackingAction,
        title_key: &str,
        rating: Option<i64>,
        url: Option<&str>,
    ) -> DomainResult<Self> {
        let key = TitleKey::new(title_key)?;

        let command = match action {
            TrackingAction::MarkCaughtUp => TrackingCommand::MarkCaughtUp(key),
            TrackingAction::MarkCompleted => TrackingCommand::MarkCompleted(key),
            TrackingAction::ResumeCaughtUp => TrackingCommand::ResumeCaughtUp(key),
            TrackingAction::DropTracking => TrackingCommand::DropTracking(key),
            TrackingAction::SetRating => {
                let raw = rating.ok_or(DomainError::MissingPayload("rating"))?;
                TrackingCommand::SetRating(key, Rating::new(raw)?)
            }
            TrackingAction::SetCoverOverride => {
                let url = url.map(str::trim).unwrap_or_default();
                if url.is_empty() {
                    return Err(DomainError::EmptyCoverUrl);
                }
                TrackingCommand::SetCoverOverride(key, url.to_string())
            }
        };

        Ok(command)
    }

    pub fn action(&self) -> TrackingAction {
        match self {
            TrackingCommand::MarkCaughtUp(_) => TrackingAction::MarkCaughtUp,
            TrackingCommand::MarkCompleted(_) => TrackingAction::MarkCompleted,
            TrackingCommand::ResumeCaughtUp(_) => TrackingAction::ResumeCaughtUp,
            TrackingCommand::DropTracking(_) => TrackingAction::DropTracking,
            TrackingCommand::SetRating(..) => TrackingAction::SetRating,
            TrackingCommand::SetCoverOverride(..) => TrackingAction::SetCoverOverride,
        }
    }

    pub fn title_key(&self) -> &TitleKey {
        match self {
            TrackingCommand::MarkCaughtUp(key)
            | TrackingCommand::MarkCompleted(key)
            | TrackingCommand::ResumeCaughtUp(key)
            | TrackingCommand::DropTracking(key)
            | TrackingCommand::SetRating(key, _)
            | TrackingCommand::SetCoverOverride(key, _) => key,
        }
    }
}
