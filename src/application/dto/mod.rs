// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Incoming DTOs are validated into domain commands before use

use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainResult, ItemView, TrackingAction, TrackingCommand, TrackingState, TrackingView,
};
use crate::services::{CommandOutcome, Discovery};

// ============================================================================
// DISCOVERY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDto {
    pub epoch: u64,
    pub years: Vec<YearItemsDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearItemsDto {
    pub year: i32,
    pub items: Vec<ItemView>,
}

impl DiscoveryDto {
    /// Present accepted candidates with the overrides in `state`
    pub fn build(discovery: &Discovery, state: &TrackingState) -> DomainResult<Self> {
        let years = discovery
            .years
            .iter()
            .map(|batch| {
                let items = batch
                    .mangas
                    .iter()
                    .map(|manga| ItemView::candidate(manga, state))
                    .collect::<DomainResult<Vec<_>>>()?;
                Ok(YearItemsDto {
                    year: batch.year,
                    items,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self {
            epoch: discovery.epoch,
            years,
        })
    }
}

// ============================================================================
// TRACKING DTOs
// ============================================================================

/// `{action, titleKey, payload}` as sent by the page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingCommandDto {
    pub action: TrackingAction,
    pub title_key: String,
    #[serde(default)]
    pub payload: CommandPayloadDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandPayloadDto {
    /// Any JSON number; the fractional part is dropped
    pub rating: Option<f64>,
    pub url: Option<String>,
}

impl TryFrom<TrackingCommandDto> for TrackingCommand {
    type Error = crate::domain::DomainError;

    fn try_from(dto: TrackingCommandDto) -> DomainResult<Self> {
        TrackingCommand::parse(
            dto.action,
            &dto.title_key,
            dto.payload.rating.map(|rating| rating.trunc() as i64),
            dto.payload.url.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    #[serde(flatten)]
    pub outcome: CommandOutcome,
    pub state: TrackingView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, YearBatch};
    use crate::services::test_support::manga;
    use serde_json::json;

    #[test]
    fn test_command_dto_without_payload() {
        let dto: TrackingCommandDto =
            serde_json::from_value(json!({ "action": "markCaughtUp", "titleKey": "Kingdom" }))
                .unwrap();

        let command = TrackingCommand::try_from(dto).unwrap();
        assert_eq!(command.action(), TrackingAction::MarkCaughtUp);
        assert_eq!(command.title_key().as_str(), "Kingdom");
    }

    #[test]
    fn test_command_dto_rating_out_of_range() {
        let dto: TrackingCommandDto = serde_json::from_value(json!({
            "action": "setRating",
            "titleKey": "Kingdom",
            "payload": { "rating": 11 }
        }))
        .unwrap();

        assert!(matches!(
            TrackingCommand::try_from(dto),
            Err(DomainError::InvalidRating(11))
        ));
    }

    #[test]
    fn test_command_dto_fractional_rating_truncated() {
        let dto: TrackingCommandDto = serde_json::from_value(json!({
            "action": "setRating",
            "titleKey": "Kingdom",
            "payload": { "rating": 7.5 }
        }))
        .unwrap();

        assert_eq!(
            TrackingCommand::try_from(dto).unwrap(),
            TrackingCommand::SetRating(
                crate::domain::TitleKey::new("Kingdom").unwrap(),
                crate::domain::Rating::new(7).unwrap()
            )
        );
    }

    #[test]
    fn test_command_dto_blank_url() {
        let dto: TrackingCommandDto = serde_json::from_value(json!({
            "action": "setCoverOverride",
            "titleKey": "Kingdom",
            "payload": { "url": "   " }
        }))
        .unwrap();

        assert!(matches!(
            TrackingCommand::try_from(dto),
            Err(DomainError::EmptyCoverUrl)
        ));
    }

    #[test]
    fn test_discovery_dto_shape() {
        let discovery = Discovery {
            epoch: 3,
            years: vec![YearBatch {
                year: 1999,
                mangas: vec![manga(7, "Berserk")],
            }],
        };

        let dto = DiscoveryDto::build(&discovery, &TrackingState::new()).unwrap();
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["epoch"], 3);
        assert_eq!(json["years"][0]["year"], 1999);
        assert_eq!(json["years"][0]["items"][0]["titleKey"], "Berserk");
        assert_eq!(
            json["years"][0]["items"][0]["coverUrl"],
            "https://img.example/7.jpg"
        );
    }

    #[test]
    fn test_command_response_flattens_outcome() {
        let response = CommandResponse {
            outcome: CommandOutcome {
                changed: true,
                persisted: false,
                warning: Some("disk full".to_string()),
            },
            state: TrackingView::of(&TrackingState::new()),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["changed"], true);
        assert_eq!(json["persisted"], false);
        assert_eq!(json["warning"], "disk full");
        assert!(json["state"]["caughtUp"].as_array().unwrap().is_empty());
    }
}
