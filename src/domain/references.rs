//! Soft references from Home service cards into the service catalog.
//!
//! A card's `selectedService` is a plain id with no foreign key behind it.
//! Within one Home document each id may be selected at most once; whether the
//! id still names a live service is not checked here, and stale ids are
//! tolerated on read.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::{entities::ServiceRecord, sections::ServiceCard};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("service `{service_id}` is selected by both card {first} and card {second}")]
pub struct DuplicateReferenceError {
    pub service_id: String,
    pub first: usize,
    pub second: usize,
}

/// A card whose selection no longer matches an active service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaleReference {
    pub position: usize,
    pub service_id: String,
}

/// Rejects a card list in which two cards select the same service. Positions
/// are zero-based; the first repeat found wins.
pub fn validate_service_cards(cards: &[ServiceCard]) -> Result<(), DuplicateReferenceError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (position, card) in cards.iter().enumerate() {
        let Some(service_id) = card.selected_service_id() else {
            continue;
        };
        if let Some(&first) = seen.get(service_id) {
            return Err(DuplicateReferenceError {
                service_id: service_id.to_string(),
                first,
                second: position,
            });
        }
        seen.insert(service_id, position);
    }

    Ok(())
}

/// Active services the card at `editing` may still select: everything not
/// already taken by another card. Selections of unknown services do not
/// hide anything.
pub fn available_services<'a>(
    services: &'a [ServiceRecord],
    cards: &[ServiceCard],
    editing: Option<usize>,
) -> Vec<&'a ServiceRecord> {
    let taken: Vec<&str> = cards
        .iter()
        .enumerate()
        .filter(|(position, _)| Some(*position) != editing)
        .filter_map(|(_, card)| card.selected_service_id())
        .collect();

    services
        .iter()
        .filter(|service| service.active)
        .filter(|service| {
            let id = service.id.to_string();
            !taken.contains(&id.as_str())
        })
        .collect()
}

pub fn stale_references(services: &[ServiceRecord], cards: &[ServiceCard]) -> Vec<StaleReference> {
    cards
        .iter()
        .enumerate()
        .filter_map(|(position, card)| {
            let service_id = card.selected_service_id()?;
            let live = services
                .iter()
                .any(|service| service.active && service.id.to_string() == service_id);
            (!live).then(|| StaleReference {
                position,
                service_id: service_id.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn card(selected: &str) -> ServiceCard {
        ServiceCard {
            selected_service: selected.to_string(),
            ..ServiceCard::default()
        }
    }

    fn service(title: &str, active: bool) -> ServiceRecord {
        let now = OffsetDateTime::now_utc();
        ServiceRecord {
            id: Uuid::new_v4(),
            page_title: title.to_string(),
            page_subtitle: None,
            list_image: None,
            summary: None,
            main_content: "body".to_string(),
            background_image: None,
            card_contents: None,
            services_title: None,
            services_list: None,
            why_choose_title: None,
            why_choose_points: None,
            footer_title: None,
            footer_content: None,
            slug: title.to_lowercase(),
            active,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn distinct_and_empty_selections_are_accepted() {
        let cards = vec![card("a"), card(""), card("b"), card("")];
        assert!(validate_service_cards(&cards).is_ok());
    }

    #[test]
    fn repeated_selection_reports_both_positions() {
        let cards = vec![card("a"), card("b"), card("a")];
        let err = validate_service_cards(&cards).expect_err("duplicate");

        assert_eq!(
            err,
            DuplicateReferenceError {
                service_id: "a".to_string(),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn unknown_ids_are_not_checked() {
        let cards = vec![card("deleted-service")];
        assert!(validate_service_cards(&cards).is_ok());
    }

    #[test]
    fn available_services_exclude_other_cards_selections() {
        let first = service("Consulting", true);
        let second = service("Market Entry", true);
        let retired = service("Retired", false);
        let services = vec![first.clone(), second.clone(), retired];
        let cards = vec![card(&first.id.to_string()), card(&second.id.to_string())];

        let for_first: Vec<Uuid> = available_services(&services, &cards, Some(0))
            .into_iter()
            .map(|service| service.id)
            .collect();
        assert_eq!(for_first, vec![first.id]);

        let for_new_card = available_services(&services, &cards, None);
        assert!(for_new_card.is_empty());
    }

    #[test]
    fn stale_selection_does_not_block_anything() {
        let live = service("Consulting", true);
        let services = vec![live.clone()];
        let cards = vec![card("gone"), card("")];

        let available = available_services(&services, &cards, None);
        assert_eq!(available.len(), 1);

        assert_eq!(
            stale_references(&services, &cards),
            vec![StaleReference {
                position: 0,
                service_id: "gone".to_string(),
            }]
        );
    }
}
