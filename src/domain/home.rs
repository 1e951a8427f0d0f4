//! The Home singleton.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    documents::ContentDocument,
    entities::HomeRecord,
    error::MergeError,
    patch::{Field, merge_section},
    references::validate_service_cards,
    sections::{Card, ServiceCard, THREE_CARD_SLOTS, WHY_CHOOSE_SLOTS, decode_or_empty, reconcile},
    types::DocumentKind,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDocument {
    pub id: Uuid,
    pub title_hero: Option<String>,
    pub content_hero: Option<String>,
    pub global_partners: Option<String>,
    pub years_experiences: Option<String>,
    pub success_rate: Option<String>,
    pub about_title: Option<String>,
    pub about_content: Option<String>,
    pub service_icon: Option<String>,
    pub service_service_id: Option<String>,
    pub service_title: Option<String>,
    pub service_content: Option<String>,
    pub service_cards: Vec<ServiceCard>,
    pub three_cards: Vec<Card>,
    pub why_choose_title: Option<String>,
    pub why_choose_subtitle: Option<String>,
    pub why_choose_cards: Vec<Card>,
    pub footer_title: Option<String>,
    pub footer_subtitle: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomePatch {
    pub title_hero: Field<Option<String>>,
    pub content_hero: Field<Option<String>>,
    pub global_partners: Field<Option<String>>,
    pub years_experiences: Field<Option<String>>,
    pub success_rate: Field<Option<String>>,
    pub about_title: Field<Option<String>>,
    pub about_content: Field<Option<String>>,
    pub service_icon: Field<Option<String>>,
    pub service_service_id: Field<Option<String>>,
    pub service_title: Field<Option<String>>,
    pub service_content: Field<Option<String>>,
    pub service_cards: Field<Option<Vec<ServiceCard>>>,
    pub three_cards: Field<Option<Vec<Card>>>,
    pub why_choose_title: Field<Option<String>>,
    pub why_choose_subtitle: Field<Option<String>>,
    pub why_choose_cards: Field<Option<Vec<Card>>>,
    pub footer_title: Field<Option<String>>,
    pub footer_subtitle: Field<Option<String>>,
}

impl HomeRecord {
    pub fn decoded_service_cards(&self) -> Vec<ServiceCard> {
        decode_or_empty("serviceCards", self.service_cards.as_deref())
    }
}

impl ContentDocument for HomeRecord {
    type Patch = HomePatch;
    type View = HomeDocument;

    const KIND: DocumentKind = DocumentKind::Home;

    fn id(&self) -> Uuid {
        self.id
    }

    fn initial(id: Uuid, now: OffsetDateTime) -> Option<Self> {
        Some(Self {
            id,
            title_hero: None,
            content_hero: None,
            global_partners: None,
            years_experiences: None,
            success_rate: None,
            about_title: None,
            about_content: None,
            service_icon: None,
            service_service_id: None,
            service_title: None,
            service_content: None,
            service_cards: None,
            three_cards: None,
            why_choose_title: None,
            why_choose_subtitle: None,
            why_choose_cards: None,
            footer_title: None,
            footer_subtitle: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn merge(mut self, patch: HomePatch) -> Result<Self, MergeError> {
        if let Some(Some(cards)) = patch.service_cards.as_present() {
            validate_service_cards(cards)?;
        }

        let HomePatch {
            title_hero,
            content_hero,
            global_partners,
            years_experiences,
            success_rate,
            about_title,
            about_content,
            service_icon,
            service_service_id,
            service_title,
            service_content,
            service_cards,
            three_cards,
            why_choose_title,
            why_choose_subtitle,
            why_choose_cards,
            footer_title,
            footer_subtitle,
        } = patch;

        title_hero.merge_into(&mut self.title_hero);
        content_hero.merge_into(&mut self.content_hero);
        global_partners.merge_into(&mut self.global_partners);
        years_experiences.merge_into(&mut self.years_experiences);
        success_rate.merge_into(&mut self.success_rate);
        about_title.merge_into(&mut self.about_title);
        about_content.merge_into(&mut self.about_content);
        service_icon.merge_into(&mut self.service_icon);
        service_service_id.merge_into(&mut self.service_service_id);
        service_title.merge_into(&mut self.service_title);
        service_content.merge_into(&mut self.service_content);
        why_choose_title.merge_into(&mut self.why_choose_title);
        why_choose_subtitle.merge_into(&mut self.why_choose_subtitle);
        footer_title.merge_into(&mut self.footer_title);
        footer_subtitle.merge_into(&mut self.footer_subtitle);

        merge_section(service_cards, None, &mut self.service_cards)?;
        merge_section(three_cards, Some(THREE_CARD_SLOTS), &mut self.three_cards)?;
        merge_section(
            why_choose_cards,
            Some(WHY_CHOOSE_SLOTS),
            &mut self.why_choose_cards,
        )?;

        Ok(self)
    }

    fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }

    fn view(&self) -> HomeDocument {
        HomeDocument {
            id: self.id,
            title_hero: self.title_hero.clone(),
            content_hero: self.content_hero.clone(),
            global_partners: self.global_partners.clone(),
            years_experiences: self.years_experiences.clone(),
            success_rate: self.success_rate.clone(),
            about_title: self.about_title.clone(),
            about_content: self.about_content.clone(),
            service_icon: self.service_icon.clone(),
            service_service_id: self.service_service_id.clone(),
            service_title: self.service_title.clone(),
            service_content: self.service_content.clone(),
            service_cards: self.decoded_service_cards(),
            three_cards: reconcile(
                decode_or_empty("threeCards", self.three_cards.as_deref()),
                THREE_CARD_SLOTS,
            ),
            why_choose_title: self.why_choose_title.clone(),
            why_choose_subtitle: self.why_choose_subtitle.clone(),
            why_choose_cards: reconcile(
                decode_or_empty("whyChooseCards", self.why_choose_cards.as_deref()),
                WHY_CHOOSE_SLOTS,
            ),
            footer_title: self.footer_title.clone(),
            footer_subtitle: self.footer_subtitle.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::references::DuplicateReferenceError;

    fn record() -> HomeRecord {
        let mut record =
            HomeRecord::initial(Uuid::new_v4(), OffsetDateTime::now_utc()).expect("home default");
        record.title_hero = Some("Welcome".to_string());
        record.three_cards =
            Some(r#"[{"cardIcon":"a","cardTitle":"A","cardContent":"x"}]"#.to_string());
        record
    }

    fn patch(json: &str) -> HomePatch {
        serde_json::from_str(json).expect("valid patch")
    }

    #[test]
    fn empty_patch_is_identity() {
        let current = record();
        let merged = current.clone().merge(HomePatch::default()).expect("merge");
        assert_eq!(merged, current);
    }

    #[test]
    fn present_scalar_replaces_and_null_clears() {
        let merged = record()
            .merge(patch(r#"{"footerTitle": "Contact", "titleHero": null}"#))
            .expect("merge");

        assert_eq!(merged.footer_title.as_deref(), Some("Contact"));
        assert_eq!(merged.title_hero, None);
        assert!(merged.three_cards.is_some());
    }

    #[test]
    fn untouched_corrupt_section_survives_a_write() {
        let mut current = record();
        current.why_choose_cards = Some("[{broken".to_string());

        let merged = current
            .merge(patch(r#"{"aboutTitle": "Who we are"}"#))
            .expect("merge");

        assert_eq!(merged.why_choose_cards.as_deref(), Some("[{broken"));
        assert_eq!(merged.view().why_choose_cards.len(), WHY_CHOOSE_SLOTS);
    }

    #[test]
    fn fixed_slot_sections_are_reconciled_on_write() {
        let merged = record()
            .merge(patch(
                r#"{"threeCards": [{"cardTitle":"1"},{"cardTitle":"2"},{"cardTitle":"3"},{"cardTitle":"4"},{"cardTitle":"5"}]}"#,
            ))
            .expect("merge");

        let stored: Vec<Card> =
            serde_json::from_str(merged.three_cards.as_deref().expect("stored")).expect("json");
        let titles: Vec<&str> = stored.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(titles, ["1", "2", "3"]);
    }

    #[test]
    fn fixed_slot_sections_are_reconciled_on_read() {
        let mut current = record();
        current.why_choose_cards = Some(r#"[{"cardTitle":"only"}]"#.to_string());

        let view = current.view();
        assert_eq!(view.three_cards.len(), THREE_CARD_SLOTS);
        assert_eq!(view.why_choose_cards.len(), WHY_CHOOSE_SLOTS);
        assert_eq!(view.why_choose_cards[0].title, "only");
        assert_eq!(view.why_choose_cards[3], Card::default());
    }

    #[test]
    fn duplicate_service_selection_rejects_the_whole_patch() {
        let err = record()
            .merge(patch(
                r#"{"titleHero": "ignored", "serviceCards": [{"selectedService":"s1"},{"selectedService":"s1"}]}"#,
            ))
            .expect_err("duplicate");

        match err {
            MergeError::DuplicateReference(DuplicateReferenceError {
                service_id,
                first,
                second,
            }) => {
                assert_eq!(service_id, "s1");
                assert_eq!((first, second), (0, 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_service_card_list_is_stored_as_brackets() {
        let merged = record()
            .merge(patch(r#"{"serviceCards": []}"#))
            .expect("merge");
        assert_eq!(merged.service_cards.as_deref(), Some("[]"));
    }
}
