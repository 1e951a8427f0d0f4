//! Section elements and the codec that moves them in and out of text columns.
//!
//! A section is an ordered list of one element type, persisted as JSON array
//! text. Decoding is lossy on corruption: a column that cannot be parsed is
//! served as an empty list and reported through [`DecodeDegradation`], so one
//! damaged section never fails a read or affects its siblings.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

/// Display slots in the Home `threeCards` section.
pub const THREE_CARD_SLOTS: usize = 3;
/// Display slots in the Home `whyChooseCards` section.
pub const WHY_CHOOSE_SLOTS: usize = 4;

/// An element type that can live inside a section column.
pub trait SectionElement:
    Serialize + DeserializeOwned + Clone + Default + PartialEq + Send + Sync + 'static
{
    /// Name used in logs and error reports.
    const ELEMENT: &'static str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    #[serde(rename = "cardIcon")]
    pub icon: String,
    #[serde(rename = "cardTitle")]
    pub title: String,
    #[serde(rename = "cardContent")]
    pub content: String,
}

/// Home card pointing at a service by id. An empty `selected_service` means
/// the card has no selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceCard {
    #[serde(rename = "cardIcon")]
    pub icon: String,
    pub selected_service: String,
    pub content: String,
}

impl ServiceCard {
    /// The referenced service id, if the card carries one.
    pub fn selected_service_id(&self) -> Option<&str> {
        let trimmed = self.selected_service.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineItem {
    pub year: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorySection {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreValue {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardContent {
    pub header: String,
    pub content: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceItem {
    pub title: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WhyChoosePoint {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub sub_points: Vec<String>,
}

macro_rules! section_elements {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(impl SectionElement for $ty {
            const ELEMENT: &'static str = $name;
        })+
    };
}

section_elements! {
    Card => "card",
    ServiceCard => "service_card",
    TimelineItem => "timeline_item",
    StorySection => "story_section",
    CoreValue => "core_value",
    CardContent => "card_content",
    ServiceItem => "service_item",
    WhyChoosePoint => "why_choose_point",
}

/// Stored section text that could not be decoded into its element type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stored `{element}` section is not a valid element list: {reason}")]
pub struct DecodeDegradation {
    pub element: &'static str,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum SectionError {
    #[error("failed to encode `{element}` section: {source}")]
    Encode {
        element: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Encodes a section for storage. `None` stays NULL; an empty list is `[]`.
pub fn encode_section<T: SectionElement>(
    items: Option<&[T]>,
) -> Result<Option<String>, SectionError> {
    items
        .map(|items| {
            serde_json::to_string(items).map_err(|source| SectionError::Encode {
                element: T::ELEMENT,
                source,
            })
        })
        .transpose()
}

/// Decodes stored section text. Missing, blank and `null` text are the empty
/// section.
pub fn decode_section<T: SectionElement>(stored: Option<&str>) -> Result<Vec<T>, DecodeDegradation> {
    let Some(text) = stored
        .map(str::trim)
        .filter(|text| !text.is_empty() && *text != "null")
    else {
        return Ok(Vec::new());
    };

    serde_json::from_str(text).map_err(|err| DecodeDegradation {
        element: T::ELEMENT,
        reason: err.to_string(),
    })
}

/// Read-path decode: degraded sections are logged, counted and served empty.
pub fn decode_or_empty<T: SectionElement>(field: &'static str, stored: Option<&str>) -> Vec<T> {
    match decode_section(stored) {
        Ok(items) => items,
        Err(degradation) => {
            warn!(
                target = "brochure::domain::sections",
                field,
                element = degradation.element,
                reason = %degradation.reason,
                "section could not be decoded; serving it empty"
            );
            metrics::counter!("brochure_section_decode_degraded_total", "field" => field)
                .increment(1);
            Vec::new()
        }
    }
}

/// Forces a section to exactly `slots` elements, padding with zero values.
pub fn reconcile<T: Clone + Default>(items: Vec<T>, slots: usize) -> Vec<T> {
    reconcile_with(items, slots, T::default())
}

pub fn reconcile_with<T: Clone>(mut items: Vec<T>, slots: usize, zero: T) -> Vec<T> {
    items.truncate(slots);
    items.resize(slots, zero);
    items
}
