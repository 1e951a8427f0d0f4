//! The About singleton.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    documents::ContentDocument,
    entities::AboutRecord,
    error::MergeError,
    patch::{Field, merge_section},
    sections::{CoreValue, StorySection, TimelineItem, decode_or_empty},
    types::DocumentKind,
};

pub const DEFAULT_PAGE_TITLE: &str = "About Us";
pub const DEFAULT_PAGE_SUBTITLE: &str =
    "Your trusted partner in bridging global business with Japan's dynamic market.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutDocument {
    pub id: Uuid,
    pub background_image: Option<String>,
    pub page_title: Option<String>,
    pub page_subtitle: Option<String>,
    pub story_sections: Vec<StorySection>,
    pub mission_section_title: Option<String>,
    pub mission_section_subtitle: Option<String>,
    pub mission_title: Option<String>,
    pub mission_content: Option<String>,
    pub mission_icon: Option<String>,
    pub vision_title: Option<String>,
    pub vision_content: Option<String>,
    pub vision_icon: Option<String>,
    pub brand_archetype_title: Option<String>,
    pub brand_archetype: Option<String>,
    pub core_values_section_title: Option<String>,
    pub core_values_section_subtitle: Option<String>,
    pub core_values: Vec<CoreValue>,
    pub timeline_section_title: Option<String>,
    pub timeline_section_subtitle: Option<String>,
    pub timeline: Vec<TimelineItem>,
    pub cta_title: Option<String>,
    pub cta_content: Option<String>,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutPatch {
    pub background_image: Field<Option<String>>,
    pub page_title: Field<Option<String>>,
    pub page_subtitle: Field<Option<String>>,
    pub story_sections: Field<Option<Vec<StorySection>>>,
    pub mission_section_title: Field<Option<String>>,
    pub mission_section_subtitle: Field<Option<String>>,
    pub mission_title: Field<Option<String>>,
    pub mission_content: Field<Option<String>>,
    pub mission_icon: Field<Option<String>>,
    pub vision_title: Field<Option<String>>,
    pub vision_content: Field<Option<String>>,
    pub vision_icon: Field<Option<String>>,
    pub brand_archetype_title: Field<Option<String>>,
    pub brand_archetype: Field<Option<String>>,
    pub core_values_section_title: Field<Option<String>>,
    pub core_values_section_subtitle: Field<Option<String>>,
    pub core_values: Field<Option<Vec<CoreValue>>>,
    pub timeline_section_title: Field<Option<String>>,
    pub timeline_section_subtitle: Field<Option<String>>,
    pub timeline: Field<Option<Vec<TimelineItem>>>,
    pub cta_title: Field<Option<String>>,
    pub cta_content: Field<Option<String>>,
    pub active: Field<bool>,
}

impl ContentDocument for AboutRecord {
    type Patch = AboutPatch;
    type View = AboutDocument;

    const KIND: DocumentKind = DocumentKind::About;

    fn id(&self) -> Uuid {
        self.id
    }

    fn initial(id: Uuid, now: OffsetDateTime) -> Option<Self> {
        Some(Self {
            id,
            background_image: None,
            page_title: Some(DEFAULT_PAGE_TITLE.to_string()),
            page_subtitle: Some(DEFAULT_PAGE_SUBTITLE.to_string()),
            story_sections: None,
            mission_section_title: None,
            mission_section_subtitle: None,
            mission_title: None,
            mission_content: None,
            mission_icon: None,
            vision_title: None,
            vision_content: None,
            vision_icon: None,
            brand_archetype_title: None,
            brand_archetype: None,
            core_values_section_title: None,
            core_values_section_subtitle: None,
            core_values: None,
            timeline_section_title: None,
            timeline_section_subtitle: None,
            timeline: None,
            cta_title: None,
            cta_content: None,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    fn merge(mut self, patch: AboutPatch) -> Result<Self, MergeError> {
        let AboutPatch {
            background_image,
            page_title,
            page_subtitle,
            story_sections,
            mission_section_title,
            mission_section_subtitle,
            mission_title,
            mission_content,
            mission_icon,
            vision_title,
            vision_content,
            vision_icon,
            brand_archetype_title,
            brand_archetype,
            core_values_section_title,
            core_values_section_subtitle,
            core_values,
            timeline_section_title,
            timeline_section_subtitle,
            timeline,
            cta_title,
            cta_content,
            active,
        } = patch;

        background_image.merge_into(&mut self.background_image);
        page_title.merge_into(&mut self.page_title);
        page_subtitle.merge_into(&mut self.page_subtitle);
        mission_section_title.merge_into(&mut self.mission_section_title);
        mission_section_subtitle.merge_into(&mut self.mission_section_subtitle);
        mission_title.merge_into(&mut self.mission_title);
        mission_content.merge_into(&mut self.mission_content);
        mission_icon.merge_into(&mut self.mission_icon);
        vision_title.merge_into(&mut self.vision_title);
        vision_content.merge_into(&mut self.vision_content);
        vision_icon.merge_into(&mut self.vision_icon);
        brand_archetype_title.merge_into(&mut self.brand_archetype_title);
        brand_archetype.merge_into(&mut self.brand_archetype);
        core_values_section_title.merge_into(&mut self.core_values_section_title);
        core_values_section_subtitle.merge_into(&mut self.core_values_section_subtitle);
        timeline_section_title.merge_into(&mut self.timeline_section_title);
        timeline_section_subtitle.merge_into(&mut self.timeline_section_subtitle);
        cta_title.merge_into(&mut self.cta_title);
        cta_content.merge_into(&mut self.cta_content);
        active.merge_into(&mut self.active);

        merge_section(story_sections, None, &mut self.story_sections)?;
        merge_section(core_values, None, &mut self.core_values)?;
        merge_section(timeline, None, &mut self.timeline)?;

        Ok(self)
    }

    fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }

    fn view(&self) -> AboutDocument {
        AboutDocument {
            id: self.id,
            background_image: self.background_image.clone(),
            page_title: self.page_title.clone(),
            page_subtitle: self.page_subtitle.clone(),
            story_sections: decode_or_empty("storySections", self.story_sections.as_deref()),
            mission_section_title: self.mission_section_title.clone(),
            mission_section_subtitle: self.mission_section_subtitle.clone(),
            mission_title: self.mission_title.clone(),
            mission_content: self.mission_content.clone(),
            mission_icon: self.mission_icon.clone(),
            vision_title: self.vision_title.clone(),
            vision_content: self.vision_content.clone(),
            vision_icon: self.vision_icon.clone(),
            brand_archetype_title: self.brand_archetype_title.clone(),
            brand_archetype: self.brand_archetype.clone(),
            core_values_section_title: self.core_values_section_title.clone(),
            core_values_section_subtitle: self.core_values_section_subtitle.clone(),
            core_values: decode_or_empty("coreValues", self.core_values.as_deref()),
            timeline_section_title: self.timeline_section_title.clone(),
            timeline_section_subtitle: self.timeline_section_subtitle.clone(),
            timeline: decode_or_empty("timeline", self.timeline.as_deref()),
            cta_title: self.cta_title.clone(),
            cta_content: self.cta_content.clone(),
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AboutRecord {
        AboutRecord::initial(Uuid::new_v4(), OffsetDateTime::now_utc()).expect("about default")
    }

    #[test]
    fn default_row_carries_title_subtitle_and_is_active() {
        let view = record().view();
        assert_eq!(view.page_title.as_deref(), Some(DEFAULT_PAGE_TITLE));
        assert_eq!(view.page_subtitle.as_deref(), Some(DEFAULT_PAGE_SUBTITLE));
        assert!(view.active);
        assert!(view.timeline.is_empty());
    }

    #[test]
    fn timeline_patch_leaves_other_sections_untouched() {
        let mut current = record();
        current.core_values = Some(r#"[{"title":"Trust","description":"d","icon":"i"}]"#.to_string());
        let before = current.core_values.clone();

        let patch: AboutPatch =
            serde_json::from_str(r#"{"timeline": [{"year": "2019", "title": "Founded"}]}"#)
                .expect("patch");
        let merged = current.merge(patch).expect("merge");

        assert_eq!(merged.core_values, before);
        let view = merged.view();
        assert_eq!(view.timeline.len(), 1);
        assert_eq!(view.timeline[0].year, "2019");
        assert_eq!(view.timeline[0].description, "");
    }

    #[test]
    fn active_flag_is_patchable() {
        let patch: AboutPatch = serde_json::from_str(r#"{"active": false}"#).expect("patch");
        assert!(!record().merge(patch).expect("merge").active);
    }
}
