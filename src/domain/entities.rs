//! Stored rows. Section columns keep their raw JSON text so that a record can
//! be rewritten without re-encoding sections nobody touched.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct HomeRecord {
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
    pub service_cards: Option<String>,
    pub three_cards: Option<String>,
    pub why_choose_title: Option<String>,
    pub why_choose_subtitle: Option<String>,
    pub why_choose_cards: Option<String>,
    pub footer_title: Option<String>,
    pub footer_subtitle: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AboutRecord {
    pub id: Uuid,
    pub background_image: Option<String>,
    pub page_title: Option<String>,
    pub page_subtitle: Option<String>,
    pub story_sections: Option<String>,
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
    pub core_values: Option<String>,
    pub timeline_section_title: Option<String>,
    pub timeline_section_subtitle: Option<String>,
    pub timeline: Option<String>,
    pub cta_title: Option<String>,
    pub cta_content: Option<String>,
    pub active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub page_title: String,
    pub page_subtitle: Option<String>,
    pub list_image: Option<String>,
    pub summary: Option<String>,
    pub main_content: String,
    pub background_image: Option<String>,
    pub card_contents: Option<String>,
    pub services_title: Option<String>,
    pub services_list: Option<String>,
    pub why_choose_title: Option<String>,
    pub why_choose_points: Option<String>,
    pub footer_title: Option<String>,
    pub footer_content: Option<String>,
    pub slug: String,
    pub active: bool,
    pub sort_order: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    pub category_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
