use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{DocumentStore, RepoError};
use crate::domain::entities::{AboutRecord, HomeRecord};

use super::{PostgresRepositories, map_sqlx_error};

const HOME_COLUMNS: &str = "id, title_hero, content_hero, global_partners, years_experiences, \
    success_rate, about_title, about_content, service_icon, service_service_id, service_title, \
    service_content, service_cards, three_cards, why_choose_title, why_choose_subtitle, \
    why_choose_cards, footer_title, footer_subtitle, created_at, updated_at";

const ABOUT_COLUMNS: &str = "id, background_image, page_title, page_subtitle, story_sections, \
    mission_section_title, mission_section_subtitle, mission_title, mission_content, \
    mission_icon, vision_title, vision_content, vision_icon, brand_archetype_title, \
    brand_archetype, core_values_section_title, core_values_section_subtitle, core_values, \
    timeline_section_title, timeline_section_subtitle, timeline, cta_title, cta_content, active, \
    created_at, updated_at";

/// `SELECT` for a singleton table: `None` picks the only row.
fn singleton_select(table: &str, columns: &str, id: Option<Uuid>) -> String {
    match id {
        Some(_) => format!("SELECT {columns} FROM {table} WHERE id = $1"),
        None => format!("SELECT {columns} FROM {table} LIMIT 1"),
    }
}

#[async_trait]
impl DocumentStore<HomeRecord> for PostgresRepositories {
    async fn load(&self, id: Option<Uuid>) -> Result<Option<HomeRecord>, RepoError> {
        let sql = singleton_select("home", HOME_COLUMNS, id);
        let mut query = sqlx::query_as::<_, HomeRecord>(&sql);
        if let Some(id) = id {
            query = query.bind(id);
        }
        query
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn save(&self, document: HomeRecord) -> Result<HomeRecord, RepoError> {
        let sql = format!(
            r#"
            INSERT INTO home (
                id, title_hero, content_hero, global_partners, years_experiences,
                success_rate, about_title, about_content, service_icon, service_service_id,
                service_title, service_content, service_cards, three_cards, why_choose_title,
                why_choose_subtitle, why_choose_cards, footer_title, footer_subtitle,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21
            )
            ON CONFLICT (id) DO UPDATE SET
                title_hero = EXCLUDED.title_hero,
                content_hero = EXCLUDED.content_hero,
                global_partners = EXCLUDED.global_partners,
                years_experiences = EXCLUDED.years_experiences,
                success_rate = EXCLUDED.success_rate,
                about_title = EXCLUDED.about_title,
                about_content = EXCLUDED.about_content,
                service_icon = EXCLUDED.service_icon,
                service_service_id = EXCLUDED.service_service_id,
                service_title = EXCLUDED.service_title,
                service_content = EXCLUDED.service_content,
                service_cards = EXCLUDED.service_cards,
                three_cards = EXCLUDED.three_cards,
                why_choose_title = EXCLUDED.why_choose_title,
                why_choose_subtitle = EXCLUDED.why_choose_subtitle,
                why_choose_cards = EXCLUDED.why_choose_cards,
                footer_title = EXCLUDED.footer_title,
                footer_subtitle = EXCLUDED.footer_subtitle,
                updated_at = EXCLUDED.updated_at
            RETURNING {HOME_COLUMNS}
            "#
        );

        sqlx::query_as::<_, HomeRecord>(&sql)
            .bind(document.id)
            .bind(document.title_hero)
            .bind(document.content_hero)
            .bind(document.global_partners)
            .bind(document.years_experiences)
            .bind(document.success_rate)
            .bind(document.about_title)
            .bind(document.about_content)
            .bind(document.service_icon)
            .bind(document.service_service_id)
            .bind(document.service_title)
            .bind(document.service_content)
            .bind(document.service_cards)
            .bind(document.three_cards)
            .bind(document.why_choose_title)
            .bind(document.why_choose_subtitle)
            .bind(document.why_choose_cards)
            .bind(document.footer_title)
            .bind(document.footer_subtitle)
            .bind(document.created_at)
            .bind(document.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl DocumentStore<AboutRecord> for PostgresRepositories {
    async fn load(&self, id: Option<Uuid>) -> Result<Option<AboutRecord>, RepoError> {
        let sql = singleton_select("about_page", ABOUT_COLUMNS, id);
        let mut query = sqlx::query_as::<_, AboutRecord>(&sql);
        if let Some(id) = id {
            query = query.bind(id);
        }
        query
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn save(&self, document: AboutRecord) -> Result<AboutRecord, RepoError> {
        let sql = format!(
            r#"
            INSERT INTO about_page (
                id, background_image, page_title, page_subtitle, story_sections,
                mission_section_title, mission_section_subtitle, mission_title,
                mission_content, mission_icon, vision_title, vision_content, vision_icon,
                brand_archetype_title, brand_archetype, core_values_section_title,
                core_values_section_subtitle, core_values, timeline_section_title,
                timeline_section_subtitle, timeline, cta_title, cta_content, active,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26
            )
            ON CONFLICT (id) DO UPDATE SET
                background_image = EXCLUDED.background_image,
                page_title = EXCLUDED.page_title,
                page_subtitle = EXCLUDED.page_subtitle,
                story_sections = EXCLUDED.story_sections,
                mission_section_title = EXCLUDED.mission_section_title,
                mission_section_subtitle = EXCLUDED.mission_section_subtitle,
                mission_title = EXCLUDED.mission_title,
                mission_content = EXCLUDED.mission_content,
                mission_icon = EXCLUDED.mission_icon,
                vision_title = EXCLUDED.vision_title,
                vision_content = EXCLUDED.vision_content,
                vision_icon = EXCLUDED.vision_icon,
                brand_archetype_title = EXCLUDED.brand_archetype_title,
                brand_archetype = EXCLUDED.brand_archetype,
                core_values_section_title = EXCLUDED.core_values_section_title,
                core_values_section_subtitle = EXCLUDED.core_values_section_subtitle,
                core_values = EXCLUDED.core_values,
                timeline_section_title = EXCLUDED.timeline_section_title,
                timeline_section_subtitle = EXCLUDED.timeline_section_subtitle,
                timeline = EXCLUDED.timeline,
                cta_title = EXCLUDED.cta_title,
                cta_content = EXCLUDED.cta_content,
                active = EXCLUDED.active,
                updated_at = EXCLUDED.updated_at
            RETURNING {ABOUT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, AboutRecord>(&sql)
            .bind(document.id)
            .bind(document.background_image)
            .bind(document.page_title)
            .bind(document.page_subtitle)
            .bind(document.story_sections)
            .bind(document.mission_section_title)
            .bind(document.mission_section_subtitle)
            .bind(document.mission_title)
            .bind(document.mission_content)
            .bind(document.mission_icon)
            .bind(document.vision_title)
            .bind(document.vision_content)
            .bind(document.vision_icon)
            .bind(document.brand_archetype_title)
            .bind(document.brand_archetype)
            .bind(document.core_values_section_title)
            .bind(document.core_values_section_subtitle)
            .bind(document.core_values)
            .bind(document.timeline_section_title)
            .bind(document.timeline_section_subtitle)
            .bind(document.timeline)
            .bind(document.cta_title)
            .bind(document.cta_content)
            .bind(document.active)
            .bind(document.created_at)
            .bind(document.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }
}
