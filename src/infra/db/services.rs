use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{DocumentStore, RepoError, ServicesRepo, ServicesWriteRepo};
use crate::domain::entities::ServiceRecord;

use super::{PostgresRepositories, map_sqlx_error};

const SERVICE_COLUMNS: &str = "id, page_title, page_subtitle, list_image, summary, main_content, \
    background_image, card_contents, services_title, services_list, why_choose_title, \
    why_choose_points, footer_title, footer_content, slug, active, sort_order, created_at, \
    updated_at";

#[async_trait]
impl DocumentStore<ServiceRecord> for PostgresRepositories {
    async fn load(&self, id: Option<Uuid>) -> Result<Option<ServiceRecord>, RepoError> {
        let Some(id) = id else {
            return Ok(None);
        };
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, ServiceRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn save(&self, document: ServiceRecord) -> Result<ServiceRecord, RepoError> {
        let sql = format!(
            r#"
            INSERT INTO services (
                id, page_title, page_subtitle, list_image, summary, main_content,
                background_image, card_contents, services_title, services_list,
                why_choose_title, why_choose_points, footer_title, footer_content, slug,
                active, sort_order, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19
            )
            ON CONFLICT (id) DO UPDATE SET
                page_title = EXCLUDED.page_title,
                page_subtitle = EXCLUDED.page_subtitle,
                list_image = EXCLUDED.list_image,
                summary = EXCLUDED.summary,
                main_content = EXCLUDED.main_content,
                background_image = EXCLUDED.background_image,
                card_contents = EXCLUDED.card_contents,
                services_title = EXCLUDED.services_title,
                services_list = EXCLUDED.services_list,
                why_choose_title = EXCLUDED.why_choose_title,
                why_choose_points = EXCLUDED.why_choose_points,
                footer_title = EXCLUDED.footer_title,
                footer_content = EXCLUDED.footer_content,
                slug = EXCLUDED.slug,
                active = EXCLUDED.active,
                sort_order = EXCLUDED.sort_order,
                updated_at = EXCLUDED.updated_at
            RETURNING {SERVICE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ServiceRecord>(&sql)
            .bind(document.id)
            .bind(document.page_title)
            .bind(document.page_subtitle)
            .bind(document.list_image)
            .bind(document.summary)
            .bind(document.main_content)
            .bind(document.background_image)
            .bind(document.card_contents)
            .bind(document.services_title)
            .bind(document.services_list)
            .bind(document.why_choose_title)
            .bind(document.why_choose_points)
            .bind(document.footer_title)
            .bind(document.footer_content)
            .bind(document.slug)
            .bind(document.active)
            .bind(document.sort_order)
            .bind(document.created_at)
            .bind(document.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ServicesRepo for PostgresRepositories {
    async fn list_services(&self, active: Option<bool>) -> Result<Vec<ServiceRecord>, RepoError> {
        let sql = format!(
            "SELECT {SERVICE_COLUMNS} FROM services \
             WHERE ($1::BOOLEAN IS NULL OR active = $1) \
             ORDER BY sort_order ASC, page_title ASC"
        );
        sqlx::query_as::<_, ServiceRecord>(&sql)
            .bind(active)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_service_by_slug(&self, slug: &str) -> Result<Option<ServiceRecord>, RepoError> {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE slug = $1");
        sqlx::query_as::<_, ServiceRecord>(&sql)
            .bind(slug)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ServicesWriteRepo for PostgresRepositories {
    async fn delete_service(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
