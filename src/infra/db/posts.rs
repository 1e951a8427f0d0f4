use async_trait::async_trait;
use sqlx::QueryBuilder;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::application::repos::{PostQueryFilter, PostsRepo, PostsWriteRepo, RepoError};
use crate::domain::entities::PostRecord;

use super::{PostgresRepositories, map_sqlx_error};

const POST_COLUMNS: &str = "id, title, slug, content, excerpt, featured_image, published, \
    published_at, category_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    slug: String,
    content: Option<String>,
    excerpt: Option<String>,
    featured_image: Option<String>,
    published: bool,
    published_at: Option<OffsetDateTime>,
    category_id: Option<Uuid>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            excerpt: row.excerpt,
            featured_image: row.featured_image,
            published: row.published,
            published_at: row.published_at,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_posts(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(POST_COLUMNS);
        qb.push(" FROM posts p WHERE 1=1 ");
        Self::apply_post_filter(&mut qb, filter);
        qb.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ");
        qb.push_bind(i64::from(page.limit));
        qb.push(" OFFSET ");
        qb.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows = qb
            .build_query_as::<PostRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn count_posts(&self, filter: &PostQueryFilter) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM posts p WHERE 1=1 ");
        Self::apply_post_filter(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Self::convert_count(count)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, post: PostRecord) -> Result<PostRecord, RepoError> {
        let sql = format!(
            r#"
            INSERT INTO posts (
                id, title, slug, content, excerpt, featured_image, published,
                published_at, category_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post.id)
            .bind(post.title)
            .bind(post.slug)
            .bind(post.content)
            .bind(post.excerpt)
            .bind(post.featured_image)
            .bind(post.published)
            .bind(post.published_at)
            .bind(post.category_id)
            .bind(post.created_at)
            .bind(post.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn update_post(&self, post: PostRecord) -> Result<PostRecord, RepoError> {
        let sql = format!(
            r#"
            UPDATE posts
            SET title = $2,
                slug = $3,
                content = $4,
                excerpt = $5,
                featured_image = $6,
                published = $7,
                published_at = $8,
                category_id = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post.id)
            .bind(post.title)
            .bind(post.slug)
            .bind(post.content)
            .bind(post.excerpt)
            .bind(post.featured_image)
            .bind(post.published)
            .bind(post.published_at)
            .bind(post.category_id)
            .bind(post.updated_at)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(PostRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
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
