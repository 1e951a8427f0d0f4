//! Adapter tests against a live Postgres. Run with
//! `DATABASE_URL=postgres://… cargo test -- --ignored`.

use std::sync::Arc;

use sqlx::PgPool;
use time::{OffsetDateTime, macros::datetime};
use uuid::Uuid;

use brochure::application::categories::Categorizer;
use brochure::application::documents::DocumentService;
use brochure::application::pagination::PageRequest;
use brochure::application::repos::{
    CategoriesRepo, CategoriesWriteRepo, CreateCategoryParams, DocumentStore, PostQueryFilter,
    PostsRepo, PostsWriteRepo, RepoError, ServicesRepo,
};
use brochure::domain::{
    about::AboutPatch,
    documents::ContentDocument,
    entities::{AboutRecord, HomeRecord, PostRecord, ServiceRecord},
    services::NewService,
};
use brochure::infra::db::PostgresRepositories;

fn repos(pool: PgPool) -> Arc<PostgresRepositories> {
    Arc::new(PostgresRepositories::new(pool))
}

fn draft_post(title: &str, slug: &str) -> PostRecord {
    let now = OffsetDateTime::now_utc();
    PostRecord {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: slug.to_string(),
        content: None,
        excerpt: None,
        featured_image: None,
        published: false,
        published_at: None,
        category_id: None,
        created_at: now,
        updated_at: now,
    }
}

#[ignore = "requires a Postgres DATABASE_URL"]
#[sqlx::test(migrations = "./migrations")]
async fn singleton_rejects_a_second_row(pool: PgPool) {
    let repos = repos(pool);
    let now = OffsetDateTime::now_utc();

    let first = HomeRecord::initial(Uuid::new_v4(), now).expect("home");
    DocumentStore::<HomeRecord>::save(repos.as_ref(), first.clone())
        .await
        .expect("first row");

    let second = HomeRecord::initial(Uuid::new_v4(), now).expect("home");
    let err = DocumentStore::<HomeRecord>::save(repos.as_ref(), second)
        .await
        .expect_err("second row");
    assert!(matches!(err, RepoError::Duplicate { .. }));

    let loaded = DocumentStore::<HomeRecord>::load(repos.as_ref(), None)
        .await
        .expect("load")
        .expect("row");
    assert_eq!(loaded.id, first.id);
}

#[ignore = "requires a Postgres DATABASE_URL"]
#[sqlx::test(migrations = "./migrations")]
async fn about_update_rewrites_the_stored_row(pool: PgPool) {
    let service = DocumentService::<AboutRecord>::new(repos(pool));

    let patch: AboutPatch =
        serde_json::from_str(r#"{"timeline": [{"year": "2010", "title": "Founded"}]}"#)
            .expect("patch");
    let updated = service.update(None, patch).await.expect("update");
    let reloaded = service.load(None).await.expect("load");

    assert_eq!(updated.timeline, reloaded.timeline);
    assert_eq!(reloaded.timeline[0].year, "2010");
}

#[ignore = "requires a Postgres DATABASE_URL"]
#[sqlx::test(migrations = "./migrations")]
async fn services_list_in_display_order(pool: PgPool) {
    let repos = repos(pool);
    let now = OffsetDateTime::now_utc();
    for (title, order, active) in [("B", 1, true), ("A", 1, true), ("C", 0, false)] {
        let record: ServiceRecord = NewService {
            page_title: title.to_string(),
            main_content: "x".to_string(),
            order: Some(order),
            active: Some(active),
            ..NewService::default()
        }
        .into_record(Uuid::new_v4(), title.to_lowercase(), now)
        .expect("record");
        DocumentStore::<ServiceRecord>::save(repos.as_ref(), record)
            .await
            .expect("save");
    }

    let all: Vec<String> = repos
        .list_services(None)
        .await
        .expect("list")
        .into_iter()
        .map(|service| service.page_title)
        .collect();
    assert_eq!(all, ["C", "A", "B"]);

    let active = repos.list_services(Some(true)).await.expect("list");
    assert_eq!(active.len(), 2);
}

#[ignore = "requires a Postgres DATABASE_URL"]
#[sqlx::test(migrations = "./migrations")]
async fn category_slug_conflict_reports_duplicate(pool: PgPool) {
    let repos = repos(pool);
    let params = CreateCategoryParams {
        name: "2024-03".to_string(),
        slug: "2024-03".to_string(),
        description: None,
    };

    repos.create_category(params.clone()).await.expect("first");
    let err = repos.create_category(params).await.expect_err("second");
    assert!(matches!(err, RepoError::Duplicate { .. }));
}

#[ignore = "requires a Postgres DATABASE_URL"]
#[sqlx::test(migrations = "./migrations")]
async fn concurrent_categorization_converges(pool: PgPool) {
    let repos = repos(pool);
    let instant = datetime!(2025-01-20 09:30 UTC);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let categorizer = Categorizer::new(repos.clone(), repos.clone());
            tokio::spawn(async move { categorizer.categorize(instant).await })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.expect("join").expect("bucket"));
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(repos.list_categories().await.expect("list").len(), 1);
}

#[ignore = "requires a Postgres DATABASE_URL"]
#[sqlx::test(migrations = "./migrations")]
async fn posts_filter_and_enforce_publication_consistency(pool: PgPool) {
    let repos = repos(pool);
    let draft = draft_post("Draft", "draft");
    repos.create_post(draft.clone()).await.expect("draft");

    let mut broken = draft_post("Broken", "broken");
    broken.published = true;
    let err = repos.create_post(broken).await.expect_err("inconsistent");
    assert!(matches!(err, RepoError::Integrity { .. }));

    let err = repos
        .create_post(draft_post("Again", "draft"))
        .await
        .expect_err("slug taken");
    assert!(matches!(err, RepoError::Duplicate { .. }));

    let filter = PostQueryFilter {
        published: Some(false),
        category_id: None,
    };
    let drafts = repos
        .list_posts(&filter, PageRequest::default())
        .await
        .expect("list");
    assert_eq!(drafts.len(), 1);
    assert_eq!(repos.count_posts(&filter).await.expect("count"), 1);

    repos.delete_post(draft.id).await.expect("delete");
    assert!(matches!(
        repos.delete_post(draft.id).await,
        Err(RepoError::NotFound)
    ));
}
