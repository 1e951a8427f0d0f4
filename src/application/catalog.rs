use std::sync::Arc;

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::application::documents::{DocumentError, DocumentService};
use crate::application::repos::{RepoError, ServicesRepo, ServicesWriteRepo};
use crate::domain::{
    documents::ContentDocument,
    entities::ServiceRecord,
    services::{NewService, ServiceDocument, ServicePatch},
    slug::{SlugError, UniqueSlugError, unique_slug},
    types::DocumentKind,
};

/// The service pages collection.
#[derive(Clone)]
pub struct ServiceCatalogService {
    documents: DocumentService<ServiceRecord>,
    reader: Arc<dyn ServicesRepo>,
    writer: Arc<dyn ServicesWriteRepo>,
}

impl ServiceCatalogService {
    pub fn new(
        documents: DocumentService<ServiceRecord>,
        reader: Arc<dyn ServicesRepo>,
        writer: Arc<dyn ServicesWriteRepo>,
    ) -> Self {
        Self {
            documents,
            reader,
            writer,
        }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<ServiceDocument>, DocumentError> {
        let services = self.reader.list_services(active).await?;
        Ok(services.iter().map(ContentDocument::view).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ServiceDocument, DocumentError> {
        self.documents.load(Some(id)).await
    }

    pub async fn create(&self, command: NewService) -> Result<ServiceDocument, DocumentError> {
        let slug = match command.requested_slug() {
            Some(slug) => slug.to_string(),
            None => self.free_slug(&command.page_title).await?,
        };
        let record = command.into_record(Uuid::new_v4(), slug, OffsetDateTime::now_utc())?;
        self.documents.create(record).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: ServicePatch,
    ) -> Result<ServiceDocument, DocumentError> {
        self.documents.update(Some(id), patch).await
    }

    /// Deleting a service leaves Home cards that selected it as stale
    /// references.
    pub async fn delete(&self, id: Uuid) -> Result<(), DocumentError> {
        match self.writer.delete_service(id).await {
            Ok(()) => {
                info!(
                    target = "brochure::application::catalog",
                    service = %id,
                    "service deleted"
                );
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DocumentError::NotFound {
                kind: DocumentKind::Service,
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn free_slug(&self, title: &str) -> Result<String, DocumentError> {
        let reader = self.reader.clone();
        let result = unique_slug(title, move |candidate| {
            let reader = reader.clone();
            let candidate = candidate.to_string();
            async move {
                reader
                    .find_service_by_slug(&candidate)
                    .await
                    .map(|existing| existing.is_none())
            }
        })
        .await;

        match result {
            Ok(slug) => Ok(slug),
            Err(UniqueSlugError::Slug(SlugError::EmptyInput)) => {
                Err(DocumentError::ConstraintViolation("pageTitle"))
            }
            Err(UniqueSlugError::Slug(_)) => Err(DocumentError::ConstraintViolation("slug")),
            Err(UniqueSlugError::Lookup(err)) => Err(DocumentError::Repo(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryRepositories;

    fn catalog(repos: &Arc<InMemoryRepositories>) -> ServiceCatalogService {
        ServiceCatalogService::new(
            DocumentService::new(repos.clone()),
            repos.clone(),
            repos.clone(),
        )
    }

    fn command(json: &str) -> NewService {
        serde_json::from_str(json).expect("valid body")
    }

    #[tokio::test]
    async fn create_derives_a_unique_slug() {
        let repos = Arc::new(InMemoryRepositories::new());
        let catalog = catalog(&repos);

        let first = catalog
            .create(command(r#"{"pageTitle": "Tax Advisory", "mainContent": "x"}"#))
            .await
            .expect("first");
        let second = catalog
            .create(command(r#"{"pageTitle": "Tax Advisory", "mainContent": "y"}"#))
            .await
            .expect("second");

        assert_eq!(first.slug, "tax-advisory");
        assert_eq!(second.slug, "tax-advisory-2");
    }

    #[tokio::test]
    async fn create_without_title_is_rejected() {
        let repos = Arc::new(InMemoryRepositories::new());
        let err = catalog(&repos)
            .create(command(r#"{"mainContent": "x"}"#))
            .await
            .expect_err("no title");
        assert!(matches!(err, DocumentError::ConstraintViolation("pageTitle")));
    }

    #[tokio::test]
    async fn taken_explicit_slug_is_a_duplicate() {
        let repos = Arc::new(InMemoryRepositories::new());
        let catalog = catalog(&repos);
        catalog
            .create(command(r#"{"pageTitle": "A", "mainContent": "x", "slug": "same"}"#))
            .await
            .expect("first");

        let err = catalog
            .create(command(r#"{"pageTitle": "B", "mainContent": "x", "slug": "same"}"#))
            .await
            .expect_err("duplicate");
        assert!(matches!(
            err,
            DocumentError::Repo(RepoError::Duplicate { .. })
        ));
    }

    #[tokio::test]
    async fn list_orders_by_order_then_title_and_filters_active() {
        let repos = Arc::new(InMemoryRepositories::new());
        let catalog = catalog(&repos);
        for body in [
            r#"{"pageTitle": "Zeta", "mainContent": "x", "order": 1}"#,
            r#"{"pageTitle": "Beta", "mainContent": "x", "order": 2}"#,
            r#"{"pageTitle": "Alpha", "mainContent": "x", "order": 2}"#,
            r#"{"pageTitle": "Hidden", "mainContent": "x", "active": false}"#,
        ] {
            catalog.create(command(body)).await.expect("create");
        }

        let active: Vec<String> = catalog
            .list(Some(true))
            .await
            .expect("list")
            .into_iter()
            .map(|service| service.page_title)
            .collect();
        assert_eq!(active, ["Zeta", "Alpha", "Beta"]);

        assert_eq!(catalog.list(None).await.expect("list").len(), 4);
    }

    #[tokio::test]
    async fn update_and_delete_address_a_service_by_id() {
        let repos = Arc::new(InMemoryRepositories::new());
        let catalog = catalog(&repos);
        let created = catalog
            .create(command(
                r#"{"pageTitle": "Payroll", "mainContent": "x", "whyChoosePoints": [{"title": "Fast"}]}"#,
            ))
            .await
            .expect("create");

        let patch: ServicePatch =
            serde_json::from_str(r#"{"summary": "Monthly payroll"}"#).expect("patch");
        let updated = catalog.update(created.id, patch).await.expect("update");
        assert_eq!(updated.summary.as_deref(), Some("Monthly payroll"));
        assert_eq!(updated.why_choose_points, created.why_choose_points);

        catalog.delete(created.id).await.expect("delete");
        assert!(matches!(
            catalog.get(created.id).await,
            Err(DocumentError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.delete(created.id).await,
            Err(DocumentError::NotFound { .. })
        ));
    }
}
