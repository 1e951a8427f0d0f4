use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::application::documents::{DocumentError, DocumentService};
use crate::application::repos::ServicesRepo;
use crate::domain::{
    entities::{HomeRecord, ServiceRecord},
    home::{HomeDocument, HomePatch},
    references::{StaleReference, available_services, stale_references},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: Uuid,
    pub page_title: String,
    pub slug: String,
}

impl From<&ServiceRecord> for ServiceSummary {
    fn from(record: &ServiceRecord) -> Self {
        Self {
            id: record.id,
            page_title: record.page_title.clone(),
            slug: record.slug.clone(),
        }
    }
}

/// Services a Home service card may select, plus cards whose selection no
/// longer resolves.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceChoices {
    pub available: Vec<ServiceSummary>,
    pub stale: Vec<StaleReference>,
}

#[derive(Clone)]
pub struct HomeService {
    documents: DocumentService<HomeRecord>,
    services: Arc<dyn ServicesRepo>,
}

impl HomeService {
    pub fn new(documents: DocumentService<HomeRecord>, services: Arc<dyn ServicesRepo>) -> Self {
        Self {
            documents,
            services,
        }
    }

    pub async fn load(&self) -> Result<HomeDocument, DocumentError> {
        self.documents.load(None).await
    }

    pub async fn update(&self, patch: HomePatch) -> Result<HomeDocument, DocumentError> {
        self.documents.update(None, patch).await
    }

    /// Choices for the card at `editing`; `None` asks on behalf of a card
    /// that has not been added yet.
    pub async fn service_choices(
        &self,
        editing: Option<usize>,
    ) -> Result<ServiceChoices, DocumentError> {
        let home = self.documents.load_record(None).await?;
        let cards = home.decoded_service_cards();
        let services = self.services.list_services(Some(true)).await?;

        Ok(ServiceChoices {
            available: available_services(&services, &cards, editing)
                .into_iter()
                .map(ServiceSummary::from)
                .collect(),
            stale: stale_references(&services, &cards),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repos::DocumentStore;
    use crate::domain::{services::NewService, sections::ServiceCard};
    use crate::infra::memory::InMemoryRepositories;
    use time::OffsetDateTime;

    async fn seed_service(repos: &Arc<InMemoryRepositories>, title: &str) -> ServiceRecord {
        let record = NewService {
            page_title: title.to_string(),
            main_content: "content".to_string(),
            ..NewService::default()
        }
        .into_record(
            Uuid::new_v4(),
            title.to_lowercase().replace(' ', "-"),
            OffsetDateTime::now_utc(),
        )
        .expect("record");
        DocumentStore::<ServiceRecord>::save(repos.as_ref(), record)
            .await
            .expect("save")
    }

    fn home(repos: &Arc<InMemoryRepositories>) -> HomeService {
        HomeService::new(DocumentService::new(repos.clone()), repos.clone())
    }

    fn cards_patch(ids: &[&str]) -> HomePatch {
        let cards: Vec<ServiceCard> = ids
            .iter()
            .map(|id| ServiceCard {
                selected_service: id.to_string(),
                ..ServiceCard::default()
            })
            .collect();
        HomePatch {
            service_cards: Some(cards).into(),
            ..HomePatch::default()
        }
    }

    #[tokio::test]
    async fn choices_exclude_other_cards_and_report_stale_ones() {
        let repos = Arc::new(InMemoryRepositories::new());
        let consulting = seed_service(&repos, "Consulting").await;
        let entry = seed_service(&repos, "Market Entry").await;
        let home = home(&repos);

        let consulting_id = consulting.id.to_string();
        home.update(cards_patch(&[&consulting_id, "deleted-service"]))
            .await
            .expect("update");

        let for_second = home.service_choices(Some(1)).await.expect("choices");
        let ids: Vec<Uuid> = for_second.available.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![entry.id]);
        assert_eq!(
            for_second.stale,
            vec![StaleReference {
                position: 1,
                service_id: "deleted-service".to_string(),
            }]
        );

        let for_first = home.service_choices(Some(0)).await.expect("choices");
        assert_eq!(for_first.available.len(), 2);
    }

    #[tokio::test]
    async fn stale_reference_still_reads_back() {
        let repos = Arc::new(InMemoryRepositories::new());
        let home = home(&repos);

        home.update(cards_patch(&["gone"])).await.expect("update");
        let view = home.load().await.expect("load");

        assert_eq!(view.service_cards[0].selected_service, "gone");
    }
}
