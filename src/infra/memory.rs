//! Process-local repositories backing the service and HTTP tests.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::{
    pagination::PageRequest,
    repos::{
        CategoriesRepo, CategoriesWriteRepo, CreateCategoryParams, DocumentStore, HealthRepo,
        PostQueryFilter, PostsRepo, PostsWriteRepo, RepoError, ServicesRepo, ServicesWriteRepo,
    },
};
use crate::domain::entities::{
    AboutRecord, CategoryRecord, HomeRecord, PostRecord, ServiceRecord,
};

#[derive(Default)]
struct State {
    home: Option<HomeRecord>,
    about: Option<AboutRecord>,
    services: HashMap<Uuid, ServiceRecord>,
    posts: HashMap<Uuid, PostRecord>,
    categories: HashMap<Uuid, CategoryRecord>,
}

#[derive(Default)]
pub struct InMemoryRepositories {
    state: Mutex<State>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(constraint: &str) -> RepoError {
    RepoError::Duplicate {
        constraint: constraint.to_string(),
    }
}

/// Mirrors the one-row constraint on singleton tables.
fn save_singleton<D: Clone>(
    slot: &mut Option<D>,
    document: D,
    id_of: impl Fn(&D) -> Uuid,
    constraint: &str,
) -> Result<D, RepoError> {
    if slot
        .as_ref()
        .is_some_and(|existing| id_of(existing) != id_of(&document))
    {
        return Err(duplicate(constraint));
    }
    *slot = Some(document.clone());
    Ok(document)
}

#[async_trait]
impl DocumentStore<HomeRecord> for InMemoryRepositories {
    async fn load(&self, id: Option<Uuid>) -> Result<Option<HomeRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state
            .home
            .clone()
            .filter(|home| id.is_none_or(|id| home.id == id)))
    }

    async fn save(&self, document: HomeRecord) -> Result<HomeRecord, RepoError> {
        let mut state = self.state.lock().await;
        save_singleton(&mut state.home, document, |home| home.id, "home_singleton_key")
    }
}

#[async_trait]
impl DocumentStore<AboutRecord> for InMemoryRepositories {
    async fn load(&self, id: Option<Uuid>) -> Result<Option<AboutRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state
            .about
            .clone()
            .filter(|about| id.is_none_or(|id| about.id == id)))
    }

    async fn save(&self, document: AboutRecord) -> Result<AboutRecord, RepoError> {
        let mut state = self.state.lock().await;
        save_singleton(
            &mut state.about,
            document,
            |about| about.id,
            "about_page_singleton_key",
        )
    }
}

#[async_trait]
impl DocumentStore<ServiceRecord> for InMemoryRepositories {
    async fn load(&self, id: Option<Uuid>) -> Result<Option<ServiceRecord>, RepoError> {
        let Some(id) = id else {
            return Ok(None);
        };
        let state = self.state.lock().await;
        Ok(state.services.get(&id).cloned())
    }

    async fn save(&self, document: ServiceRecord) -> Result<ServiceRecord, RepoError> {
        let mut state = self.state.lock().await;
        let taken = state
            .services
            .values()
            .any(|other| other.id != document.id && other.slug == document.slug);
        if taken {
            return Err(duplicate("services_slug_key"));
        }
        state.services.insert(document.id, document.clone());
        Ok(document)
    }
}

#[async_trait]
impl ServicesRepo for InMemoryRepositories {
    async fn list_services(&self, active: Option<bool>) -> Result<Vec<ServiceRecord>, RepoError> {
        let state = self.state.lock().await;
        let mut services: Vec<ServiceRecord> = state
            .services
            .values()
            .filter(|service| active.is_none_or(|active| service.active == active))
            .cloned()
            .collect();
        services.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.page_title.cmp(&b.page_title))
        });
        Ok(services)
    }

    async fn find_service_by_slug(&self, slug: &str) -> Result<Option<ServiceRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state
            .services
            .values()
            .find(|service| service.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl ServicesWriteRepo for InMemoryRepositories {
    async fn delete_service(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().await;
        state
            .services
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

fn matches_filter(post: &PostRecord, filter: &PostQueryFilter) -> bool {
    filter
        .published
        .is_none_or(|published| post.published == published)
        && filter
            .category_id
            .is_none_or(|category| post.category_id == Some(category))
}

#[async_trait]
impl PostsRepo for InMemoryRepositories {
    async fn list_posts(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let state = self.state.lock().await;
        let mut posts: Vec<PostRecord> = state
            .posts
            .values()
            .filter(|post| matches_filter(post, filter))
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count_posts(&self, filter: &PostQueryFilter) -> Result<u64, RepoError> {
        let state = self.state.lock().await;
        Ok(state
            .posts
            .values()
            .filter(|post| matches_filter(post, filter))
            .count() as u64)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.posts.values().find(|post| post.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.posts.get(&id).cloned())
    }
}

impl State {
    fn check_post(&self, post: &PostRecord) -> Result<(), RepoError> {
        if self
            .posts
            .values()
            .any(|other| other.id != post.id && other.slug == post.slug)
        {
            return Err(duplicate("posts_slug_key"));
        }
        if post.published != post.published_at.is_some() {
            return Err(RepoError::Integrity {
                message: "posts_publication_consistent".to_string(),
            });
        }
        if let Some(category) = post.category_id {
            if !self.categories.contains_key(&category) {
                return Err(RepoError::InvalidInput {
                    message: format!("category `{category}` does not exist"),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PostsWriteRepo for InMemoryRepositories {
    async fn create_post(&self, post: PostRecord) -> Result<PostRecord, RepoError> {
        let mut state = self.state.lock().await;
        if state.posts.contains_key(&post.id) {
            return Err(duplicate("posts_pkey"));
        }
        state.check_post(&post)?;
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, post: PostRecord) -> Result<PostRecord, RepoError> {
        let mut state = self.state.lock().await;
        if !state.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        state.check_post(&post)?;
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().await;
        state
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoriesRepo for InMemoryRepositories {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        let state = self.state.lock().await;
        let mut categories: Vec<CategoryRecord> = state.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn find_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<CategoryRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state
            .categories
            .values()
            .find(|category| category.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl CategoriesWriteRepo for InMemoryRepositories {
    async fn create_category(
        &self,
        params: CreateCategoryParams,
    ) -> Result<CategoryRecord, RepoError> {
        let mut state = self.state.lock().await;
        if state
            .categories
            .values()
            .any(|category| category.slug == params.slug)
        {
            return Err(duplicate("categories_slug_key"));
        }
        let now = OffsetDateTime::now_utc();
        let category = CategoryRecord {
            id: Uuid::new_v4(),
            name: params.name,
            slug: params.slug,
            description: params.description,
            created_at: now,
            updated_at: now,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl HealthRepo for InMemoryRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
