use std::sync::Arc;

use crate::application::catalog::ServiceCatalogService;
use crate::application::categories::{Categorizer, CategoryService};
use crate::application::documents::DocumentService;
use crate::application::home::HomeService;
use crate::application::posts::PostService;
use crate::application::repos::{
    CategoriesRepo, CategoriesWriteRepo, DocumentStore, HealthRepo, PostsRepo, PostsWriteRepo,
    ServicesRepo, ServicesWriteRepo,
};
use crate::domain::entities::{AboutRecord, HomeRecord, ServiceRecord};

#[derive(Clone)]
pub struct ApiState {
    pub home: Arc<HomeService>,
    pub about: Arc<DocumentService<AboutRecord>>,
    pub services: Arc<ServiceCatalogService>,
    pub posts: Arc<PostService>,
    pub categories: Arc<CategoryService>,
    pub health: Arc<dyn HealthRepo>,
}

impl ApiState {
    /// Wires every service onto one repository set.
    pub fn from_repositories<R>(repos: Arc<R>) -> Self
    where
        R: DocumentStore<HomeRecord>
            + DocumentStore<AboutRecord>
            + DocumentStore<ServiceRecord>
            + ServicesRepo
            + ServicesWriteRepo
            + PostsRepo
            + PostsWriteRepo
            + CategoriesRepo
            + CategoriesWriteRepo
            + HealthRepo
            + 'static,
    {
        let home_store: Arc<dyn DocumentStore<HomeRecord>> = repos.clone();
        let about_store: Arc<dyn DocumentStore<AboutRecord>> = repos.clone();
        let service_store: Arc<dyn DocumentStore<ServiceRecord>> = repos.clone();
        let services_reader: Arc<dyn ServicesRepo> = repos.clone();
        let services_writer: Arc<dyn ServicesWriteRepo> = repos.clone();
        let categories_reader: Arc<dyn CategoriesRepo> = repos.clone();
        let categories_writer: Arc<dyn CategoriesWriteRepo> = repos.clone();
        let posts_reader: Arc<dyn PostsRepo> = repos.clone();
        let posts_writer: Arc<dyn PostsWriteRepo> = repos.clone();
        let health: Arc<dyn HealthRepo> = repos;

        let categorizer = Categorizer::new(categories_reader.clone(), categories_writer.clone());

        Self {
            home: Arc::new(HomeService::new(
                DocumentService::new(home_store),
                services_reader.clone(),
            )),
            about: Arc::new(DocumentService::new(about_store)),
            services: Arc::new(ServiceCatalogService::new(
                DocumentService::new(service_store),
                services_reader,
                services_writer,
            )),
            posts: Arc::new(PostService::new(
                posts_reader,
                posts_writer,
                categories_reader.clone(),
                categorizer,
            )),
            categories: Arc::new(CategoryService::new(categories_reader, categories_writer)),
            health,
        }
    }
}
