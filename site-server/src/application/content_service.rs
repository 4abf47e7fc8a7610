use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::data::content_query::{
    GroqQuery, ListQuery, ListableKind, by_slug_query, categories_query, workplace_policy_query,
};
use crate::data::content_store::ContentStore;
use crate::domain::content::{Category, Post, Project, WorkplacePolicy};
use crate::domain::error::DomainError;
use crate::domain::pagination::{PagedResource, PaginationState};

#[derive(Debug, Clone, Copy)]
pub(crate) struct PageSizes {
    pub(crate) posts: u32,
    pub(crate) projects: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct Paged<T> {
    pub(crate) items: Vec<T>,
    pub(crate) pagination: PaginationState,
    pub(crate) resource: PagedResource,
}

pub(crate) struct ContentService<S: ContentStore> {
    store: S,
    page_sizes: PageSizes,
}

impl<S: ContentStore> ContentService<S> {
    pub(crate) fn new(store: S, page_sizes: PageSizes) -> Self {
        Self { store, page_sizes }
    }

    pub(crate) async fn list_posts(
        &self,
        category: Option<&str>,
        page: i64,
    ) -> Result<Paged<Post>, DomainError> {
        let list = ListQuery::new(ListableKind::Post, category, page, self.page_sizes.posts);
        let items: Vec<Post> = self.fetch_as(&list.to_groq()).await?;
        self.paged(list, items, self.page_sizes.posts, page, PagedResource::Blog)
            .await
    }

    pub(crate) async fn get_post(&self, slug: &str) -> Result<Post, DomainError> {
        let query = by_slug_query(ListableKind::Post, slug);
        self.fetch_as::<Option<Post>>(&query)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post slug: {slug}")))
    }

    pub(crate) async fn list_projects(
        &self,
        category: Option<&str>,
        page: i64,
    ) -> Result<Paged<Project>, DomainError> {
        let list = ListQuery::new(
            ListableKind::Project,
            category,
            page,
            self.page_sizes.projects,
        );
        let items = self
            .fetch_as::<Vec<Project>>(&list.to_groq())
            .await?
            .into_iter()
            .filter_map(|project| {
                let slug = project.slug.clone();
                match project.check_gallery() {
                    Ok(project) => Some(project),
                    Err(err) => {
                        warn!(%slug, error = %err, "skipping project with invalid gallery");
                        None
                    }
                }
            })
            .collect();
        self.paged(
            list,
            items,
            self.page_sizes.projects,
            page,
            PagedResource::Projects,
        )
        .await
    }

    pub(crate) async fn get_project(&self, slug: &str) -> Result<Project, DomainError> {
        let query = by_slug_query(ListableKind::Project, slug);
        let project = self
            .fetch_as::<Option<Project>>(&query)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("project slug: {slug}")))?;
        check_project(project)
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.fetch_as(&categories_query()).await
    }

    /// The single workplace-policy document.
    pub(crate) async fn workplace_policy(&self) -> Result<WorkplacePolicy, DomainError> {
        let mut documents: Vec<WorkplacePolicy> =
            self.fetch_as(&workplace_policy_query()).await?;

        match documents.len() {
            0 => Err(DomainError::NotFound("workplace policy".to_string())),
            1 => Ok(documents.remove(0)),
            count => {
                warn!(count, "content store holds more than one workplace policy");
                Err(DomainError::Unexpected(
                    "multiple workplace policy documents".to_string(),
                ))
            }
        }
    }

    async fn paged<T>(
        &self,
        list: ListQuery,
        items: Vec<T>,
        page_size: u32,
        page: i64,
        resource: PagedResource,
    ) -> Result<Paged<T>, DomainError> {
        let total: u64 = self.fetch_as(&list.to_count_groq()).await?;
        let current_page = u64::try_from(page).unwrap_or(0).max(1);

        Ok(Paged {
            items,
            pagination: PaginationState::new(
                current_page,
                total,
                page_size,
                list.category().map(str::to_string),
            ),
            resource,
        })
    }

    async fn fetch_as<T: DeserializeOwned>(&self, query: &GroqQuery) -> Result<T, DomainError> {
        let value: Value = self.store.fetch(query).await?;
        serde_json::from_value(value)
            .map_err(|err| DomainError::Unexpected(format!("content shape mismatch: {err}")))
    }
}

fn check_project(project: Project) -> Result<Project, DomainError> {
    project
        .check_gallery()
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}
