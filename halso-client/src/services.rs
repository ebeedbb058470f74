//! Typed CRUD services over the REST collections
//!
//! One generic [`ResourceService`] covers every collection; the few
//! collection-specific calls (publishing a post, class registrations, the
//! dashboard counters) hang off concrete instantiations.

use std::marker::PhantomData;

use serde::de::IgnoredAny;
use shared::models::{BlogPost, BlogPostDraft, ClassRegistration, DashboardStats, GymClass};
use shared::util::now_rfc3339;
use shared::{Draft, EntityId, Resource};

use crate::client::HttpClient;
use crate::ClientResult;

/// CRUD calls for one collection `R`
#[derive(Debug, Clone)]
pub struct ResourceService<C, R> {
    http: C,
    _resource: PhantomData<fn() -> R>,
}

impl<C: HttpClient, R: Resource> ResourceService<C, R> {
    pub fn new(http: C) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// `{path}/{id}` with the id as a single percent-encoded segment
    fn item_path(id: &EntityId) -> String {
        format!("{}/{}", R::PATH, urlencoding::encode(&id.as_key()))
    }

    /// `GET /{path}`, in server order
    pub async fn get_all(&self) -> ClientResult<Vec<R>> {
        let items: Vec<R> = self.http.get(R::PATH).await?;
        tracing::debug!(resource = R::NAME, count = items.len(), "Fetched collection");
        Ok(items)
    }

    /// `GET /{path}/{id}`
    pub async fn get_by_id(&self, id: &EntityId) -> ClientResult<R> {
        self.http.get(&Self::item_path(id)).await
    }

    /// `POST /{path}`; returns the entity as the server stored it
    pub async fn create(&self, draft: &R::Draft) -> ClientResult<R> {
        let created: R = self.http.post(R::PATH, draft).await?;
        tracing::info!(resource = R::NAME, id = %created.id(), "Created");
        Ok(created)
    }

    /// `PUT /{path}/{id}`
    ///
    /// Some endpoints answer `204 No Content`; the entity is then read back
    /// so callers always get the server's view.
    pub async fn update(&self, id: &EntityId, draft: &R::Draft) -> ClientResult<R> {
        let path = Self::item_path(id);
        let updated: Option<R> = self.http.put(&path, draft).await?;
        let updated = match updated {
            Some(entity) => entity,
            None => self.http.get(&path).await?,
        };
        tracing::info!(resource = R::NAME, %id, "Updated");
        Ok(updated)
    }

    /// `DELETE /{path}/{id}`; any response body is ignored
    pub async fn delete(&self, id: &EntityId) -> ClientResult<()> {
        let _: IgnoredAny = self.http.delete(&Self::item_path(id)).await?;
        tracing::info!(resource = R::NAME, %id, "Deleted");
        Ok(())
    }
}

impl<C: HttpClient> ResourceService<C, BlogPost> {
    /// Fetch the post, mark it published now and write it back
    pub async fn publish(&self, id: &EntityId) -> ClientResult<BlogPost> {
        let post = self.get_by_id(id).await?.published(now_rfc3339());
        let draft = BlogPostDraft::from_entity(&post);
        self.update(id, &draft).await
    }
}

impl<C: HttpClient> ResourceService<C, GymClass> {
    /// `GET /classes/{id}/registrations`
    pub async fn registrations(&self, id: &EntityId) -> ClientResult<Vec<ClassRegistration>> {
        self.http
            .get(&format!("{}/registrations", Self::item_path(id)))
            .await
    }
}

/// Aggregate counters for the dashboard landing page
#[derive(Debug, Clone)]
pub struct DashboardService<C> {
    http: C,
}

impl<C: HttpClient> DashboardService<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// `GET /dashboard/stats`
    pub async fn stats(&self) -> ClientResult<DashboardStats> {
        self.http.get("dashboard/stats").await
    }
}
