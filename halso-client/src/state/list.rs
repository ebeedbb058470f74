//! List screen state
//!
//! Holds the full collection as last fetched, in server order. Search never
//! touches the stored items; [`ListView::visible`] recomputes the subset on
//! every call.

use std::future::Future;

use shared::{EntityId, Resource};

use crate::ClientResult;
use crate::client::HttpClient;
use crate::services::ResourceService;

use super::toast::Toaster;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// What [`ListView::upsert`] did with the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Replaced,
    Appended,
}

#[derive(Debug, Clone)]
pub struct ListView<R> {
    items: Vec<R>,
    state: LoadState,
    search: String,
}

impl<R> Default for ListView<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::Idle,
            search: String::new(),
        }
    }
}

impl<R: Resource> ListView<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one fetch and record its outcome.
    ///
    /// On failure the list is emptied, the state carries the message and an
    /// error toast is queued. Returns whether the fetch succeeded.
    pub async fn load<F>(&mut self, fetch: F, toaster: &mut Toaster) -> bool
    where
        F: Future<Output = ClientResult<Vec<R>>>,
    {
        self.state = LoadState::Loading;
        match fetch.await {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Ready;
                true
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(resource = R::NAME, error = %e, "Failed to load list");
                self.items.clear();
                toaster.failure(&format!("Could not load {} list", R::NAME), &e);
                self.state = LoadState::Failed(message);
                false
            }
        }
    }

    /// [`load`](Self::load) with the collection's `get_all`
    pub async fn load_from<C: HttpClient>(
        &mut self,
        service: &ResourceService<C, R>,
        toaster: &mut Toaster,
    ) -> bool {
        self.load(service.get_all(), toaster).await
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// All items in server order, ignoring the search term
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Items matching `term`, in server order
    pub fn visible(&self, term: &str) -> Vec<&R> {
        self.items.iter().filter(|item| item.matches_search(term)).collect()
    }

    /// Items matching the current search term
    pub fn shown(&self) -> Vec<&R> {
        self.visible(&self.search)
    }

    pub fn find(&self, id: &EntityId) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replace the item with the same id, or append it
    pub fn upsert(&mut self, entity: R) -> Upsert {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                Upsert::Replaced
            }
            None => {
                self.items.push(entity);
                Upsert::Appended
            }
        }
    }

    pub fn remove(&mut self, id: &EntityId) -> Option<R> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Delete on the server, then locally.
    ///
    /// On failure the item stays where it was and an error toast is queued.
    pub async fn delete<C: HttpClient>(
        &mut self,
        service: &ResourceService<C, R>,
        id: &EntityId,
        toaster: &mut Toaster,
    ) -> ClientResult<()> {
        match service.delete(id).await {
            Ok(()) => {
                self.remove(id);
                toaster.success(format!("{} deleted", R::NAME));
                Ok(())
            }
            Err(e) => {
                toaster.failure(&format!("Could not delete {}", R::NAME), &e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use shared::models::{Member, MembershipStatus};

    fn member(id: i64, name: &str, email: &str) -> Member {
        Member {
            id: EntityId::from(id),
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            membership_status: MembershipStatus::Active,
            join_date: "2024-01-15".to_string(),
            facility_id: None,
        }
    }

    async fn loaded(items: Vec<Member>) -> ListView<Member> {
        let mut list = ListView::new();
        let mut toaster = Toaster::new();
        assert!(list.load(async { Ok::<_, ClientError>(items) }, &mut toaster).await);
        list
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_keeps_order() {
        let list = loaded(vec![
            member(1, "Anna Berg", "anna@example.se"),
            member(2, "Erik Lund", "erik@example.se"),
            member(3, "Johanna Ek", "jo@example.se"),
        ])
        .await;

        let names: Vec<_> = list.visible("ANNA").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Anna Berg", "Johanna Ek"]);
        assert_eq!(list.visible("   ").len(), 3);
        assert!(list.visible("zzz").is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_empties_list_and_toasts() {
        let mut list = loaded(vec![member(1, "Anna", "a@example.se")]).await;
        let mut toaster = Toaster::new();

        let ok = list
            .load(
                async { Err::<Vec<Member>, _>(ClientError::Internal("boom".into())) },
                &mut toaster,
            )
            .await;
        assert!(!ok);
        assert!(list.is_empty());
        assert!(matches!(list.state(), LoadState::Failed(_)));
        assert_eq!(toaster.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id_or_appends() {
        let mut list = loaded(vec![member(1, "Anna", "a@example.se")]).await;

        assert_eq!(list.upsert(member(1, "Anna B", "a@example.se")), Upsert::Replaced);
        assert_eq!(list.upsert(member(2, "Erik", "e@example.se")), Upsert::Appended);
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].name, "Anna B");

        assert!(list.remove(&EntityId::from(1)).is_some());
        assert!(list.remove(&EntityId::from(1)).is_none());
        assert!(list.find(&EntityId::from(2)).is_some());
    }
}
