use std::sync::Arc;

use prep_core::model::{
    CategoryFilter, Resource, ResourceDraft, ResourceId, SessionUser, default_resources,
};
use storage::repository::ResourceRepository;
use tracing::info;

use crate::error::ResourceServiceError;

/// Study links, PDFs and videos.
#[derive(Clone)]
pub struct ResourceService {
    resources: Arc<dyn ResourceRepository>,
}

impl ResourceService {
    #[must_use]
    pub fn new(resources: Arc<dyn ResourceRepository>) -> Self {
        Self { resources }
    }

    /// Saved list, or the starter list for a user who never saved one.
    async fn load(&self, user: &SessionUser) -> Result<Vec<Resource>, ResourceServiceError> {
        Ok(self
            .resources
            .get_resources(&user.email)
            .await?
            .unwrap_or_else(default_resources))
    }

    /// # Errors
    ///
    /// Returns `ResourceServiceError::Storage` on read failures.
    pub async fn list(
        &self,
        user: &SessionUser,
        filter: &CategoryFilter,
    ) -> Result<Vec<Resource>, ResourceServiceError> {
        let resources = self.load(user).await?;
        Ok(resources.into_iter().filter(|r| filter.matches(r)).collect())
    }

    /// Append a resource. The starter list is materialized on first save.
    ///
    /// # Errors
    ///
    /// Returns `ResourceServiceError::Resource` for a blank title or a URL
    /// that does not parse, and storage errors on persistence failures.
    pub async fn add(
        &self,
        user: &SessionUser,
        draft: ResourceDraft,
    ) -> Result<Resource, ResourceServiceError> {
        let resource = draft.into_resource()?;
        let mut resources = self.load(user).await?;
        resources.push(resource.clone());
        self.resources.save_resources(&user.email, &resources).await?;
        info!(email = %user.email, resource_id = %resource.id, "resource added");
        Ok(resource)
    }

    /// # Errors
    ///
    /// Returns `ResourceServiceError::NotFound` for an unknown id.
    pub async fn delete(
        &self,
        user: &SessionUser,
        id: &ResourceId,
    ) -> Result<(), ResourceServiceError> {
        let mut resources = self.load(user).await?;
        let before = resources.len();
        resources.retain(|r| r.id != *id);
        if resources.len() == before {
            return Err(ResourceServiceError::NotFound(id.clone()));
        }
        self.resources.save_resources(&user.email, &resources).await?;
        info!(email = %user.email, resource_id = %id, "resource deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::{BOOKMARKS, ResourceError, ResourceKind};
    use storage::repository::Storage;

    fn user() -> SessionUser {
        SessionUser {
            email: "gita@example.com".into(),
            name: "Gita".into(),
        }
    }

    #[tokio::test]
    async fn new_user_sees_starter_list() {
        let service = ResourceService::new(Storage::in_memory().resources);
        let all = service.list(&user(), &CategoryFilter::All).await.unwrap();
        assert_eq!(all.len(), 6);
        let official = service
            .list(&user(), &CategoryFilter::parse("Official"))
            .await
            .unwrap();
        assert!(official.iter().all(|r| r.category == "Official"));
    }

    #[tokio::test]
    async fn add_defaults_to_bookmarks_link() {
        let service = ResourceService::new(Storage::in_memory().resources);
        let added = service
            .add(
                &user(),
                ResourceDraft::bookmark("Gorkhapatra", "https://gorkhapatraonline.com"),
            )
            .await
            .unwrap();
        assert_eq!(added.category, BOOKMARKS);
        assert_eq!(added.kind, ResourceKind::Link);

        let all = service.list(&user(), &CategoryFilter::All).await.unwrap();
        assert_eq!(all.len(), 7);
        assert_eq!(all.last(), Some(&added));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected() {
        let service = ResourceService::new(Storage::in_memory().resources);
        let err = service
            .add(&user(), ResourceDraft::bookmark("Broken", "not a url"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceServiceError::Resource(ResourceError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn deleting_a_starter_resource_persists_the_rest() {
        let storage = Storage::in_memory();
        let service = ResourceService::new(Arc::clone(&storage.resources));
        service.delete(&user(), &ResourceId::new("1")).await.unwrap();
        let stored = storage.resources.get_resources(&user().email).await.unwrap();
        assert_eq!(stored.map(|r| r.len()), Some(5));
        assert!(matches!(
            service.delete(&user(), &ResourceId::new("1")).await,
            Err(ResourceServiceError::NotFound(_))
        ));
    }
}
