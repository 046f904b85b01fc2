use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::application::dto::StoryDetailDto;
use crate::application::errors::{ApplicationError, ApplicationResult};
use crate::application::ports::inbound::{Request, RequestHandler};
use crate::application::ports::outbound::StoryRepositoryPort;
use crate::application::validation::RuleSet;
use crate::domain::value_objects::StoryId;

/// Query for one story and its tasks
#[derive(Debug, Clone, Copy)]
pub struct GetStoryQuery {
    pub id: i64,
}

impl GetStoryQuery {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetStoryQuery {
    type Response = StoryDetailDto;
}

/// Any integer is a well-formed id; unknown ids are reported as not found
pub fn get_story_validator() -> RuleSet<GetStoryQuery> {
    RuleSet::new()
}

pub struct GetStoryQueryHandler {
    repository: Arc<dyn StoryRepositoryPort>,
}

impl GetStoryQueryHandler {
    pub fn new(repository: Arc<dyn StoryRepositoryPort>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler<GetStoryQuery> for GetStoryQueryHandler {
    #[instrument(skip(self, cancel))]
    async fn handle(
        &self,
        request: GetStoryQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<StoryDetailDto> {
        if cancel.is_cancelled() {
            return Err(ApplicationError::Cancelled);
        }

        let id = StoryId::new(request.id);
        debug!(story_id = %id, "Fetching user story");

        let story = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("UserStory", id))?;

        Ok(StoryDetailDto::from(&story))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryStoryRepository;
    use crate::infrastructure::seed::demo_story;

    async fn seeded() -> (GetStoryQueryHandler, StoryId) {
        let repository = Arc::new(InMemoryStoryRepository::new());
        let mut stories = [demo_story()];
        repository.insert(&mut stories).await.unwrap();
        let id = stories[0].id().unwrap();
        (GetStoryQueryHandler::new(repository), id)
    }

    #[tokio::test]
    async fn test_story_found_with_tasks() {
        let (handler, id) = seeded().await;

        let story = handler
            .handle(GetStoryQuery::new(id.value()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(story.title, "My demo user story");
        assert_eq!(story.priority, 1);
        assert_eq!(story.business_value, "Business Value 900");
        assert!(!story.tasks.is_empty());
        assert_eq!(story.tasks[0].description, "My long description");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (handler, _) = seeded().await;

        let err = handler
            .handle(GetStoryQuery::new(-100), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::NotFound { entity: "UserStory", id: -100 }
        ));
    }
}
