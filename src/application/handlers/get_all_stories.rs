use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::application::dto::StoryListDto;
use crate::application::errors::{ApplicationError, ApplicationResult};
use crate::application::ports::inbound::{Request, RequestHandler};
use crate::application::ports::outbound::StoryRepositoryPort;
use crate::application::validation::RuleSet;

/// Query for every stored story
#[derive(Debug, Clone, Default)]
pub struct GetAllStoriesQuery;

impl Request for GetAllStoriesQuery {
    type Response = StoryListDto;
}

/// The list query takes no input, so nothing can be wrong with it
pub fn get_all_stories_validator() -> RuleSet<GetAllStoriesQuery> {
    RuleSet::new()
}

pub struct GetAllStoriesQueryHandler {
    repository: Arc<dyn StoryRepositoryPort>,
}

impl GetAllStoriesQueryHandler {
    pub fn new(repository: Arc<dyn StoryRepositoryPort>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler<GetAllStoriesQuery> for GetAllStoriesQueryHandler {
    #[instrument(skip(self, cancel))]
    async fn handle(
        &self,
        _request: GetAllStoriesQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<StoryListDto> {
        if cancel.is_cancelled() {
            return Err(ApplicationError::Cancelled);
        }

        let stories = self.repository.get_all().await?;
        debug!(count = stories.len(), "Listed user stories");
        Ok(StoryListDto::from_stories(&stories))
    }
}
