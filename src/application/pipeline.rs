//! Request pipeline - validate, then execute
//!
//! A [`Pipeline`] binds one validator to one handler. The handler only runs
//! when validation passes; otherwise the broken rules are returned as
//! `ApplicationError::Validation` and nothing else happens.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::dto::{StoryDetailDto, StoryListDto};
use crate::application::errors::ApplicationResult;
use crate::application::handlers::{
    create_story_validator, get_all_stories_validator, get_story_validator, CreateStoryCommand,
    CreateStoryCommandHandler, GetAllStoriesQuery, GetAllStoriesQueryHandler, GetStoryQuery,
    GetStoryQueryHandler, PriorityPolicy,
};
use crate::application::ports::inbound::{Request, RequestHandler};
use crate::application::ports::outbound::{EventBusPort, StoryRepositoryPort};
use crate::application::validation::{ValidationResult, Validator};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::StoryId;

pub struct Pipeline<R: Request> {
    validator: Box<dyn Validator<R>>,
    handler: Box<dyn RequestHandler<R>>,
}

impl<R: Request> Pipeline<R> {
    pub fn new(
        validator: impl Validator<R> + 'static,
        handler: impl RequestHandler<R> + 'static,
    ) -> Self {
        Self {
            validator: Box::new(validator),
            handler: Box::new(handler),
        }
    }

    /// Run only the validation stage
    pub fn validate(&self, request: &R) -> ValidationResult {
        self.validator.validate(request)
    }

    pub async fn send(&self, request: R, cancel: &CancellationToken) -> ApplicationResult<R::Response> {
        if let Err(failure) = self.validate(&request).into_result() {
            debug!(?request, "Rejected request: {}", failure);
            return Err(failure.into());
        }
        self.handler.handle(request, cancel).await
    }
}

/// Entry point for every command and query the application understands
pub struct Dispatcher {
    create_story: Pipeline<CreateStoryCommand>,
    get_all_stories: Pipeline<GetAllStoriesQuery>,
    get_story: Pipeline<GetStoryQuery>,
}

impl Dispatcher {
    pub fn new(
        repository: Arc<dyn StoryRepositoryPort>,
        event_bus: Arc<dyn EventBusPort<DomainEvent>>,
        priority_policy: PriorityPolicy,
    ) -> Self {
        Self {
            create_story: Pipeline::new(
                create_story_validator(),
                CreateStoryCommandHandler::new(repository.clone(), event_bus, priority_policy),
            ),
            get_all_stories: Pipeline::new(
                get_all_stories_validator(),
                GetAllStoriesQueryHandler::new(repository.clone()),
            ),
            get_story: Pipeline::new(get_story_validator(), GetStoryQueryHandler::new(repository)),
        }
    }

    pub async fn create_story(
        &self,
        command: CreateStoryCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<StoryId> {
        self.create_story.send(command, cancel).await
    }

    pub async fn get_all_stories(&self, cancel: &CancellationToken) -> ApplicationResult<StoryListDto> {
        self.get_all_stories.send(GetAllStoriesQuery, cancel).await
    }

    pub async fn get_story(
        &self,
        query: GetStoryQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<StoryDetailDto> {
        self.get_story.send(query, cancel).await
    }
}
