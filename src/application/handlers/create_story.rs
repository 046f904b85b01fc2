//! Create Story - the only command: builds a story and stores it as new

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::application::errors::{ApplicationError, ApplicationResult};
use crate::application::ports::inbound::{Request, RequestHandler};
use crate::application::ports::outbound::{EventBusPort, RepositoryError, StoryRepositoryPort};
use crate::application::unit_of_work::StoryUnitOfWork;
use crate::application::validation::{RuleSet, ValidationFailure};
use crate::domain::aggregates::UserStory;
use crate::domain::entities::StoryTask;
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{BusinessValue, Priority, Relevance, StoryId};

/// Request to create a new user story
#[derive(Debug, Clone)]
pub struct CreateStoryCommand {
    pub title: String,
    pub text: String,
    /// Raw [`Relevance`] code
    pub importance: Option<i32>,
    /// Id of a [`BusinessValue`] catalog entry
    pub business_value_id: Option<i32>,
    pub long_text: String,
    /// Descriptions of tasks to attach, in order
    pub tasks: Vec<String>,
}

impl Request for CreateStoryCommand {
    type Response = StoryId;
}

/// Rules a create-story request must satisfy before anything is built
pub fn create_story_validator() -> RuleSet<CreateStoryCommand> {
    RuleSet::new()
        .rule("title", "Title is required", |c: &CreateStoryCommand| {
            !c.title.trim().is_empty()
        })
        .rule(
            "importance",
            "Provide a valid importance value (e.g. 0, 1, 2)",
            |c: &CreateStoryCommand| c.importance.and_then(Relevance::from_code).is_some(),
        )
        .rule(
            "business_value_id",
            "Provide a valid business value id (e.g. 0, 1)",
            |c: &CreateStoryCommand| c.business_value_id.is_some_and(BusinessValue::is_member),
        )
        .rule(
            "tasks",
            "Task descriptions must not be empty",
            |c: &CreateStoryCommand| c.tasks.iter().all(|t| !t.trim().is_empty()),
        )
}

/// How a new story's priority is derived from the requested importance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityPolicy {
    /// Rank follows importance, `MustHave` being rank 1
    #[default]
    FromImportance,
    /// Every new story gets the same rank; importance is validated but unused
    Fixed(Priority),
}

impl PriorityPolicy {
    pub fn resolve(&self, relevance: Relevance) -> Priority {
        match self {
            PriorityPolicy::FromImportance => Priority::from_relevance(relevance),
            PriorityPolicy::Fixed(priority) => *priority,
        }
    }
}

impl FromStr for PriorityPolicy {
    type Err = anyhow::Error;

    /// Accepts `importance`, `fixed` (rank 1) or `fixed:<rank>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "importance" | "" => Ok(PriorityPolicy::FromImportance),
            "fixed" => Ok(PriorityPolicy::Fixed(Priority::HIGHEST)),
            _ => {
                let rank = s
                    .strip_prefix("fixed:")
                    .ok_or_else(|| anyhow::anyhow!("Invalid priority policy: {}", s))?;
                let rank: i32 = rank
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid fixed priority rank: {}", rank))?;
                Ok(PriorityPolicy::Fixed(Priority::create(rank)?))
            }
        }
    }
}

pub struct CreateStoryCommandHandler {
    repository: Arc<dyn StoryRepositoryPort>,
    event_bus: Arc<dyn EventBusPort<DomainEvent>>,
    priority_policy: PriorityPolicy,
}

impl CreateStoryCommandHandler {
    pub fn new(
        repository: Arc<dyn StoryRepositoryPort>,
        event_bus: Arc<dyn EventBusPort<DomainEvent>>,
        priority_policy: PriorityPolicy,
    ) -> Self {
        Self {
            repository,
            event_bus,
            priority_policy,
        }
    }

    fn build_story(&self, request: CreateStoryCommand) -> Result<UserStory, ValidationFailure> {
        let relevance = request
            .importance
            .ok_or_else(|| ValidationFailure::single("importance", "Importance is required"))
            .and_then(|code| {
                Relevance::try_from(code)
                    .map_err(|e| ValidationFailure::single("importance", e.to_string()))
            })?;
        let business_value = request
            .business_value_id
            .and_then(BusinessValue::from_id)
            .ok_or_else(|| {
                ValidationFailure::single(
                    "business_value_id",
                    "Provide a valid business value id (e.g. 0, 1)",
                )
            })?;

        let mut story = UserStory::new(
            request.title,
            self.priority_policy.resolve(relevance),
            request.text,
            request.long_text,
            business_value,
        );
        for description in request.tasks {
            story.add_task(StoryTask::new(description));
        }
        Ok(story)
    }
}

#[async_trait]
impl RequestHandler<CreateStoryCommand> for CreateStoryCommandHandler {
    #[instrument(skip(self, cancel), fields(title = %request.title))]
    async fn handle(
        &self,
        request: CreateStoryCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<StoryId> {
        let story = self.build_story(request)?;

        if cancel.is_cancelled() {
            return Err(ApplicationError::Cancelled);
        }

        let mut unit_of_work = StoryUnitOfWork::new(self.repository.clone());
        let handle = unit_of_work.attach(story);
        unit_of_work.save_changes().await?;

        let (id, title) = unit_of_work
            .story(handle)
            .and_then(|story| Some((story.id()?, story.title().to_string())))
            .ok_or_else(|| RepositoryError::Database("store did not assign a story id".into()))?;

        info!(story_id = %id, "Created user story: {}", title);

        // The write is committed; a lost event must not undo it.
        if let Err(e) = self
            .event_bus
            .publish(DomainEvent::user_story_added(id, title))
            .await
        {
            warn!(story_id = %id, "Failed to publish UserStoryAdded: {}", e);
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::EventBusError;
    use crate::application::validation::Validator;
    use crate::infrastructure::persistence::InMemoryStoryRepository;
    use crate::infrastructure::seed::demo_story;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEventBus {
        events: Mutex<Vec<DomainEvent>>,
    }

    impl RecordingEventBus {
        fn titles(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|e| match e {
                    DomainEvent::UserStoryAdded { title, .. } => title.clone(),
                })
                .collect()
        }
    }

    #[async_trait]
    impl EventBusPort<DomainEvent> for RecordingEventBus {
        async fn publish(&self, event: DomainEvent) -> Result<(), EventBusError> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    struct ClosedEventBus;

    #[async_trait]
    impl EventBusPort<DomainEvent> for ClosedEventBus {
        async fn publish(&self, _event: DomainEvent) -> Result<(), EventBusError> {
            Err(EventBusError::Closed)
        }
    }

    struct BrokenRepository;

    #[async_trait]
    impl StoryRepositoryPort for BrokenRepository {
        async fn insert(&self, _stories: &mut [UserStory]) -> Result<(), RepositoryError> {
            Err(RepositoryError::Database("disk full".into()))
        }

        async fn find_by_id(&self, _id: StoryId) -> Result<Option<UserStory>, RepositoryError> {
            Ok(None)
        }

        async fn get_all(&self) -> Result<Vec<UserStory>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    fn demo_post() -> CreateStoryCommand {
        CreateStoryCommand {
            title: "Demo post".to_string(),
            text: "My demo post user story".to_string(),
            importance: Some(Relevance::CouldHave.code()),
            business_value_id: Some(1),
            long_text: String::new(),
            tasks: Vec::new(),
        }
    }

    async fn seeded_repository() -> Arc<InMemoryStoryRepository> {
        let repository = Arc::new(InMemoryStoryRepository::new());
        repository.insert(&mut [demo_story()]).await.unwrap();
        repository
    }

    #[tokio::test]
    async fn test_create_returns_story_id_and_publishes_once() {
        let repository = seeded_repository().await;
        let events = Arc::new(RecordingEventBus::default());
        let handler = CreateStoryCommandHandler::new(
            repository.clone(),
            events.clone(),
            PriorityPolicy::default(),
        );

        let id = handler
            .handle(demo_post(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(id.value() >= 0);
        assert_eq!(repository.get_all().await.unwrap().len(), 2);
        assert_eq!(events.titles(), vec!["Demo post".to_string()]);

        let stored = repository.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.business_value(), BusinessValue::BV1);
        assert_eq!(stored.text(), "My demo post user story");
    }

    #[tokio::test]
    async fn test_create_attaches_tasks_in_order() {
        let repository = Arc::new(InMemoryStoryRepository::new());
        let handler = CreateStoryCommandHandler::new(
            repository.clone(),
            Arc::new(RecordingEventBus::default()),
            PriorityPolicy::default(),
        );
        let command = CreateStoryCommand {
            tasks: vec!["design".to_string(), "build".to_string()],
            ..demo_post()
        };

        let id = handler.handle(command, &CancellationToken::new()).await.unwrap();

        let stored = repository.find_by_id(id).await.unwrap().unwrap();
        let descriptions: Vec<&str> = stored.tasks().iter().map(|t| t.description()).collect();
        assert_eq!(descriptions, vec!["design", "build"]);
        assert!(stored.tasks().iter().all(|t| t.id().is_some()));
    }

    #[tokio::test]
    async fn test_priority_policy_decides_rank() {
        let command = CreateStoryCommand {
            importance: Some(Relevance::WontHave.code()),
            ..demo_post()
        };

        let repository = Arc::new(InMemoryStoryRepository::new());
        let from_importance = CreateStoryCommandHandler::new(
            repository.clone(),
            Arc::new(RecordingEventBus::default()),
            PriorityPolicy::FromImportance,
        );
        let id = from_importance
            .handle(command.clone(), &CancellationToken::new())
            .await
            .unwrap();
        let stored = repository.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.priority().value(), 4);

        // Historical behavior: every story is created with rank 1
        let fixed = CreateStoryCommandHandler::new(
            repository.clone(),
            Arc::new(RecordingEventBus::default()),
            PriorityPolicy::Fixed(Priority::create(1).unwrap()),
        );
        let id = fixed.handle(command, &CancellationToken::new()).await.unwrap();
        let stored = repository.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.priority().value(), 1);
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_fail_command() {
        let repository = Arc::new(InMemoryStoryRepository::new());
        let handler = CreateStoryCommandHandler::new(
            repository.clone(),
            Arc::new(ClosedEventBus),
            PriorityPolicy::default(),
        );

        let result = handler.handle(demo_post(), &CancellationToken::new()).await;

        assert!(result.is_ok());
        assert_eq!(repository.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_persistence_failure_publishes_nothing() {
        let events = Arc::new(RecordingEventBus::default());
        let handler = CreateStoryCommandHandler::new(
            Arc::new(BrokenRepository),
            events.clone(),
            PriorityPolicy::default(),
        );

        let err = handler
            .handle(demo_post(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Repository(_)));
        assert!(events.titles().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_request_writes_nothing() {
        let repository = Arc::new(InMemoryStoryRepository::new());
        let events = Arc::new(RecordingEventBus::default());
        let handler = CreateStoryCommandHandler::new(
            repository.clone(),
            events.clone(),
            PriorityPolicy::default(),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = handler.handle(demo_post(), &cancel).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Cancelled));
        assert!(repository.get_all().await.unwrap().is_empty());
        assert!(events.titles().is_empty());
    }

    #[test]
    fn test_validator_accepts_demo_post() {
        assert!(create_story_validator().validate(&demo_post()).is_valid());
    }

    #[test]
    fn test_validator_rejects_unknown_importance() {
        let command = CreateStoryCommand {
            importance: Some(5),
            ..demo_post()
        };

        let result = create_story_validator().validate(&command);

        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].field, "importance");
    }

    #[test]
    fn test_validator_rejects_unknown_business_value() {
        let command = CreateStoryCommand {
            business_value_id: Some(10),
            ..demo_post()
        };

        let result = create_story_validator().validate(&command);

        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].field, "business_value_id");
    }

    #[test]
    fn test_validator_follows_business_value_catalog() {
        let validator = create_story_validator();
        for id in -5..=1100 {
            let command = CreateStoryCommand {
                business_value_id: Some(id),
                ..demo_post()
            };
            assert_eq!(
                validator.validate(&command).is_valid(),
                BusinessValue::is_member(id),
                "business value id {}",
                id
            );
        }
    }

    #[test]
    fn test_validator_reports_missing_values() {
        let command = CreateStoryCommand {
            title: String::new(),
            importance: None,
            business_value_id: None,
            ..demo_post()
        };

        let result = create_story_validator().validate(&command);

        let fields: Vec<&str> = result.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "importance", "business_value_id"]);
    }

    #[test]
    fn test_validator_reports_every_broken_rule() {
        let command = CreateStoryCommand {
            title: "   ".to_string(),
            importance: Some(-1),
            business_value_id: Some(10),
            tasks: vec![String::new()],
            ..demo_post()
        };

        let result = create_story_validator().validate(&command);

        let fields: Vec<&str> = result.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "importance", "business_value_id", "tasks"]);
    }

    #[test]
    fn test_priority_policy_parsing() {
        assert_eq!(
            "importance".parse::<PriorityPolicy>().unwrap(),
            PriorityPolicy::FromImportance
        );
        assert_eq!(
            "fixed".parse::<PriorityPolicy>().unwrap(),
            PriorityPolicy::Fixed(Priority::create(1).unwrap())
        );
        assert_eq!(
            "fixed:3".parse::<PriorityPolicy>().unwrap(),
            PriorityPolicy::Fixed(Priority::create(3).unwrap())
        );
        assert!("fixed:9".parse::<PriorityPolicy>().is_err());
        assert!("loudest".parse::<PriorityPolicy>().is_err());
    }
}
