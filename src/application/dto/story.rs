use serde::{Deserialize, Serialize};

use crate::application::handlers::CreateStoryCommand;
use crate::domain::aggregates::UserStory;
use crate::domain::entities::StoryTask;
use crate::domain::value_objects::{StoryId, TaskId};

/// Body of `POST /api/stories`
///
/// Every field may be missing. Missing or out-of-range values reach the
/// validator and come back as field errors instead of failing to parse.
#[derive(Debug, Deserialize)]
pub struct CreateStoryRequestDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub importance: Option<i32>,
    #[serde(default)]
    pub business_value_id: Option<i32>,
    #[serde(default)]
    pub long_text: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl From<CreateStoryRequestDto> for CreateStoryCommand {
    fn from(dto: CreateStoryRequestDto) -> Self {
        Self {
            title: dto.title,
            text: dto.text,
            importance: dto.importance,
            business_value_id: dto.business_value_id,
            long_text: dto.long_text,
            tasks: dto.tasks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoryCreatedDto {
    pub id: StoryId,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoryTaskDto {
    pub id: Option<TaskId>,
    pub description: String,
}

impl From<&StoryTask> for StoryTaskDto {
    fn from(task: &StoryTask) -> Self {
        Self {
            id: task.id(),
            description: task.description().to_string(),
        }
    }
}

/// One row of the story list
#[derive(Debug, Clone, Serialize)]
pub struct StoryListItemDto {
    pub id: Option<StoryId>,
    pub title: String,
    pub priority: i32,
    pub business_value: String,
    pub task_count: usize,
}

impl From<&UserStory> for StoryListItemDto {
    fn from(story: &UserStory) -> Self {
        Self {
            id: story.id(),
            title: story.title().to_string(),
            priority: story.priority().value(),
            business_value: story.business_value().description().to_string(),
            task_count: story.tasks().len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoryListDto {
    pub data: Vec<StoryListItemDto>,
    pub total: usize,
}

impl StoryListDto {
    pub fn from_stories(stories: &[UserStory]) -> Self {
        let data: Vec<StoryListItemDto> = stories.iter().map(StoryListItemDto::from).collect();
        Self {
            total: data.len(),
            data,
        }
    }
}

/// Full view of one story and its tasks
#[derive(Debug, Clone, Serialize)]
pub struct StoryDetailDto {
    pub id: Option<StoryId>,
    pub title: String,
    pub priority: i32,
    pub text: String,
    pub long_text: String,
    pub business_value: String,
    pub business_value_id: i32,
    pub tasks: Vec<StoryTaskDto>,
}

impl From<&UserStory> for StoryDetailDto {
    fn from(story: &UserStory) -> Self {
        Self {
            id: story.id(),
            title: story.title().to_string(),
            priority: story.priority().value(),
            text: story.text().to_string(),
            long_text: story.long_text().to_string(),
            business_value: story.business_value().description().to_string(),
            business_value_id: story.business_value().id(),
            tasks: story.tasks().iter().map(StoryTaskDto::from).collect(),
        }
    }
}
