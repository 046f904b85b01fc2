//! Demo data for fresh stores

use tracing::info;

use crate::application::ports::outbound::{RepositoryError, StoryRepositoryPort};
use crate::domain::aggregates::UserStory;
use crate::domain::entities::StoryTask;
use crate::domain::value_objects::{BusinessValue, Priority};

/// The story a freshly seeded store starts with
pub fn demo_story() -> UserStory {
    let mut story = UserStory::new(
        "My demo user story",
        Priority::HIGHEST,
        "Info",
        "Provide long text here",
        BusinessValue::BV900,
    );
    story.add_task(StoryTask::new("My long description"));
    story
}

/// Insert the demo story unless the store already holds stories
///
/// Returns whether anything was written.
pub async fn seed_demo_data(repository: &dyn StoryRepositoryPort) -> Result<bool, RepositoryError> {
    if !repository.get_all().await?.is_empty() {
        info!("Store already has stories, skipping demo data");
        return Ok(false);
    }

    let mut stories = [demo_story()];
    repository.insert(&mut stories).await?;
    if let Some(id) = stories[0].id() {
        info!(story_id = %id, "Seeded demo story");
    }
    Ok(true)
}
