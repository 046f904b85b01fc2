use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{RepositoryError, StoryRepositoryPort};
use crate::domain::aggregates::UserStory;
use crate::domain::entities::StoryTask;
use crate::domain::value_objects::{BusinessValue, Priority, StoryId, TaskId};

type StoryRow = (i64, String, i32, String, String, i32);
type TaskRow = (i64, i64, String);

pub struct SqliteStoryRepository {
    pool: SqlitePool,
}

impl SqliteStoryRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create tables if not exists
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS stories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                priority INTEGER NOT NULL,
                text TEXT NOT NULL,
                long_text TEXT NOT NULL,
                business_value_id INTEGER NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#).execute(&pool).await?;

        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS story_tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                story_id INTEGER NOT NULL REFERENCES stories(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                description TEXT NOT NULL
            )
        "#).execute(&pool).await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_story_tasks_story ON story_tasks (story_id, position)")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn tasks_for(&self, story_id: i64) -> Result<Vec<TaskRow>, RepositoryError> {
        sqlx::query_as(
            "SELECT id, story_id, description FROM story_tasks WHERE story_id = ? ORDER BY position",
        )
        .bind(story_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

/// Rebuild an aggregate, re-checking the value objects stored in the row
fn hydrate(row: StoryRow, tasks: Vec<TaskRow>) -> Result<UserStory, RepositoryError> {
    let (id, title, priority, text, long_text, business_value_id) = row;

    let priority = Priority::create(priority)
        .map_err(|e| RepositoryError::Corrupt(format!("story {}: {}", id, e)))?;
    let business_value = BusinessValue::from_id(business_value_id).ok_or_else(|| {
        RepositoryError::Corrupt(format!(
            "story {}: unknown business value {}",
            id, business_value_id
        ))
    })?;

    let mut story =
        UserStory::new(title, priority, text, long_text, business_value).with_id(StoryId::new(id));
    for (task_id, _, description) in tasks {
        story.add_task(StoryTask::new(description).with_id(TaskId::new(task_id)));
    }
    Ok(story)
}

#[async_trait]
impl StoryRepositoryPort for SqliteStoryRepository {
    async fn insert(&self, stories: &mut [UserStory]) -> Result<(), RepositoryError> {
        if let Some(id) = stories.iter().find_map(|s| s.id()) {
            return Err(RepositoryError::AlreadyPersisted(id));
        }

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut assigned = Vec::with_capacity(stories.len());

        for story in stories.iter() {
            let result = sqlx::query(
                "INSERT INTO stories (title, priority, text, long_text, business_value_id) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(story.title())
            .bind(story.priority().value())
            .bind(story.text())
            .bind(story.long_text())
            .bind(story.business_value().id())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
            let story_id = StoryId::new(result.last_insert_rowid());

            let mut task_ids = Vec::with_capacity(story.tasks().len());
            for (position, task) in story.tasks().iter().enumerate() {
                let result = sqlx::query(
                    "INSERT INTO story_tasks (story_id, position, description) VALUES (?, ?, ?)",
                )
                .bind(story_id.value())
                .bind(position as i64)
                .bind(task.description())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
                task_ids.push(TaskId::new(result.last_insert_rowid()));
            }

            assigned.push((story_id, task_ids));
        }

        tx.commit().await.map_err(db_error)?;

        for (story, (story_id, task_ids)) in stories.iter_mut().zip(assigned) {
            story.mark_persisted(story_id, task_ids);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: StoryId) -> Result<Option<UserStory>, RepositoryError> {
        let row: Option<StoryRow> = sqlx::query_as(
            "SELECT id, title, priority, text, long_text, business_value_id FROM stories WHERE id = ?",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        match row {
            Some(row) => {
                let tasks = self.tasks_for(row.0).await?;
                hydrate(row, tasks).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<UserStory>, RepositoryError> {
        let rows: Vec<StoryRow> = sqlx::query_as(
            "SELECT id, title, priority, text, long_text, business_value_id FROM stories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let task_rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, story_id, description FROM story_tasks ORDER BY story_id, position",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let mut tasks_by_story: HashMap<i64, Vec<TaskRow>> = HashMap::new();
        for task in task_rows {
            tasks_by_story.entry(task.1).or_default().push(task);
        }

        rows.into_iter()
            .map(|row| {
                let tasks = tasks_by_story.remove(&row.0).unwrap_or_default();
                hydrate(row, tasks)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::connect_sqlite;
    use crate::infrastructure::seed::demo_story;

    async fn repository() -> SqliteStoryRepository {
        let pool = connect_sqlite("sqlite::memory:").await.unwrap();
        SqliteStoryRepository::new(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trip() {
        let repository = repository().await;
        let mut story = demo_story();
        story.add_task(StoryTask::new("Second task"));
        let mut stories = [story];

        repository.insert(&mut stories).await.unwrap();
        let id = stories[0].id().unwrap();
        let loaded = repository.find_by_id(id).await.unwrap().unwrap();

        assert!(id.value() >= 0);
        assert_eq!(loaded, stories[0]);
        let descriptions: Vec<&str> = loaded.tasks().iter().map(|t| t.description()).collect();
        assert_eq!(descriptions, vec!["My long description", "Second task"]);
    }

    #[tokio::test]
    async fn test_get_all_keeps_id_order_and_groups_tasks() {
        let repository = repository().await;
        let mut stories = [demo_story(), demo_story()];
        repository.insert(&mut stories).await.unwrap();

        let all = repository.get_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert!(all[0].id() < all[1].id());
        assert!(all.iter().all(|s| s.tasks().len() == 1));
    }

    #[tokio::test]
    async fn test_unknown_id_is_absent() {
        let repository = repository().await;
        assert!(repository.find_by_id(StoryId::new(-100)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_business_value_is_reported() {
        let repository = repository().await;
        sqlx::query(
            "INSERT INTO stories (title, priority, text, long_text, business_value_id) VALUES ('x', 1, '', '', 10)",
        )
        .execute(repository.pool())
        .await
        .unwrap();

        let err = repository.get_all().await.unwrap_err();

        assert!(matches!(err, RepositoryError::Corrupt(_)));
    }
}
