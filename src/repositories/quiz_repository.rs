use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, db::Subscription, errors::AppResult, models::domain::Quiz};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)>;
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn delete(&self, id: &str) -> AppResult<bool>;

    /// Open a snapshot feed over the whole collection. The caller owns the
    /// returned subscription and must drop or unsubscribe it when the
    /// consuming view goes away.
    fn subscribe_all(&self, poll_interval: Duration) -> Subscription<Vec<Quiz>>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let category_index = IndexModel::builder()
            .keys(doc! { "category": 1, "difficulty": 1 })
            .options(
                IndexOptions::builder()
                    .name("category_difficulty".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(category_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        let quizzes = self
            .collection
            .find(doc! {})
            .skip(offset.max(0) as u64)
            .limit(limit.max(0))
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((quizzes, total))
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection
            .replace_one(doc! { "id": &quiz.id }, &quiz)
            .await?;
        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    fn subscribe_all(&self, poll_interval: Duration) -> Subscription<Vec<Quiz>> {
        let collection = self.collection.clone();

        Subscription::spawn(poll_interval, move || {
            let collection = collection.clone();
            async move {
                match collection.find(doc! {}).await {
                    Ok(cursor) => match cursor.try_collect().await {
                        Ok(quizzes) => Some(quizzes),
                        Err(err) => {
                            log::warn!("quiz snapshot collect failed: {}", err);
                            None
                        }
                    },
                    Err(err) => {
                        log::warn!("quiz snapshot query failed: {}", err);
                        None
                    }
                }
            }
        })
    }
}
