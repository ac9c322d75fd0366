use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

#[cfg(test)]
use mockall::automock;

use crate::{db::Database, errors::AppResult, models::domain::UserProfile};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserProfile>>;
    async fn upsert(&self, profile: UserProfile) -> AppResult<UserProfile>;
}

pub struct MongoUserProfileRepository {
    collection: Collection<UserProfile>,
}

impl MongoUserProfileRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("user_profiles");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for user_profiles collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for user_profiles collection");
        Ok(())
    }
}

#[async_trait]
impl UserProfileRepository for MongoUserProfileRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserProfile>> {
        let profile = self.collection.find_one(doc! { "id": id }).await?;
        Ok(profile)
    }

    async fn upsert(&self, profile: UserProfile) -> AppResult<UserProfile> {
        self.collection
            .replace_one(doc! { "id": &profile.id }, &profile)
            .upsert(true)
            .await?;
        Ok(profile)
    }
}
