use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document, DateTime as BsonDateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

#[cfg(test)]
use mockall::automock;

use crate::errors::{AppError, Result};
use crate::models::cricket::{Match, MatchUpdate};

pub const MATCHES_COLLECTION: &str = "matches";

/// Durable storage for match documents. Matches are created and then updated
/// field by field; nothing in scope deletes them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Every stored match, in storage order.
    async fn list_all(&self) -> Result<Vec<Match>>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Match>;
    async fn insert(&self, new_match: Match) -> Result<Match>;
    async fn update(&self, id: ObjectId, update: MatchUpdate) -> Result<Match>;
    async fn ping(&self) -> bool;
}

/// Document written for a match. The date goes in as a BSON Date so the
/// collection stays sortable and readable by other Mongo clients.
pub fn to_store_document(m: &Match) -> Result<Document> {
    let mut document = to_document(m)?;
    if let Some(date) = m.date {
        document.insert("date", BsonDateTime::from_millis(date.timestamp_millis()));
    }
    Ok(document)
}

pub struct MongoMatchRepository {
    db: Database,
    collection: Collection<Match>,
}

impl MongoMatchRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.collection(MATCHES_COLLECTION);
        Self { db, collection }
    }
}

#[async_trait]
impl MatchRepository for MongoMatchRepository {
    async fn list_all(&self) -> Result<Vec<Match>> {
        let cursor = self.collection.find(doc! {}).await?;
        let matches: Vec<Match> = cursor.try_collect().await?;
        Ok(matches)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Match> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(AppError::DocumentNotFound)
    }

    async fn insert(&self, mut new_match: Match) -> Result<Match> {
        let document = to_store_document(&new_match)?;
        let insert_result = self
            .collection
            .clone_with_type::<Document>()
            .insert_one(document)
            .await?;

        let id = insert_result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::invalid_data("Failed to get inserted ID"))?;
        new_match.id = Some(id);

        Ok(new_match)
    }

    async fn update(&self, id: ObjectId, update: MatchUpdate) -> Result<Match> {
        let fields = to_document(&update)?;

        self.collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(AppError::DocumentNotFound)
    }

    async fn ping(&self) -> bool {
        self.db.run_command(doc! { "ping": 1 }).await.is_ok()
    }
}

/// Stand-in used when the store could not be set up at startup. The server
/// keeps running; every store call fails.
pub struct UnavailableMatchRepository {
    reason: String,
}

impl UnavailableMatchRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> AppError {
        AppError::unavailable(format!("match store is not connected: {}", self.reason))
    }
}

#[async_trait]
impl MatchRepository for UnavailableMatchRepository {
    async fn list_all(&self) -> Result<Vec<Match>> {
        Err(self.error())
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Match> {
        Err(self.error())
    }

    async fn insert(&self, _new_match: Match) -> Result<Match> {
        Err(self.error())
    }

    async fn update(&self, _id: ObjectId, _update: MatchUpdate) -> Result<Match> {
        Err(self.error())
    }

    async fn ping(&self) -> bool {
        false
    }
}
