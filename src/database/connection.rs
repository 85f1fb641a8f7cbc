use std::sync::Arc;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::{AppConfig, DEFAULT_DATABASE};
use crate::errors::Result;
use crate::repository::match_repository::{
    MatchRepository, MongoMatchRepository, UnavailableMatchRepository,
};

pub async fn get_db_client(config: &AppConfig) -> Result<Database> {
    let options = ClientOptions::parse(&config.mongodb_uri).await?;
    let client = Client::with_options(options)?;

    let db = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

    Ok(db)
}

/// Connects the match store. A failure here is logged and never fatal: the
/// server still starts, and store-backed requests report the outage.
pub async fn match_repository(config: &AppConfig) -> Arc<dyn MatchRepository> {
    let db = match get_db_client(config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("❌ MongoDB connection error: {}", e);
            return Arc::new(UnavailableMatchRepository::new(e.to_string()));
        }
    };

    match db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => tracing::info!("✅ Connected to MongoDB database: {}", db.name()),
        // The driver reconnects on its own; requests fail until it does.
        Err(e) => tracing::error!("❌ MongoDB connection error: {}", e),
    }

    Arc::new(MongoMatchRepository::new(db))
}
