use anyhow::{Context, Result};
use deadpool_diesel::postgres::{Manager, Pool};

pub type DbPool = Pool;

pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
    let pool = Pool::builder(manager)
        .max_size(10)
        .build()
        .context("Failed to create database pool")?;

    Ok(pool)
}
