use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::migration::Migrator;

pub type OrmConn = DatabaseConnection;

/// Create a SeaORM connection pool.
pub async fn create_orm_conn(database_url: &str) -> Result<OrmConn> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(20)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Apply every pending schema migration.
pub async fn run_migrations(conn: &OrmConn) -> Result<()> {
    Migrator::up(conn, None).await?;
    Ok(())
}
