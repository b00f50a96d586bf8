use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

use crate::{errors::ModelError, student};

/// Open a pooled connection using the given settings.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opts)
        .await
        .map_err(|e| ModelError::Connect(e.to_string()))?;
    debug!(max_connections = cfg.max_connections, in_memory = cfg.is_in_memory(), "database pool ready");
    Ok(db)
}

/// Create the `student` table from the entity definition when it does not exist yet.
/// Existing tables are left untouched.
pub async fn ensure_schema<C: ConnectionTrait>(db: &C) -> Result<(), ModelError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(student::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt))
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    info!(table = "student", "schema ensured");
    Ok(())
}

/// Connect and make sure the schema exists; the usual startup sequence.
pub async fn connect_and_prepare(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let db = connect_with_config(cfg).await?;
    ensure_schema(&db).await?;
    Ok(db)
}
