use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct DbService {
    pub(crate) db: DatabaseConnection,
}

impl DbService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        let mut opts = ConnectOptions::new(uri.to_owned());
        // An in-memory sqlite database lives and dies with its connection,
        // so the pool must hold exactly one, always open.
        if uri.starts_with("sqlite::memory:") {
            opts.max_connections(1).min_connections(1);
        }

        log::info!("Connecting to the database...");
        let db = Database::connect(opts).await?;
        log::info!("Running migrations...");
        Migrator::up(&db, None).await?;
        log::info!("Database ready.");
        Ok(Self { db })
    }
}
