// connexion BD + création du schéma

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityName, EntityTrait,
    Schema,
};

use crate::models::{transactions, users, wallets};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    create_schema(&db).await?;

    Ok(db)
}

/// Crée les tables users, wallets, transactions si elles n'existent pas
/// (ordre important à cause des clés étrangères)
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, wallets::Entity).await?;
    create_table(db, transactions::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = entity.table_name(), "table ready");
    Ok(())
}

/// Base SQLite en mémoire avec le schéma, pour les tests
/// Une seule connexion: chaque connexion `:memory:` a sa propre base
#[cfg(test)]
pub async fn connect_in_memory() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("in-memory database");
    create_schema(&db).await.expect("schema");
    db
}
