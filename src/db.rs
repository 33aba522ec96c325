// connexion BD + initialisation du schéma

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use crate::models::{
    commune, district, forum, guide_plantation, pepiniere, photo_gallery, plantation, rapport,
    region, role, suivi_plantation, user_groups, user_permissions, users, zone_plantation,
};
use crate::services::role_service::RoleService;

pub async fn establish_connection(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(&config.url);
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    Database::connect(options)
        .await
        .map_err(|e| AppError::StoreUnavailable {
            message: format!("Failed to connect: {}", e),
        })
}

/// Crée les tables manquantes, parents avant enfants.
/// Sans effet sur les tables existantes.
pub async fn create_schema(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, role::Entity).await?;
    create_table(db, &schema, users::Entity).await?;
    create_table(db, &schema, user_groups::Entity).await?;
    create_table(db, &schema, user_permissions::Entity).await?;
    create_table(db, &schema, commune::Entity).await?;
    create_table(db, &schema, district::Entity).await?;
    create_table(db, &schema, region::Entity).await?;
    create_table(db, &schema, zone_plantation::Entity).await?;
    create_table(db, &schema, plantation::Entity).await?;
    create_table(db, &schema, guide_plantation::Entity).await?;
    create_table(db, &schema, suivi_plantation::Entity).await?;
    create_table(db, &schema, pepiniere::Entity).await?;
    create_table(db, &schema, photo_gallery::Entity).await?;
    create_table(db, &schema, forum::Entity).await?;
    create_table(db, &schema, rapport::Entity).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let table = entity.table_name().to_string();
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();

    debug!(%table, "creating table if missing");
    db.execute(db.get_database_backend().build(&stmt)).await?;
    Ok(())
}

/// Point d'entrée à appeler une fois au démarrage, après la mise en place
/// du schéma: garantit le rôle "admin".
pub async fn bootstrap(db: &DatabaseConnection) -> Result<role::Model> {
    create_schema(db).await?;
    let admin = RoleService::ensure_admin_role(db).await?;
    info!(role_id = admin.id, "schema ready, admin role present");
    Ok(admin)
}
