// Opérations communes à toutes les entités à clé i32:
// lecture par id, liste ordonnée, suppression, vérification de référence.

use sea_orm::*;
use tracing::debug;

use crate::errors::{AppError, Result};
use crate::models::DefaultOrder;

pub async fn find_by_id<E>(db: &DatabaseConnection, entity: &str, id: i32) -> Result<E::Model>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(entity, id))
}

pub async fn list<E>(db: &DatabaseConnection) -> Result<Vec<E::Model>>
where
    E: DefaultOrder,
{
    Ok(E::find_ordered().all(db).await?)
}

/// Enfants d'un parent, dans l'ordre par défaut de l'entité enfant.
pub async fn list_where<E, C>(db: &DatabaseConnection, column: C, parent: i32) -> Result<Vec<E::Model>>
where
    E: DefaultOrder,
    C: ColumnTrait,
{
    Ok(E::ordered(E::find().filter(column.eq(parent))).all(db).await?)
}

/// Supprime une ligne; la base supprime les dépendants (ON DELETE CASCADE).
pub async fn delete<E>(db: &DatabaseConnection, entity: &str, id: i32) -> Result<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    let result = E::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(entity, id));
    }

    debug!(entity, id, "deleted");
    Ok(())
}

/// Une clé étrangère vers une ligne absente est une ReferenceError,
/// pas un NotFound.
pub async fn ensure_exists<E>(db: &DatabaseConnection, entity: &str, id: i32) -> Result<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    match E::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(AppError::reference(entity, id)),
    }
}
