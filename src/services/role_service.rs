use sea_orm::*;
use tracing::{info, warn};

use crate::errors::{AppError, Result};
use crate::models::dto::NewRole;
use crate::models::role::{self, RoleName};
use crate::models::parse_choice;
use crate::services::crud;

pub struct RoleService;

impl RoleService {
    /// Garantit l'existence du rôle "admin" et le retourne.
    /// Idempotent, et sûr si deux instances démarrent en même temps sur un
    /// store vierge: la contrainte UNIQUE sur role.nom tranche.
    pub async fn ensure_admin_role(db: &DatabaseConnection) -> Result<role::Model> {
        if let Some(existing) = Self::find_by_name(db, RoleName::Admin).await? {
            return Ok(existing);
        }

        Self::create_or_fetch(db, RoleName::Admin).await
    }

    /// Insère le rôle; si un autre appelant l'a inséré entre-temps, relit la
    /// ligne existante au lieu de remonter la violation d'unicité.
    pub async fn create_or_fetch(db: &DatabaseConnection, nom: RoleName) -> Result<role::Model> {
        match Self::insert(db, nom).await {
            Ok(created) => {
                info!(role = %nom, id = created.id, "role created");
                Ok(created)
            }
            Err(AppError::UniquenessViolation { .. }) => {
                warn!(role = %nom, "role already created concurrently, reusing it");
                Self::find_by_name(db, nom)
                    .await?
                    .ok_or_else(|| AppError::not_found("role", nom))
            }
            Err(e) => Err(e),
        }
    }

    /// Création explicite: une seconde ligne avec le même nom échoue
    /// (UniquenessViolation).
    pub async fn create(db: &DatabaseConnection, request: NewRole) -> Result<role::Model> {
        let nom = match request.nom.as_deref() {
            Some(raw) => parse_choice::<RoleName>("nom", raw)?,
            None => RoleName::default(),
        };

        Self::insert(db, nom).await
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<role::Model> {
        crud::find_by_id::<role::Entity>(db, "role", id).await
    }

    pub async fn find_by_name(db: &DatabaseConnection, nom: RoleName) -> Result<Option<role::Model>> {
        Ok(role::Entity::find()
            .filter(role::Column::Nom.eq(nom))
            .one(db)
            .await?)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<role::Model>> {
        crud::list::<role::Entity>(db).await
    }

    async fn insert(db: &DatabaseConnection, nom: RoleName) -> Result<role::Model> {
        let new_role = role::ActiveModel {
            nom: Set(nom),
            ..Default::default()
        };

        new_role
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "role"))
    }
}
