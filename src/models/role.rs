// ============================================================================
// MODÈLE : ROLE
// ============================================================================
//
// Colonnes de la table role:
//   - id (INTEGER, PRIMARY KEY)
//   - nom (VARCHAR(255), UNIQUE, NOT NULL) - admin | agriculteur | chercheur
//   - date_creation / date_modification (TIMESTAMP, posés par le store)
//
// Points d'attention:
//   - Au plus une ligne par valeur de nom (contrainte UNIQUE)
//   - Aucune suppression: users.role_id est ON DELETE RESTRICT
//   - La ligne "admin" est garantie au démarrage (RoleService::ensure_admin_role)
//
// ============================================================================

use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub nom: RoleName,

    pub date_creation: DateTimeUtc,

    pub date_modification: DateTimeUtc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(255))")]
pub enum RoleName {
    #[default]
    #[sea_orm(string_value = "admin")]
    #[serde(rename = "admin")]
    Admin,

    #[sea_orm(string_value = "agriculteur")]
    #[serde(rename = "agriculteur")]
    Agriculteur,

    #[sea_orm(string_value = "chercheur")]
    #[serde(rename = "chercheur")]
    Chercheur,
}

impl RoleName {
    pub fn label(&self) -> &'static str {
        match self {
            RoleName::Admin => "Admin",
            RoleName::Agriculteur => "Agriculteur",
            RoleName::Chercheur => "Chercheur",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nom)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        super::stamp(insert, &mut self.date_creation, &mut self.date_modification);
        Ok(self)
    }
}

impl super::DefaultOrder for Entity {
    fn ordered(select: Select<Self>) -> Select<Self> {
        select
            .order_by_asc(Column::DateCreation)
            .order_by_asc(Column::Id)
    }
}
