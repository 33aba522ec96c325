// ============================================================================
// MODÈLE : USERS
// ============================================================================
//
// Colonnes de la table users:
//   - id (INTEGER, PRIMARY KEY)
//   - nom (VARCHAR(255), NOT NULL)
//   - prenom (VARCHAR(255), UNIQUE, NOT NULL)
//   - email (VARCHAR(255), UNIQUE, NOT NULL) - identifiant de connexion
//   - username (VARCHAR, UNIQUE, NULL)
//   - password_hash (VARCHAR, NULL) - opaque, géré par l'auth externe
//   - role_id (INTEGER, NOT NULL, FK vers role, ON DELETE RESTRICT)
//   - avatar (VARCHAR, NOT NULL) - chemin seulement, le fichier vit ailleurs
//   - is_active / is_staff / is_superuser (BOOLEAN)
//   - last_login (TIMESTAMP, NULL)
//   - date_joined / date_modification (TIMESTAMP, posés par le store)
//
// Points d'attention:
//   - forum et rapport référencent users.email (pas l'id)
//   - ON DELETE CASCADE vers forum, rapport, users_groups, users_user_permissions
//
// ============================================================================

use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR: &str = "uploads/avatars/avatar1.jpg";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nom: String,

    #[sea_orm(unique)]
    pub prenom: String,

    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(unique)]
    pub username: Option<String>,

    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub role_id: i32,

    pub avatar: String,

    pub is_active: bool,

    pub is_staff: bool,

    pub is_superuser: bool,

    pub last_login: Option<DateTimeUtc>,

    pub date_joined: DateTimeUtc,

    pub date_modification: DateTimeUtc,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prenom, self.nom)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_delete = "Restrict"
    )]
    Role,

    #[sea_orm(has_many = "super::forum::Entity")]
    Forum,

    #[sea_orm(has_many = "super::rapport::Entity")]
    Rapport,

    #[sea_orm(has_many = "super::user_groups::Entity")]
    Groups,

    #[sea_orm(has_many = "super::user_permissions::Entity")]
    Permissions,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::forum::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forum.def()
    }
}

impl Related<super::rapport::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rapport.def()
    }
}

impl Related<super::user_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl Related<super::user_permissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permissions.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        super::stamp(insert, &mut self.date_joined, &mut self.date_modification);
        Ok(self)
    }
}

impl super::DefaultOrder for Entity {
    fn ordered(select: Select<Self>) -> Select<Self> {
        select
            .order_by_asc(Column::DateJoined)
            .order_by_asc(Column::Id)
    }
}
