use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "forum")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub topic: String,

    pub message: String,

    /// Email de l'auteur (users.email)
    pub utilisateur_email: String,

    pub date_creation: DateTimeUtc,

    pub date_modification: DateTimeUtc,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.topic)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UtilisateurEmail",
        to = "super::users::Column::Email",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    Utilisateur,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Utilisateur.def()
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
