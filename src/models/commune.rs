// ============================================================================
// MODÈLE : COMMUNE
// ============================================================================
//
// Racine de la hiérarchie géographique:
//   commune -> district -> region -> zone_plantation -> plantation
//
// Supprimer une commune supprime (CASCADE) ses districts et, par transitivité,
// tout ce qui en dépend. Les zones qui pointent directement la commune sont
// aussi supprimées.
//
// ============================================================================

use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commune")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nom: String,

    pub date_creation: DateTimeUtc,

    pub date_modification: DateTimeUtc,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nom)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::district::Entity")]
    Districts,

    #[sea_orm(has_many = "super::zone_plantation::Entity")]
    ZonePlantations,
}

impl Related<super::district::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Districts.def()
    }
}

impl Related<super::zone_plantation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ZonePlantations.def()
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
