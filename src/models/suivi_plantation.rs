// ============================================================================
// MODÈLE : SUIVI PLANTATION
// ============================================================================
//
// Une entrée de suivi de croissance pour une plantation.
//
// Colonnes de la table suivi_plantation:
//   - hauteur / diametre (DOUBLE, NULL) - 0.0 si non fournis à la création
//   - observation (VARCHAR(255), NOT NULL)
//   - date_suivi (DATE) - posée à la création, jamais modifiée
//   - plantation_id (FK vers plantation, ON DELETE CASCADE)
//
// ============================================================================

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suivi_plantation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub hauteur: Option<f64>,

    pub diametre: Option<f64>,

    pub observation: String,

    pub plantation_id: i32,

    pub date_suivi: Date,

    pub date_creation: DateTimeUtc,

    pub date_modification: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plantation::Entity",
        from = "Column::PlantationId",
        to = "super::plantation::Column::Id",
        on_delete = "Cascade"
    )]
    Plantation,
}

impl Related<super::plantation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plantation.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        super::stamp_fixed_date(insert, &mut self.date_suivi);
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
