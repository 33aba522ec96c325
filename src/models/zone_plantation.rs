// ============================================================================
// MODÈLE : ZONE PLANTATION
// ============================================================================
//
// Colonnes de la table zone_plantation:
//   - id (INTEGER, PRIMARY KEY)
//   - localisation (VARCHAR(255), NOT NULL)
//   - region_id (FK vers region, ON DELETE CASCADE)
//   - district_id (FK vers district, ON DELETE CASCADE)
//   - commune_id (FK vers commune, ON DELETE CASCADE)
//
// Points d'attention:
//   - Les trois références sont indépendantes: rien n'oblige district_id à être
//     le district de region_id. Voir ZoneService::hierarchy_consistent pour
//     vérifier après coup.
//
// ============================================================================

use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "zone_plantation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub localisation: String,

    pub region_id: i32,

    pub district_id: i32,

    pub commune_id: i32,

    pub date_creation: DateTimeUtc,

    pub date_modification: DateTimeUtc,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.localisation)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::RegionId",
        to = "super::region::Column::Id",
        on_delete = "Cascade"
    )]
    Region,

    #[sea_orm(
        belongs_to = "super::district::Entity",
        from = "Column::DistrictId",
        to = "super::district::Column::Id",
        on_delete = "Cascade"
    )]
    District,

    #[sea_orm(
        belongs_to = "super::commune::Entity",
        from = "Column::CommuneId",
        to = "super::commune::Column::Id",
        on_delete = "Cascade"
    )]
    Commune,

    #[sea_orm(has_many = "super::plantation::Entity")]
    Plantations,
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::district::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::District.def()
    }
}

impl Related<super::commune::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Commune.def()
    }
}

impl Related<super::plantation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plantations.def()
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
