// Pépinière rattachée à une plantation (type de plants).
// quantite_stock / capacite_prod: NULL autorisé, 0 si non fournis.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pepiniere")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub quantite_stock: Option<i32>,

    pub capacite_prod: Option<i32>,

    pub plantation_id: i32,

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
