// ============================================================================
// MODÈLE : PLANTATION
// ============================================================================
//
// Colonnes de la table plantation:
//   - id (INTEGER, PRIMARY KEY)
//   - nom_plantation (VARCHAR(255), NOT NULL)
//   - type_plantation (VARCHAR(255), NOT NULL) - voir TypePlantation
//   - etat (VARCHAR(255), NOT NULL) - voir EtatPlantation
//   - zone_plantation_id (FK vers zone_plantation, ON DELETE CASCADE)
//   - date_plantation (DATE, posée à la création, jamais modifiée)
//   - date_creation / date_modification (TIMESTAMP, posés par le store)
//
// Points d'attention:
//   - Liste par défaut triée par date_plantation (et non date_creation)
//   - Supprimer une plantation supprime guides, suivis, pépinières, galeries
//
// ============================================================================

use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plantation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nom_plantation: String,

    pub type_plantation: TypePlantation,

    pub etat: EtatPlantation,

    pub zone_plantation_id: i32,

    pub date_plantation: Date,

    pub date_creation: DateTimeUtc,

    pub date_modification: DateTimeUtc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(255))")]
pub enum TypePlantation {
    #[sea_orm(string_value = "agroforesterie")]
    #[serde(rename = "agroforesterie")]
    Agroforesterie,

    #[sea_orm(string_value = "mangroves")]
    #[serde(rename = "mangroves")]
    Mangroves,

    #[sea_orm(string_value = "agricultures")]
    #[serde(rename = "agricultures")]
    Agricultures,

    #[sea_orm(string_value = "permaculture")]
    #[serde(rename = "permaculture")]
    Permaculture,
}

impl TypePlantation {
    pub fn label(&self) -> &'static str {
        match self {
            TypePlantation::Agroforesterie => "AgroForesterie",
            TypePlantation::Mangroves => "Mangroves",
            TypePlantation::Agricultures => "Agricultures",
            TypePlantation::Permaculture => "Permaculture",
        }
    }
}

/// Cycle de vie d'une plantation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(255))")]
pub enum EtatPlantation {
    #[sea_orm(string_value = "en preparation")]
    #[serde(rename = "en preparation")]
    EnPreparation,

    #[sea_orm(string_value = "en germination")]
    #[serde(rename = "en germination")]
    EnGermination,

    #[sea_orm(string_value = "en croissance")]
    #[serde(rename = "en croissance")]
    EnCroissance,

    #[sea_orm(string_value = "semee")]
    #[serde(rename = "semee")]
    Semee,

    #[sea_orm(string_value = "en repos")]
    #[serde(rename = "en repos")]
    EnRepos,

    #[sea_orm(string_value = "endommagee")]
    #[serde(rename = "endommagee")]
    Endommagee,

    #[sea_orm(string_value = "abandonnee")]
    #[serde(rename = "abandonnee")]
    Abandonnee,

    #[sea_orm(string_value = "replantee")]
    #[serde(rename = "replantee")]
    Replantee,
}

impl EtatPlantation {
    pub fn label(&self) -> &'static str {
        match self {
            EtatPlantation::EnPreparation => "En preparation",
            EtatPlantation::EnGermination => "En germination",
            EtatPlantation::EnCroissance => "En Croissance",
            EtatPlantation::Semee => "Semee",
            EtatPlantation::EnRepos => "En repos",
            EtatPlantation::Endommagee => "Endommagee",
            EtatPlantation::Abandonnee => "Abandonnee",
            EtatPlantation::Replantee => "Replantee",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nom_plantation)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::zone_plantation::Entity",
        from = "Column::ZonePlantationId",
        to = "super::zone_plantation::Column::Id",
        on_delete = "Cascade"
    )]
    ZonePlantation,

    #[sea_orm(has_many = "super::guide_plantation::Entity")]
    Guides,

    #[sea_orm(has_many = "super::suivi_plantation::Entity")]
    Suivis,

    #[sea_orm(has_many = "super::pepiniere::Entity")]
    Pepinieres,

    #[sea_orm(has_many = "super::photo_gallery::Entity")]
    Galleries,
}

impl Related<super::zone_plantation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ZonePlantation.def()
    }
}

impl Related<super::guide_plantation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guides.def()
    }
}

impl Related<super::suivi_plantation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suivis.def()
    }
}

impl Related<super::pepiniere::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pepinieres.def()
    }
}

impl Related<super::photo_gallery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Galleries.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        super::stamp_fixed_date(insert, &mut self.date_plantation);
        super::stamp(insert, &mut self.date_creation, &mut self.date_modification);
        Ok(self)
    }
}

impl super::DefaultOrder for Entity {
    fn ordered(select: Select<Self>) -> Select<Self> {
        select
            .order_by_asc(Column::DatePlantation)
            .order_by_asc(Column::DateCreation)
            .order_by_asc(Column::Id)
    }
}
