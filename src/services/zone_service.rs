use sea_orm::*;
use tracing::{debug, warn};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::dto::{NewZonePlantation, ZonePlantationChanges};
use crate::models::{commune, district, region, zone_plantation};
use crate::services::crud;

pub struct ZoneService;

impl ZoneService {
    /// Les trois références doivent exister, mais ne sont pas recoupées entre
    /// elles (une zone peut pointer un district qui n'est pas celui de sa
    /// région). Voir hierarchy_consistent.
    pub async fn create(
        db: &DatabaseConnection,
        request: NewZonePlantation,
    ) -> Result<zone_plantation::Model> {
        request.validate()?;
        crud::ensure_exists::<region::Entity>(db, "region", request.region_id).await?;
        crud::ensure_exists::<district::Entity>(db, "district", request.district_id).await?;
        crud::ensure_exists::<commune::Entity>(db, "commune", request.commune_id).await?;

        let new_zone = zone_plantation::ActiveModel {
            localisation: Set(request.localisation),
            region_id: Set(request.region_id),
            district_id: Set(request.district_id),
            commune_id: Set(request.commune_id),
            ..Default::default()
        };

        let zone = new_zone
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "zone plantation"))?;

        if !Self::hierarchy_consistent(db, &zone).await? {
            warn!(id = zone.id, "zone references a region/district/commune outside one chain");
        }
        debug!(id = zone.id, "zone plantation created");
        Ok(zone)
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<zone_plantation::Model> {
        crud::find_by_id::<zone_plantation::Entity>(db, "zone plantation", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<zone_plantation::Model>> {
        crud::list::<zone_plantation::Entity>(db).await
    }

    pub async fn list_for_region(
        db: &DatabaseConnection,
        region_id: i32,
    ) -> Result<Vec<zone_plantation::Model>> {
        crud::list_where::<zone_plantation::Entity, _>(
            db,
            zone_plantation::Column::RegionId,
            region_id,
        )
        .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: ZonePlantationChanges,
    ) -> Result<zone_plantation::Model> {
        changes.validate()?;
        let mut zone: zone_plantation::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(localisation) = changes.localisation {
            zone.localisation = Set(localisation);
        }
        if let Some(region_id) = changes.region_id {
            crud::ensure_exists::<region::Entity>(db, "region", region_id).await?;
            zone.region_id = Set(region_id);
        }
        if let Some(district_id) = changes.district_id {
            crud::ensure_exists::<district::Entity>(db, "district", district_id).await?;
            zone.district_id = Set(district_id);
        }
        if let Some(commune_id) = changes.commune_id {
            crud::ensure_exists::<commune::Entity>(db, "commune", commune_id).await?;
            zone.commune_id = Set(commune_id);
        }

        zone.update(db)
            .await
            .map_err(|e| AppError::from_db(e, "zone plantation"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<zone_plantation::Entity>(db, "zone plantation", id).await
    }

    /// Vrai si district_id est le district de la région et commune_id la
    /// commune de ce district. Lecture seule, rien n'est corrigé.
    pub async fn hierarchy_consistent(
        db: &DatabaseConnection,
        zone: &zone_plantation::Model,
    ) -> Result<bool> {
        let Some(region) = zone.find_related(region::Entity).one(db).await? else {
            return Ok(false);
        };
        if region.district_id != zone.district_id {
            return Ok(false);
        }

        let Some(district) = region.find_related(district::Entity).one(db).await? else {
            return Ok(false);
        };
        Ok(district.commune_id == zone.commune_id)
    }
}
