// Hiérarchie géographique: commune -> district -> region.
// Les zones de plantation sont dans zone_service.

use sea_orm::*;
use tracing::debug;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::dto::{
    CommuneChanges, DistrictChanges, NewCommune, NewDistrict, NewRegion, RegionChanges,
};
use crate::models::{commune, district, region};
use crate::services::crud;

pub struct CommuneService;

impl CommuneService {
    pub async fn create(db: &DatabaseConnection, request: NewCommune) -> Result<commune::Model> {
        request.validate()?;

        let new_commune = commune::ActiveModel {
            nom: Set(request.nom),
            ..Default::default()
        };

        let created = new_commune
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "commune"))?;
        debug!(id = created.id, "commune created");
        Ok(created)
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<commune::Model> {
        crud::find_by_id::<commune::Entity>(db, "commune", id).await
    }

    /// Plus anciennes d'abord.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<commune::Model>> {
        crud::list::<commune::Entity>(db).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: CommuneChanges,
    ) -> Result<commune::Model> {
        changes.validate()?;
        let mut commune: commune::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(nom) = changes.nom {
            commune.nom = Set(nom);
        }

        commune
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "commune"))
    }

    /// Supprime la commune et toute sa descendance (districts, régions,
    /// zones, plantations et leurs suivis).
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<commune::Entity>(db, "commune", id).await
    }
}

pub struct DistrictService;

impl DistrictService {
    pub async fn create(db: &DatabaseConnection, request: NewDistrict) -> Result<district::Model> {
        request.validate()?;
        crud::ensure_exists::<commune::Entity>(db, "commune", request.commune_id).await?;

        let new_district = district::ActiveModel {
            nom: Set(request.nom),
            commune_id: Set(request.commune_id),
            ..Default::default()
        };

        new_district
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "district"))
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<district::Model> {
        crud::find_by_id::<district::Entity>(db, "district", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<district::Model>> {
        crud::list::<district::Entity>(db).await
    }

    pub async fn list_for_commune(
        db: &DatabaseConnection,
        commune_id: i32,
    ) -> Result<Vec<district::Model>> {
        crud::list_where::<district::Entity, _>(db, district::Column::CommuneId, commune_id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: DistrictChanges,
    ) -> Result<district::Model> {
        changes.validate()?;
        let mut district: district::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(nom) = changes.nom {
            district.nom = Set(nom);
        }
        if let Some(commune_id) = changes.commune_id {
            crud::ensure_exists::<commune::Entity>(db, "commune", commune_id).await?;
            district.commune_id = Set(commune_id);
        }

        district
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "district"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<district::Entity>(db, "district", id).await
    }
}

pub struct RegionService;

impl RegionService {
    pub async fn create(db: &DatabaseConnection, request: NewRegion) -> Result<region::Model> {
        request.validate()?;
        crud::ensure_exists::<district::Entity>(db, "district", request.district_id).await?;

        let new_region = region::ActiveModel {
            nom: Set(request.nom),
            district_id: Set(request.district_id),
            ..Default::default()
        };

        new_region
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "region"))
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<region::Model> {
        crud::find_by_id::<region::Entity>(db, "region", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<region::Model>> {
        crud::list::<region::Entity>(db).await
    }

    pub async fn list_for_district(
        db: &DatabaseConnection,
        district_id: i32,
    ) -> Result<Vec<region::Model>> {
        crud::list_where::<region::Entity, _>(db, region::Column::DistrictId, district_id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: RegionChanges,
    ) -> Result<region::Model> {
        changes.validate()?;
        let mut region: region::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(nom) = changes.nom {
            region.nom = Set(nom);
        }
        if let Some(district_id) = changes.district_id {
            crud::ensure_exists::<district::Entity>(db, "district", district_id).await?;
            region.district_id = Set(district_id);
        }

        region
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "region"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<region::Entity>(db, "region", id).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::db::test_support::{memory_db, seed_chain};
    use crate::models::{plantation, suivi_plantation, zone_plantation};
    use crate::models::dto::NewSuiviPlantation;
    use crate::services::followup_service::SuiviService;

    #[tokio::test]
    async fn test_communes_listed_oldest_first() {
        let db = memory_db().await;
        for nom in ["Antsirabe", "Ambositra", "Fianarantsoa"] {
            CommuneService::create(&db, NewCommune { nom: nom.into() })
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let noms: Vec<String> = CommuneService::list(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.nom)
            .collect();

        assert_eq!(noms, vec!["Antsirabe", "Ambositra", "Fianarantsoa"]);
    }

    #[tokio::test]
    async fn test_delete_commune_cascades_to_all_descendants() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Toamasina").await;
        SuiviService::create(
            &db,
            NewSuiviPlantation {
                observation: "premières pousses".into(),
                plantation_id: chain.plantation.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        CommuneService::delete(&db, chain.commune.id).await.unwrap();

        assert_eq!(district::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(region::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(zone_plantation::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(plantation::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(suivi_plantation::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_leaves_other_communes_alone() {
        let db = memory_db().await;
        let gone = seed_chain(&db, "Mahajanga").await;
        let kept = seed_chain(&db, "Toliara").await;

        CommuneService::delete(&db, gone.commune.id).await.unwrap();

        assert_eq!(
            DistrictService::list(&db).await.unwrap(),
            vec![kept.district.clone()]
        );
        assert_eq!(
            RegionService::list_for_district(&db, kept.district.id)
                .await
                .unwrap(),
            vec![kept.region]
        );
    }

    #[tokio::test]
    async fn test_district_requires_existing_commune() {
        let db = memory_db().await;

        let err = DistrictService::create(
            &db,
            NewDistrict {
                nom: "Orphelin".into(),
                commune_id: 77,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::ReferenceError { .. }));
    }

    #[tokio::test]
    async fn test_store_rejects_dangling_foreign_key() {
        let db = memory_db().await;

        let raw = district::ActiveModel {
            nom: Set("Sans commune".into()),
            commune_id: Set(4242),
            ..Default::default()
        };
        let err = raw
            .insert(&db)
            .await
            .map_err(|e| AppError::from_db(e, "district"))
            .unwrap_err();

        assert!(matches!(err, AppError::ReferenceError { .. }));
    }

    #[tokio::test]
    async fn test_client_supplied_creation_date_ignored() {
        let db = memory_db().await;
        let forged = chrono::DateTime::parse_from_rfc3339("2001-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);

        let raw = commune::ActiveModel {
            nom: Set("Horodatée".into()),
            date_creation: Set(forged),
            ..Default::default()
        };
        let created = raw.insert(&db).await.unwrap();
        assert_ne!(created.date_creation, forged);

        let updated = CommuneService::update(
            &db,
            created.id,
            CommuneChanges {
                nom: Some("Renommée".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.nom, "Renommée");
        assert_eq!(updated.date_creation, created.date_creation);
        assert!(updated.date_modification >= created.date_modification);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_commune() {
        let db = memory_db().await;

        let err = CommuneService::update(&db, 9, CommuneChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = CommuneService::delete(&db, 9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_move_district_to_other_commune() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Antalaha").await;
        let other = CommuneService::create(&db, NewCommune { nom: "Sambava".into() })
            .await
            .unwrap();

        let moved = DistrictService::update(
            &db,
            chain.district.id,
            DistrictChanges {
                commune_id: Some(other.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(moved.commune_id, other.id);
        assert_eq!(
            DistrictService::list_for_commune(&db, other.id).await.unwrap(),
            vec![moved]
        );
        assert!(DistrictService::list_for_commune(&db, chain.commune.id)
            .await
            .unwrap()
            .is_empty());
    }
}
