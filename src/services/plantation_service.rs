use sea_orm::*;
use tracing::debug;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::dto::{NewPlantation, PlantationChanges};
use crate::models::plantation::{self, EtatPlantation, TypePlantation};
use crate::models::{parse_choice, zone_plantation};
use crate::services::crud;

pub struct PlantationService;

impl PlantationService {
    /// type_plantation et etat doivent appartenir à leur domaine
    /// (InvalidValue sinon). date_plantation est posée ici, une fois.
    pub async fn create(db: &DatabaseConnection, request: NewPlantation) -> Result<plantation::Model> {
        request.validate()?;
        let type_plantation: TypePlantation =
            parse_choice("type_plantation", &request.type_plantation)?;
        let etat: EtatPlantation = parse_choice("etat", &request.etat)?;
        crud::ensure_exists::<zone_plantation::Entity>(
            db,
            "zone plantation",
            request.zone_plantation_id,
        )
        .await?;

        let new_plantation = plantation::ActiveModel {
            nom_plantation: Set(request.nom_plantation),
            type_plantation: Set(type_plantation),
            etat: Set(etat),
            zone_plantation_id: Set(request.zone_plantation_id),
            ..Default::default()
        };

        let created = new_plantation
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "plantation"))?;
        debug!(id = created.id, etat = %created.etat.label(), "plantation created");
        Ok(created)
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<plantation::Model> {
        crud::find_by_id::<plantation::Entity>(db, "plantation", id).await
    }

    /// Triées par date de plantation.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<plantation::Model>> {
        crud::list::<plantation::Entity>(db).await
    }

    pub async fn list_for_zone(
        db: &DatabaseConnection,
        zone_plantation_id: i32,
    ) -> Result<Vec<plantation::Model>> {
        crud::list_where::<plantation::Entity, _>(
            db,
            plantation::Column::ZonePlantationId,
            zone_plantation_id,
        )
        .await
    }

    pub async fn list_by_etat(
        db: &DatabaseConnection,
        etat: EtatPlantation,
    ) -> Result<Vec<plantation::Model>> {
        Ok(plantation::Entity::find()
            .filter(plantation::Column::Etat.eq(etat))
            .order_by_asc(plantation::Column::DatePlantation)
            .order_by_asc(plantation::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: PlantationChanges,
    ) -> Result<plantation::Model> {
        changes.validate()?;
        let mut plantation: plantation::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(nom) = changes.nom_plantation {
            plantation.nom_plantation = Set(nom);
        }
        if let Some(raw) = changes.type_plantation.as_deref() {
            plantation.type_plantation = Set(parse_choice("type_plantation", raw)?);
        }
        if let Some(raw) = changes.etat.as_deref() {
            plantation.etat = Set(parse_choice("etat", raw)?);
        }
        if let Some(zone_id) = changes.zone_plantation_id {
            crud::ensure_exists::<zone_plantation::Entity>(db, "zone plantation", zone_id).await?;
            plantation.zone_plantation_id = Set(zone_id);
        }

        plantation
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "plantation"))
    }

    /// Supprime la plantation et ses guides, suivis, pépinières, galeries.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<plantation::Entity>(db, "plantation", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{memory_db, seed_chain};

    fn request(zone_id: i32, type_plantation: &str, etat: &str) -> NewPlantation {
        NewPlantation {
            nom_plantation: "Baobabs".into(),
            type_plantation: type_plantation.into(),
            etat: etat.into(),
            zone_plantation_id: zone_id,
        }
    }

    #[tokio::test]
    async fn test_invalid_type_is_rejected() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Menabe").await;

        let err = PlantationService::create(&db, request(chain.zone.id, "invalid_value", "semee"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidValue { ref field, .. } if field == "type_plantation"));
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_invalid_etat_is_rejected() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Menabe").await;

        let err = PlantationService::create(&db, request(chain.zone.id, "permaculture", "fanée"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidValue { ref field, .. } if field == "etat"));
    }

    #[tokio::test]
    async fn test_planting_date_fixed_at_creation() {
        let db = memory_db().await;
        let today = chrono::Utc::now().date_naive();
        let chain = seed_chain(&db, "Menabe").await;
        let original = chain.plantation;

        assert!(
            original.date_plantation == today || Some(original.date_plantation) == today.succ_opt()
        );

        let updated = PlantationService::update(
            &db,
            original.id,
            PlantationChanges {
                etat: Some("en croissance".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.etat, EtatPlantation::EnCroissance);
        assert_eq!(updated.date_plantation, original.date_plantation);
        assert_eq!(updated.date_creation, original.date_creation);
        assert_eq!(
            PlantationService::list_by_etat(&db, EtatPlantation::EnCroissance)
                .await
                .unwrap(),
            vec![updated]
        );
    }

    #[tokio::test]
    async fn test_forged_planting_date_ignored() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Menabe").await;
        let forged = chrono::NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();

        let raw = plantation::ActiveModel {
            nom_plantation: Set("Vanille".into()),
            type_plantation: Set(TypePlantation::Agroforesterie),
            etat: Set(EtatPlantation::Semee),
            zone_plantation_id: Set(chain.zone.id),
            date_plantation: Set(forged),
            ..Default::default()
        };
        let created = raw.insert(&db).await.unwrap();

        assert_ne!(created.date_plantation, forged);
    }

    #[tokio::test]
    async fn test_bad_update_leaves_row_untouched() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Menabe").await;

        let err = PlantationService::update(
            &db,
            chain.plantation.id,
            PlantationChanges {
                type_plantation: Some("forêt".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());

        let stored = PlantationService::find_by_id(&db, chain.plantation.id).await.unwrap();
        assert_eq!(stored, chain.plantation);
    }

    #[tokio::test]
    async fn test_unknown_zone_is_reference_error() {
        let db = memory_db().await;

        let err = PlantationService::create(&db, request(31, "mangroves", "semee"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ReferenceError { .. }));
    }

    #[tokio::test]
    async fn test_list_for_zone() {
        let db = memory_db().await;
        let first = seed_chain(&db, "Menabe").await;
        let second = seed_chain(&db, "Boeny").await;

        let extra = PlantationService::create(&db, request(first.zone.id, "mangroves", "en repos"))
            .await
            .unwrap();

        let in_first = PlantationService::list_for_zone(&db, first.zone.id).await.unwrap();
        assert_eq!(in_first, vec![first.plantation, extra]);
        assert_eq!(PlantationService::list(&db).await.unwrap().len(), 3);
        assert_eq!(
            PlantationService::list_for_zone(&db, second.zone.id)
                .await
                .unwrap(),
            vec![second.plantation]
        );
    }
}
