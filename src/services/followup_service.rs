// ============================================================================
// SERVICES : SUIVI D'UNE PLANTATION
// ============================================================================
//
// Enfants directs d'une plantation: guides, suivis de croissance,
// pépinières, galeries média. Tous disparaissent avec leur plantation.
//
// ============================================================================

use sea_orm::*;
use tracing::debug;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::dto::{
    GuidePlantationChanges, NewGuidePlantation, NewPepiniere, NewPhotoGallery,
    NewSuiviPlantation, PepiniereChanges, PhotoGalleryChanges, SuiviPlantationChanges,
};
use crate::models::{guide_plantation, pepiniere, photo_gallery, plantation, suivi_plantation};
use crate::services::crud;

pub struct GuideService;

impl GuideService {
    pub async fn create(
        db: &DatabaseConnection,
        request: NewGuidePlantation,
    ) -> Result<guide_plantation::Model> {
        request.validate()?;
        crud::ensure_exists::<plantation::Entity>(db, "plantation", request.plantation_id).await?;

        let new_guide = guide_plantation::ActiveModel {
            titre: Set(request.titre),
            contenu: Set(request.contenu),
            plantation_id: Set(request.plantation_id),
            ..Default::default()
        };

        new_guide
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "guide plantation"))
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<guide_plantation::Model> {
        crud::find_by_id::<guide_plantation::Entity>(db, "guide plantation", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<guide_plantation::Model>> {
        crud::list::<guide_plantation::Entity>(db).await
    }

    pub async fn list_for_plantation(
        db: &DatabaseConnection,
        plantation_id: i32,
    ) -> Result<Vec<guide_plantation::Model>> {
        crud::list_where::<guide_plantation::Entity, _>(
            db,
            guide_plantation::Column::PlantationId,
            plantation_id,
        )
        .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: GuidePlantationChanges,
    ) -> Result<guide_plantation::Model> {
        changes.validate()?;
        let mut guide: guide_plantation::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(titre) = changes.titre {
            guide.titre = Set(titre);
        }
        if let Some(contenu) = changes.contenu {
            guide.contenu = Set(contenu);
        }

        guide
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "guide plantation"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<guide_plantation::Entity>(db, "guide plantation", id).await
    }
}

pub struct SuiviService;

impl SuiviService {
    /// hauteur et diametre valent 0.0 s'ils ne sont pas fournis.
    pub async fn create(
        db: &DatabaseConnection,
        request: NewSuiviPlantation,
    ) -> Result<suivi_plantation::Model> {
        request.validate()?;
        crud::ensure_exists::<plantation::Entity>(db, "plantation", request.plantation_id).await?;

        let new_suivi = suivi_plantation::ActiveModel {
            hauteur: Set(Some(request.hauteur.unwrap_or(0.0))),
            diametre: Set(Some(request.diametre.unwrap_or(0.0))),
            observation: Set(request.observation),
            plantation_id: Set(request.plantation_id),
            ..Default::default()
        };

        let created = new_suivi
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "suivi plantation"))?;
        debug!(id = created.id, plantation_id = created.plantation_id, "suivi recorded");
        Ok(created)
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<suivi_plantation::Model> {
        crud::find_by_id::<suivi_plantation::Entity>(db, "suivi plantation", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<suivi_plantation::Model>> {
        crud::list::<suivi_plantation::Entity>(db).await
    }

    pub async fn list_for_plantation(
        db: &DatabaseConnection,
        plantation_id: i32,
    ) -> Result<Vec<suivi_plantation::Model>> {
        crud::list_where::<suivi_plantation::Entity, _>(
            db,
            suivi_plantation::Column::PlantationId,
            plantation_id,
        )
        .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: SuiviPlantationChanges,
    ) -> Result<suivi_plantation::Model> {
        changes.validate()?;
        let mut suivi: suivi_plantation::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(hauteur) = changes.hauteur {
            suivi.hauteur = Set(hauteur);
        }
        if let Some(diametre) = changes.diametre {
            suivi.diametre = Set(diametre);
        }
        if let Some(observation) = changes.observation {
            suivi.observation = Set(observation);
        }

        suivi
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "suivi plantation"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<suivi_plantation::Entity>(db, "suivi plantation", id).await
    }
}

pub struct PepiniereService;

impl PepiniereService {
    /// Stock et capacité à 0 s'ils ne sont pas fournis.
    pub async fn create(db: &DatabaseConnection, request: NewPepiniere) -> Result<pepiniere::Model> {
        request.validate()?;
        crud::ensure_exists::<plantation::Entity>(db, "plantation", request.plantation_id).await?;

        let new_pepiniere = pepiniere::ActiveModel {
            quantite_stock: Set(Some(request.quantite_stock.unwrap_or(0))),
            capacite_prod: Set(Some(request.capacite_prod.unwrap_or(0))),
            plantation_id: Set(request.plantation_id),
            ..Default::default()
        };

        new_pepiniere
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "pepiniere"))
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<pepiniere::Model> {
        crud::find_by_id::<pepiniere::Entity>(db, "pepiniere", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<pepiniere::Model>> {
        crud::list::<pepiniere::Entity>(db).await
    }

    pub async fn list_for_plantation(
        db: &DatabaseConnection,
        plantation_id: i32,
    ) -> Result<Vec<pepiniere::Model>> {
        crud::list_where::<pepiniere::Entity, _>(db, pepiniere::Column::PlantationId, plantation_id)
            .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: PepiniereChanges,
    ) -> Result<pepiniere::Model> {
        changes.validate()?;
        let mut pepiniere: pepiniere::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(quantite_stock) = changes.quantite_stock {
            pepiniere.quantite_stock = Set(quantite_stock);
        }
        if let Some(capacite_prod) = changes.capacite_prod {
            pepiniere.capacite_prod = Set(capacite_prod);
        }
        if let Some(plantation_id) = changes.plantation_id {
            crud::ensure_exists::<plantation::Entity>(db, "plantation", plantation_id).await?;
            pepiniere.plantation_id = Set(plantation_id);
        }

        pepiniere
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "pepiniere"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<pepiniere::Entity>(db, "pepiniere", id).await
    }
}

pub struct GalleryService;

impl GalleryService {
    /// photos / videos: chemins déjà attribués par le stockage de fichiers.
    pub async fn create(
        db: &DatabaseConnection,
        request: NewPhotoGallery,
    ) -> Result<photo_gallery::Model> {
        request.validate()?;
        crud::ensure_exists::<plantation::Entity>(db, "plantation", request.plantation_id).await?;

        let new_gallery = photo_gallery::ActiveModel {
            description: Set(request.description),
            photos: Set(request.photos),
            videos: Set(request.videos),
            plantation_id: Set(request.plantation_id),
            ..Default::default()
        };

        new_gallery
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "photo gallery"))
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<photo_gallery::Model> {
        crud::find_by_id::<photo_gallery::Entity>(db, "photo gallery", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<photo_gallery::Model>> {
        crud::list::<photo_gallery::Entity>(db).await
    }

    pub async fn list_for_plantation(
        db: &DatabaseConnection,
        plantation_id: i32,
    ) -> Result<Vec<photo_gallery::Model>> {
        crud::list_where::<photo_gallery::Entity, _>(
            db,
            photo_gallery::Column::PlantationId,
            plantation_id,
        )
        .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: PhotoGalleryChanges,
    ) -> Result<photo_gallery::Model> {
        changes.validate()?;
        let mut gallery: photo_gallery::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(description) = changes.description {
            gallery.description = Set(description);
        }
        if let Some(photos) = changes.photos {
            gallery.photos = Set(photos);
        }
        if let Some(videos) = changes.videos {
            gallery.videos = Set(videos);
        }

        gallery
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "photo gallery"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<photo_gallery::Entity>(db, "photo gallery", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{memory_db, seed_chain};
    use crate::services::plantation_service::PlantationService;

    #[tokio::test]
    async fn test_suivi_measures_default_to_zero() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Itasy").await;

        let suivi = SuiviService::create(
            &db,
            NewSuiviPlantation {
                observation: "RAS".into(),
                plantation_id: chain.plantation.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(suivi.hauteur, Some(0.0));
        assert_eq!(suivi.diametre, Some(0.0));
        assert_eq!(suivi.date_suivi, chrono::Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_suivi_measures_can_be_cleared() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Itasy").await;
        let suivi = SuiviService::create(
            &db,
            NewSuiviPlantation {
                hauteur: Some(1.25),
                diametre: Some(0.1),
                observation: "feuillage dense".into(),
                plantation_id: chain.plantation.id,
            },
        )
        .await
        .unwrap();

        let updated = SuiviService::update(
            &db,
            suivi.id,
            SuiviPlantationChanges {
                diametre: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.hauteur, Some(1.25));
        assert_eq!(updated.diametre, None);
        assert_eq!(updated.date_suivi, suivi.date_suivi);
    }

    #[tokio::test]
    async fn test_pepiniere_defaults_to_zero() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Itasy").await;

        let pepiniere = PepiniereService::create(
            &db,
            NewPepiniere {
                capacite_prod: Some(500),
                plantation_id: chain.plantation.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(pepiniere.quantite_stock, Some(0));
        assert_eq!(pepiniere.capacite_prod, Some(500));
    }

    #[tokio::test]
    async fn test_gallery_paths_optional() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Itasy").await;

        let gallery = GalleryService::create(
            &db,
            NewPhotoGallery {
                description: "Vue aérienne".into(),
                photos: Some("uploads/photos/vue.jpg".into()),
                plantation_id: chain.plantation.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(gallery.photos.as_deref(), Some("uploads/photos/vue.jpg"));
        assert!(gallery.videos.is_none());
        assert_eq!(gallery.to_string(), "Vue aérienne");
    }

    #[tokio::test]
    async fn test_children_need_existing_plantation() {
        let db = memory_db().await;

        let err = GuideService::create(
            &db,
            NewGuidePlantation {
                titre: "Arrosage".into(),
                contenu: "Deux fois par semaine".into(),
                plantation_id: 12,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::ReferenceError { .. }));
    }

    #[tokio::test]
    async fn test_deleting_plantation_removes_children() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Itasy").await;
        let id = chain.plantation.id;

        GuideService::create(
            &db,
            NewGuidePlantation {
                titre: "Arrosage".into(),
                contenu: "Deux fois par semaine".into(),
                plantation_id: id,
            },
        )
        .await
        .unwrap();
        SuiviService::create(
            &db,
            NewSuiviPlantation {
                observation: "RAS".into(),
                plantation_id: id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        PepiniereService::create(
            &db,
            NewPepiniere {
                plantation_id: id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        GalleryService::create(
            &db,
            NewPhotoGallery {
                description: "Avant".into(),
                plantation_id: id,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        PlantationService::delete(&db, id).await.unwrap();

        assert!(GuideService::list(&db).await.unwrap().is_empty());
        assert!(SuiviService::list(&db).await.unwrap().is_empty());
        assert!(PepiniereService::list(&db).await.unwrap().is_empty());
        assert!(GalleryService::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_guides_listed_per_plantation_in_creation_order() {
        let db = memory_db().await;
        let chain = seed_chain(&db, "Itasy").await;
        let id = chain.plantation.id;

        for titre in ["Semis", "Repiquage"] {
            GuideService::create(
                &db,
                NewGuidePlantation {
                    titre: titre.into(),
                    contenu: "...".into(),
                    plantation_id: id,
                },
            )
            .await
            .unwrap();
        }

        let titres: Vec<String> = GuideService::list_for_plantation(&db, id)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.titre)
            .collect();
        assert_eq!(titres, vec!["Semis", "Repiquage"]);
    }
}
