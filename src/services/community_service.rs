// Forums et rapports: rattachés à un utilisateur par son email.

use sea_orm::*;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::dto::{ForumChanges, NewForum, NewRapport, RapportChanges};
use crate::models::{DefaultOrder, forum, rapport, users};
use crate::services::crud;

/// L'auteur doit exister: un email inconnu est une ReferenceError.
async fn ensure_author(db: &DatabaseConnection, email: &str) -> Result<()> {
    let found = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(AppError::reference("user", email)),
    }
}

pub struct ForumService;

impl ForumService {
    pub async fn create(db: &DatabaseConnection, request: NewForum) -> Result<forum::Model> {
        request.validate()?;
        ensure_author(db, &request.utilisateur_email).await?;

        let new_forum = forum::ActiveModel {
            topic: Set(request.topic),
            message: Set(request.message),
            utilisateur_email: Set(request.utilisateur_email),
            ..Default::default()
        };

        new_forum
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "forum"))
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<forum::Model> {
        crud::find_by_id::<forum::Entity>(db, "forum", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<forum::Model>> {
        crud::list::<forum::Entity>(db).await
    }

    pub async fn list_for_user(db: &DatabaseConnection, email: &str) -> Result<Vec<forum::Model>> {
        Ok(forum::Entity::ordered(
            forum::Entity::find().filter(forum::Column::UtilisateurEmail.eq(email)),
        )
        .all(db)
        .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: ForumChanges,
    ) -> Result<forum::Model> {
        changes.validate()?;
        let mut forum: forum::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(topic) = changes.topic {
            forum.topic = Set(topic);
        }
        if let Some(message) = changes.message {
            forum.message = Set(message);
        }

        forum
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "forum"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<forum::Entity>(db, "forum", id).await
    }
}

pub struct RapportService;

impl RapportService {
    pub async fn create(db: &DatabaseConnection, request: NewRapport) -> Result<rapport::Model> {
        request.validate()?;
        ensure_author(db, &request.utilisateur_email).await?;

        let new_rapport = rapport::ActiveModel {
            titre: Set(request.titre),
            contenu: Set(request.contenu),
            utilisateur_email: Set(request.utilisateur_email),
            ..Default::default()
        };

        new_rapport
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "rapport"))
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<rapport::Model> {
        crud::find_by_id::<rapport::Entity>(db, "rapport", id).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<rapport::Model>> {
        crud::list::<rapport::Entity>(db).await
    }

    pub async fn list_for_user(db: &DatabaseConnection, email: &str) -> Result<Vec<rapport::Model>> {
        Ok(rapport::Entity::ordered(
            rapport::Entity::find().filter(rapport::Column::UtilisateurEmail.eq(email)),
        )
        .all(db)
        .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: RapportChanges,
    ) -> Result<rapport::Model> {
        changes.validate()?;
        let mut rapport: rapport::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(titre) = changes.titre {
            rapport.titre = Set(titre);
        }
        if let Some(contenu) = changes.contenu {
            rapport.contenu = Set(contenu);
        }

        rapport
            .update(db)
            .await
            .map_err(|e| AppError::from_db(e, "rapport"))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<rapport::Entity>(db, "rapport", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{memory_db, seed_user};
    use crate::models::dto::UserChanges;
    use crate::services::user_service::UserService;

    #[tokio::test]
    async fn test_forum_with_unknown_email_is_reference_error() {
        let db = memory_db().await;

        let err = ForumService::create(
            &db,
            NewForum {
                topic: "Semences".into(),
                message: "Où trouver des graines ?".into(),
                utilisateur_email: "inconnu@x.com".into(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::ReferenceError { .. }));
    }

    #[tokio::test]
    async fn test_rapport_with_unknown_email_is_reference_error() {
        let db = memory_db().await;

        let err = RapportService::create(
            &db,
            NewRapport {
                titre: "Bilan".into(),
                contenu: "Saison sèche".into(),
                utilisateur_email: "inconnu@x.com".into(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::ReferenceError { .. }));
    }

    #[tokio::test]
    async fn test_posts_follow_author_lifecycle() {
        let db = memory_db().await;
        let author = seed_user(&db, "Jean", "a@x.com").await;

        let forum = ForumService::create(
            &db,
            NewForum {
                topic: "Semences".into(),
                message: "Où trouver des graines ?".into(),
                utilisateur_email: "a@x.com".into(),
            },
        )
        .await
        .unwrap();
        RapportService::create(
            &db,
            NewRapport {
                titre: "Bilan".into(),
                contenu: "Saison sèche".into(),
                utilisateur_email: "a@x.com".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(forum.to_string(), "Semences");

        // l'email change: les publications suivent (ON UPDATE CASCADE)
        UserService::update(
            &db,
            author.id,
            UserChanges {
                email: Some("jean@x.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(
            ForumService::list_for_user(&db, "jean@x.com").await.unwrap().len(),
            1
        );
        assert_eq!(
            RapportService::list_for_user(&db, "jean@x.com").await.unwrap().len(),
            1
        );

        UserService::delete(&db, author.id).await.unwrap();
        assert!(ForumService::list(&db).await.unwrap().is_empty());
        assert!(RapportService::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_forum_message() {
        let db = memory_db().await;
        seed_user(&db, "Jean", "a@x.com").await;
        let forum = ForumService::create(
            &db,
            NewForum {
                topic: "Semences".into(),
                message: "v1".into(),
                utilisateur_email: "a@x.com".into(),
            },
        )
        .await
        .unwrap();

        let updated = ForumService::update(
            &db,
            forum.id,
            ForumChanges {
                message: Some("v2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.message, "v2");
        assert_eq!(updated.topic, "Semences");
        assert_eq!(updated.date_creation, forum.date_creation);
    }

    #[tokio::test]
    async fn test_update_rapport_keeps_author() {
        let db = memory_db().await;
        seed_user(&db, "Jean", "a@x.com").await;
        let rapport = RapportService::create(
            &db,
            NewRapport {
                titre: "Bilan".into(),
                contenu: "v1".into(),
                utilisateur_email: "a@x.com".into(),
            },
        )
        .await
        .unwrap();

        let updated = RapportService::update(
            &db,
            rapport.id,
            RapportChanges {
                titre: Some("Bilan annuel".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.titre, "Bilan annuel");
        assert_eq!(updated.contenu, "v1");
        assert_eq!(updated.utilisateur_email, "a@x.com");
        assert!(updated.date_modification >= rapport.date_modification);
    }
}
