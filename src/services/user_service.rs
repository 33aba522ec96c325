use sea_orm::*;
use tracing::debug;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::dto::{NewUser, UserChanges};
use crate::models::users::DEFAULT_AVATAR;
use crate::models::{role, user_groups, user_permissions, users};
use crate::services::crud;

pub struct UserService;

impl UserService {
    /// Crée un utilisateur. email et prenom sont uniques (UniquenessViolation),
    /// role_id doit exister (ReferenceError).
    pub async fn create(db: &DatabaseConnection, request: NewUser) -> Result<users::Model> {
        request.validate()?;
        crud::ensure_exists::<role::Entity>(db, "role", request.role_id).await?;

        let new_user = users::ActiveModel {
            nom: Set(request.nom),
            prenom: Set(request.prenom),
            email: Set(request.email),
            username: Set(request.username),
            password_hash: Set(request.password_hash),
            role_id: Set(request.role_id),
            avatar: Set(request.avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string())),
            is_active: Set(true),
            is_staff: Set(request.is_staff),
            is_superuser: Set(request.is_superuser),
            last_login: Set(None),
            ..Default::default()
        };

        let user = new_user
            .insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "user"))?;

        debug!(id = user.id, "user created");
        Ok(user)
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<users::Model> {
        crud::find_by_id::<users::Entity>(db, "user", id).await
    }

    /// L'email est l'identifiant canonique.
    pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<users::Model> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("user", email))
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<users::Model>> {
        crud::list::<users::Entity>(db).await
    }

    pub async fn list_for_role(db: &DatabaseConnection, role_id: i32) -> Result<Vec<users::Model>> {
        crud::list_where::<users::Entity, _>(db, users::Column::RoleId, role_id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: UserChanges,
    ) -> Result<users::Model> {
        changes.validate()?;
        let mut user: users::ActiveModel = Self::find_by_id(db, id).await?.into();

        if let Some(nom) = changes.nom {
            user.nom = Set(nom);
        }
        if let Some(prenom) = changes.prenom {
            user.prenom = Set(prenom);
        }
        if let Some(email) = changes.email {
            user.email = Set(email);
        }
        if let Some(role_id) = changes.role_id {
            crud::ensure_exists::<role::Entity>(db, "role", role_id).await?;
            user.role_id = Set(role_id);
        }
        if let Some(avatar) = changes.avatar {
            user.avatar = Set(avatar);
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = Set(is_active);
        }
        if let Some(is_staff) = changes.is_staff {
            user.is_staff = Set(is_staff);
        }
        if let Some(is_superuser) = changes.is_superuser {
            user.is_superuser = Set(is_superuser);
        }

        user.update(db)
            .await
            .map_err(|e| AppError::from_db(e, "user"))
    }

    /// Enregistré par l'auth externe à chaque connexion réussie.
    pub async fn record_login(db: &DatabaseConnection, id: i32) -> Result<users::Model> {
        let mut user: users::ActiveModel = Self::find_by_id(db, id).await?.into();
        user.last_login = Set(Some(chrono::Utc::now()));
        user.update(db)
            .await
            .map_err(|e| AppError::from_db(e, "user"))
    }

    /// Supprime l'utilisateur, ses forums, rapports et associations.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        crud::delete::<users::Entity>(db, "user", id).await
    }

    // ------------------------------------------------------------------
    // Associations groupes / permissions (ids opaques de l'auth externe)
    // ------------------------------------------------------------------

    pub async fn add_group(db: &DatabaseConnection, user_id: i32, group_id: i32) -> Result<()> {
        crud::ensure_exists::<users::Entity>(db, "user", user_id).await?;

        let link = user_groups::ActiveModel {
            user_id: Set(user_id),
            group_id: Set(group_id),
        };
        link.insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "user group"))?;
        Ok(())
    }

    pub async fn remove_group(db: &DatabaseConnection, user_id: i32, group_id: i32) -> Result<()> {
        let result = user_groups::Entity::delete_by_id((user_id, group_id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(
                "user group",
                format!("{}/{}", user_id, group_id),
            ));
        }
        Ok(())
    }

    pub async fn groups(db: &DatabaseConnection, user_id: i32) -> Result<Vec<i32>> {
        let links = user_groups::Entity::find()
            .filter(user_groups::Column::UserId.eq(user_id))
            .order_by_asc(user_groups::Column::GroupId)
            .all(db)
            .await?;
        Ok(links.into_iter().map(|l| l.group_id).collect())
    }

    pub async fn add_permission(
        db: &DatabaseConnection,
        user_id: i32,
        permission_id: i32,
    ) -> Result<()> {
        crud::ensure_exists::<users::Entity>(db, "user", user_id).await?;

        let link = user_permissions::ActiveModel {
            user_id: Set(user_id),
            permission_id: Set(permission_id),
        };
        link.insert(db)
            .await
            .map_err(|e| AppError::from_db(e, "user permission"))?;
        Ok(())
    }

    pub async fn remove_permission(
        db: &DatabaseConnection,
        user_id: i32,
        permission_id: i32,
    ) -> Result<()> {
        let result = user_permissions::Entity::delete_by_id((user_id, permission_id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(
                "user permission",
                format!("{}/{}", user_id, permission_id),
            ));
        }
        Ok(())
    }

    pub async fn permissions(db: &DatabaseConnection, user_id: i32) -> Result<Vec<i32>> {
        let links = user_permissions::Entity::find()
            .filter(user_permissions::Column::UserId.eq(user_id))
            .order_by_asc(user_permissions::Column::PermissionId)
            .all(db)
            .await?;
        Ok(links.into_iter().map(|l| l.permission_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{memory_db, seed_user};
    use crate::models::users::DEFAULT_AVATAR;

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let db = memory_db().await;
        let user = seed_user(&db, "Jean", "a@x.com").await;

        assert_eq!(user.avatar, DEFAULT_AVATAR);
        assert!(user.is_active);
        assert!(!user.is_superuser);
        assert!(user.last_login.is_none());
        assert_eq!(user.to_string(), "Jean Rakoto");
    }

    #[tokio::test]
    async fn test_referenced_role_cannot_be_deleted() {
        let db = memory_db().await;
        let user = seed_user(&db, "Jean", "a@x.com").await;

        let err = role::Entity::delete_by_id(user.role_id)
            .exec(&db)
            .await
            .unwrap_err();

        assert!(matches!(
            AppError::from_db(err, "role"),
            AppError::ReferenceError { .. }
        ));
        assert!(role::Entity::find_by_id(user.role_id).one(&db).await.unwrap().is_some());
        assert_eq!(UserService::find_by_id(&db, user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = memory_db().await;
        let first = seed_user(&db, "Jean", "a@x.com").await;

        let err = UserService::create(
            &db,
            NewUser {
                nom: "Rabe".into(),
                prenom: "Paul".into(),
                email: "a@x.com".into(),
                role_id: first.role_id,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::UniquenessViolation { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_prenom_rejected() {
        let db = memory_db().await;
        let first = seed_user(&db, "Jean", "a@x.com").await;

        let err = UserService::create(
            &db,
            NewUser {
                nom: "Rabe".into(),
                prenom: "Jean".into(),
                email: "b@x.com".into(),
                role_id: first.role_id,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::UniquenessViolation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_role_is_reference_error() {
        let db = memory_db().await;

        let err = UserService::create(
            &db,
            NewUser {
                nom: "Rabe".into(),
                prenom: "Paul".into(),
                email: "p@x.com".into(),
                role_id: 404,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::ReferenceError { .. }));
    }

    #[tokio::test]
    async fn test_update_refreshes_modification_only() {
        let db = memory_db().await;
        let user = seed_user(&db, "Jean", "a@x.com").await;

        let updated = UserService::update(
            &db,
            user.id,
            UserChanges {
                nom: Some("Randria".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.nom, "Randria");
        assert_eq!(updated.date_joined, user.date_joined);
        assert!(updated.date_modification >= user.date_modification);
        assert_eq!(
            UserService::find_by_email(&db, "a@x.com").await.unwrap().id,
            user.id
        );
    }

    #[tokio::test]
    async fn test_record_login() {
        let db = memory_db().await;
        let user = seed_user(&db, "Jean", "a@x.com").await;

        let logged = UserService::record_login(&db, user.id).await.unwrap();
        assert!(logged.last_login.is_some());
    }

    #[tokio::test]
    async fn test_group_and_permission_links() {
        let db = memory_db().await;
        let user = seed_user(&db, "Jean", "a@x.com").await;

        UserService::add_group(&db, user.id, 7).await.unwrap();
        UserService::add_group(&db, user.id, 3).await.unwrap();
        UserService::add_permission(&db, user.id, 12).await.unwrap();

        assert_eq!(UserService::groups(&db, user.id).await.unwrap(), vec![3, 7]);
        assert_eq!(UserService::permissions(&db, user.id).await.unwrap(), vec![12]);

        let err = UserService::add_group(&db, user.id, 7).await.unwrap_err();
        assert!(matches!(err, AppError::UniquenessViolation { .. }));

        UserService::remove_group(&db, user.id, 7).await.unwrap();
        assert_eq!(UserService::groups(&db, user.id).await.unwrap(), vec![3]);

        UserService::delete(&db, user.id).await.unwrap();
        assert!(UserService::groups(&db, user.id).await.unwrap().is_empty());
        assert!(UserService::permissions(&db, user.id).await.unwrap().is_empty());
    }
}
