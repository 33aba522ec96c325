// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table avec SeaORM.
//
// Liste des modules:
//   - role : Rôles (admin, agriculteur, chercheur)
//   - users : Utilisateurs (email = identifiant de connexion)
//   - user_groups / user_permissions : associations opaques vers l'auth externe
//   - commune, district, region : hiérarchie géographique
//   - zone_plantation : zones de plantation (région, district, commune)
//   - plantation : plantations d'une zone
//   - guide_plantation, suivi_plantation, pepiniere, photo_gallery : enfants
//     d'une plantation
//   - forum, rapport : publications d'un utilisateur (par email)
//   - dto : structures d'entrée des services
//
// Points d'attention:
//   - Toutes les clés étrangères sont ON DELETE CASCADE, sauf users -> role
//     (RESTRICT: un rôle n'est jamais supprimé)
//   - date_creation / date_modification sont posées par before_save,
//     jamais par l'appelant
//
// ============================================================================

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, NotSet, Select, Set};

use crate::errors::{AppError, Result};

pub mod role;
pub mod users;
pub mod user_groups;
pub mod user_permissions;
pub mod commune;
pub mod district;
pub mod region;
pub mod zone_plantation;
pub mod plantation;
pub mod guide_plantation;
pub mod suivi_plantation;
pub mod pepiniere;
pub mod photo_gallery;
pub mod forum;
pub mod rapport;
pub mod dto;

/// Ordre par défaut des listes d'une entité.
pub trait DefaultOrder: EntityTrait {
    fn ordered(select: Select<Self>) -> Select<Self>;

    fn find_ordered() -> Select<Self> {
        Self::ordered(Self::find())
    }
}

/// Pose les horodatages gérés par le store.
/// A l'insertion: création + modification. A la mise à jour: modification
/// seulement, et la date de création n'est jamais réécrite.
pub(crate) fn stamp(
    insert: bool,
    created: &mut ActiveValue<DateTimeUtc>,
    modified: &mut ActiveValue<DateTimeUtc>,
) {
    let now = chrono::Utc::now();
    *created = if insert { Set(now) } else { NotSet };
    *modified = Set(now);
}

/// Date figée à la création (date de plantation, date de suivi).
pub(crate) fn stamp_fixed_date(insert: bool, date: &mut ActiveValue<Date>) {
    *date = if insert {
        Set(chrono::Utc::now().date_naive())
    } else {
        NotSet
    };
}

/// Convertit une valeur brute en variante d'un champ à choix fermé.
pub fn parse_choice<E>(field: &str, raw: &str) -> Result<E>
where
    E: ActiveEnum<Value = String>,
{
    E::try_from_value(&raw.to_string()).map_err(|_| AppError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
