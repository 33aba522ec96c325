// Structures d'entrée des services (création / modification).
//
// Les champs à choix fermé arrivent en texte brut et sont convertis par les
// services (InvalidValue si hors domaine). Les horodatages n'apparaissent
// jamais ici: ils sont posés par le store.
//
// Pour les modifications: None = inchangé. Option<Option<T>> pour les champs
// NULL-ables, Some(None) remet la colonne à NULL.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewRole {
    /// admin si absent
    pub nom: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
    #[validate(length(min = 1, max = 255))]
    pub prenom: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub role_id: i32,
    /// Avatar par défaut si absent
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserChanges {
    #[validate(length(min = 1, max = 255))]
    pub nom: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub prenom: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub role_id: Option<i32>,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Commune, district, région: seul le nom est modifiable, le parent aussi
/// pour district et région.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewCommune {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommuneChanges {
    #[validate(length(min = 1, max = 255))]
    pub nom: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewDistrict {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
    pub commune_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DistrictChanges {
    #[validate(length(min = 1, max = 255))]
    pub nom: Option<String>,
    pub commune_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewRegion {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
    pub district_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegionChanges {
    #[validate(length(min = 1, max = 255))]
    pub nom: Option<String>,
    pub district_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewZonePlantation {
    #[validate(length(min = 1, max = 255))]
    pub localisation: String,
    pub region_id: i32,
    pub district_id: i32,
    pub commune_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ZonePlantationChanges {
    #[validate(length(min = 1, max = 255))]
    pub localisation: Option<String>,
    pub region_id: Option<i32>,
    pub district_id: Option<i32>,
    pub commune_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewPlantation {
    #[validate(length(min = 1, max = 255))]
    pub nom_plantation: String,
    pub type_plantation: String,
    pub etat: String,
    pub zone_plantation_id: i32,
}

/// date_plantation n'est pas modifiable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PlantationChanges {
    #[validate(length(min = 1, max = 255))]
    pub nom_plantation: Option<String>,
    pub type_plantation: Option<String>,
    pub etat: Option<String>,
    pub zone_plantation_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewGuidePlantation {
    #[validate(length(min = 1, max = 255))]
    pub titre: String,
    #[validate(length(min = 1, max = 255))]
    pub contenu: String,
    pub plantation_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GuidePlantationChanges {
    #[validate(length(min = 1, max = 255))]
    pub titre: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub contenu: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewSuiviPlantation {
    pub hauteur: Option<f64>,
    pub diametre: Option<f64>,
    #[validate(length(min = 1, max = 255))]
    pub observation: String,
    pub plantation_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SuiviPlantationChanges {
    pub hauteur: Option<Option<f64>>,
    pub diametre: Option<Option<f64>>,
    #[validate(length(min = 1, max = 255))]
    pub observation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewPepiniere {
    pub quantite_stock: Option<i32>,
    pub capacite_prod: Option<i32>,
    pub plantation_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PepiniereChanges {
    pub quantite_stock: Option<Option<i32>>,
    pub capacite_prod: Option<Option<i32>>,
    pub plantation_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewPhotoGallery {
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    pub photos: Option<String>,
    pub videos: Option<String>,
    pub plantation_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PhotoGalleryChanges {
    #[validate(length(min = 1, max = 255))]
    pub description: Option<String>,
    pub photos: Option<Option<String>>,
    pub videos: Option<Option<String>>,
}

/// Forum et rapport: auteur désigné par son email.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewForum {
    #[validate(length(min = 1, max = 255))]
    pub topic: String,
    #[validate(length(min = 1, max = 255))]
    pub message: String,
    pub utilisateur_email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ForumChanges {
    #[validate(length(min = 1, max = 255))]
    pub topic: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewRapport {
    #[validate(length(min = 1, max = 255))]
    pub titre: String,
    #[validate(length(min = 1, max = 255))]
    pub contenu: String,
    pub utilisateur_email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RapportChanges {
    #[validate(length(min = 1, max = 255))]
    pub titre: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub contenu: Option<String>,
}
