// ============================================================================
// SERVICES
// ============================================================================
//
// Un service par famille d'entités. Toutes les opérations prennent la
// connexion en paramètre et retournent crate::errors::Result.
//
//   - role_service : rôles + initialisation du rôle admin
//   - user_service : utilisateurs + associations groupes / permissions
//   - territory_service : communes, districts, régions
//   - zone_service : zones de plantation
//   - plantation_service : plantations
//   - followup_service : guides, suivis, pépinières, galeries
//   - community_service : forums, rapports
//
// ============================================================================

pub mod crud;
pub mod role_service;
pub mod user_service;
pub mod territory_service;
pub mod zone_service;
pub mod plantation_service;
pub mod followup_service;
pub mod community_service;
