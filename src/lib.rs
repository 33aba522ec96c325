//! Persistance de l'application de suivi des plantations.
//!
//! - `models` : entités SeaORM (rôles, utilisateurs, hiérarchie
//!   géographique, plantations et leur suivi, forums, rapports)
//! - `services` : opérations CRUD par entité
//! - `db` : connexion, création du schéma, `bootstrap` à appeler au démarrage

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use db::{bootstrap, establish_connection};
pub use errors::{AppError, ErrorCode, Result};
