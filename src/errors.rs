// ============================================================================
// ERREURS
// ============================================================================
//
// Description:
//   Type d'erreur unique remonté par tous les services.
//   Les erreurs SeaORM sont classées ici (unicité, clé étrangère, connexion)
//   pour que l'appelant n'ait jamais à inspecter un DbErr brut.
//
// ============================================================================

use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Codes machine, stables, pour les appelants qui ne veulent pas matcher
/// sur les variantes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidValue,
    UniquenessViolation,
    ReferenceError,
    NotFound,
    StoreUnavailable,
    DatabaseError,
    ConfigurationError,
}

impl ErrorCode {
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidValue => 1002,
            ErrorCode::UniquenessViolation => 5001,
            ErrorCode::ReferenceError => 5002,
            ErrorCode::NotFound => 4001,
            ErrorCode::StoreUnavailable => 7002,
            ErrorCode::DatabaseError => 7001,
            ErrorCode::ConfigurationError => 9002,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid value {value:?} for field {field}")]
    InvalidValue { field: String, value: String },

    #[error("Duplicate {entity}: {detail}")]
    UniquenessViolation { entity: String, detail: String },

    #[error("Reference error: {entity} {key} does not exist")]
    ReferenceError { entity: String, key: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidValue { .. } => ErrorCode::InvalidValue,
            AppError::UniquenessViolation { .. } => ErrorCode::UniquenessViolation,
            AppError::ReferenceError { .. } => ErrorCode::ReferenceError,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Configuration(_) => ErrorCode::ConfigurationError,
        }
    }

    /// Une valeur hors domaine est aussi une erreur de validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::InvalidValue { .. }
        )
    }

    pub fn not_found(entity: &str, key: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    pub fn reference(entity: &str, key: impl ToString) -> Self {
        AppError::ReferenceError {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    /// Classe une erreur du store pour l'entité en cours d'écriture.
    pub fn from_db(err: DbErr, entity: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                return AppError::UniquenessViolation {
                    entity: entity.to_string(),
                    detail,
                };
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                return AppError::ReferenceError {
                    entity: entity.to_string(),
                    key: detail,
                };
            }
            _ => {}
        }

        // SQLite signale un refus RESTRICT sans code étendu exploitable
        if err.to_string().contains("FOREIGN KEY constraint failed") {
            return AppError::ReferenceError {
                entity: entity.to_string(),
                key: err.to_string(),
            };
        }

        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => AppError::StoreUnavailable {
                message: err.to_string(),
            },
            other => AppError::Database(other),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::from_db(err, "record")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation {
            message: errors.to_string(),
        }
    }
}
