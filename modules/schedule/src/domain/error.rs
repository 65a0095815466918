use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: telegram_id={telegram_id}")]
    UserNotFound { telegram_id: i64 },

    #[error("Schedule item not found: {id}")]
    ItemNotFound { id: i64 },

    #[error("Validation failed: {field} {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(telegram_id: i64) -> Self {
        Self::UserNotFound { telegram_id }
    }

    pub fn item_not_found(id: i64) -> Self {
        Self::ItemNotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
