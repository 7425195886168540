use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("cache error: {0}")]
    Cache(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: u32) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    pub fn already_exists(entity: &str, id: u32) -> Self {
        Self::AlreadyExists(format!("{entity} {id} already exists"))
    }
}
