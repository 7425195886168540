use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid {entity}: {reason}")]
    Invalid { entity: &'static str, reason: String },
}

impl ModelError {
    pub fn invalid(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid { entity, reason: reason.into() }
    }
}
