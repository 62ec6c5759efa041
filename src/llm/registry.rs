//! Catalog facade tying the model table to the access policy.

use super::access::{AccessDenied, AccessPolicy};
use super::models::{default_model, find_model, ModelDef};

/// Why a model pick was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    /// The pick named a model the catalog does not have
    Unknown,
    /// The catalog has the model but this user may not use it
    Denied(AccessDenied),
}

/// The static model table plus the access policy and the configured default.
pub struct ModelCatalog {
    policy: Box<dyn AccessPolicy>,
    default_model: &'static ModelDef,
}

impl ModelCatalog {
    /// Build a catalog. An unknown or absent `default_model_id` falls back
    /// to the first catalog entry; the unknown case is logged.
    pub fn new(policy: Box<dyn AccessPolicy>, default_model_id: Option<&str>) -> Self {
        let default_model = match default_model_id {
            Some(id) => find_model(id).unwrap_or_else(|| {
                let fallback = default_model();
                tracing::warn!(
                    requested = id,
                    fallback = fallback.id,
                    "configured default model is not in the catalog"
                );
                fallback
            }),
            None => default_model(),
        };
        Self {
            policy,
            default_model,
        }
    }

    /// The model fresh sessions start on.
    pub fn default_model(&self) -> &'static ModelDef {
        self.default_model
    }

    /// Resolve a user's model pick against the catalog and the policy.
    pub fn select(&self, user_id: u64, model_id: &str) -> Result<&'static ModelDef, SelectError> {
        let model = find_model(model_id).ok_or(SelectError::Unknown)?;
        self.policy.check(user_id, model).map_err(SelectError::Denied)?;
        Ok(model)
    }
}
