//! Per-user access rules for model selection.

use super::models::{ModelDef, Tier};
use std::collections::HashSet;

/// Why a user may not use a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// GPT-4 class models need the GPT-4 allow-list
    Gpt4Only,
    /// Image models need the image allow-list
    ImageOnly,
    /// The model is individually granted and this user is not on the list
    Restricted,
}

/// Decides whether a user may select a model
pub trait AccessPolicy: Send + Sync {
    fn check(&self, user_id: u64, model: &ModelDef) -> Result<(), AccessDenied>;
}

/// Allow-list policy: each gated tier carries its own set of user IDs.
///
/// The default instance has empty lists, which grants nothing beyond the
/// open tier.
#[derive(Debug, Clone, Default)]
pub struct AllowlistPolicy {
    gpt4_users: HashSet<u64>,
    image_users: HashSet<u64>,
    restricted_users: HashSet<u64>,
}

impl AllowlistPolicy {
    pub fn new(
        gpt4_users: HashSet<u64>,
        image_users: HashSet<u64>,
        restricted_users: HashSet<u64>,
    ) -> Self {
        Self {
            gpt4_users,
            image_users,
            restricted_users,
        }
    }
}

impl AccessPolicy for AllowlistPolicy {
    fn check(&self, user_id: u64, model: &ModelDef) -> Result<(), AccessDenied> {
        let (users, denial) = match model.tier {
            Tier::Open => return Ok(()),
            Tier::Gpt4 => (&self.gpt4_users, AccessDenied::Gpt4Only),
            Tier::Image => (&self.image_users, AccessDenied::ImageOnly),
            Tier::Restricted => (&self.restricted_users, AccessDenied::Restricted),
        };
        if users.contains(&user_id) {
            Ok(())
        } else {
            Err(denial)
        }
    }
}
