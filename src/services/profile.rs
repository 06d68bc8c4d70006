//! Profile service
//!
//! Sign-up validation, and the persisted shallow-merge update every wizard
//! step and integration action goes through.

use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{AtlasError, AtlasResult};
use crate::models::{MerchantId, ProfilePatch, UserProfile};
use crate::storage::Storage;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Check sign-up form input
pub fn validate_sign_up(email: &str, password: &str) -> AtlasResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AtlasError::Validation("Please fill in all fields".into()));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AtlasError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    Ok(())
}

/// Service for the stored merchant profile
pub struct ProfileService<'a> {
    storage: &'a Storage,
}

impl<'a> ProfileService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate credentials, create a profile with a fresh merchant id and
    /// store it, replacing whatever was stored before
    pub fn sign_up(&self, email: &str, password: &str) -> AtlasResult<UserProfile> {
        validate_sign_up(email, password)?;

        let profile = match self.current()? {
            // Re-running sign-up keeps anything the merchant already configured
            Some(existing) => {
                let mut next = existing.merged(&ProfilePatch::credentials(email.trim(), password));
                next.merchant_id = MerchantId::generate();
                next
            }
            None => {
                if self.storage.profiles.exists()? {
                    warn!("stored profile is unreadable, replacing it");
                }
                UserProfile::sign_up(email.trim(), password)
            }
        };

        self.storage.profiles.save(&profile)?;
        self.storage.log_create(
            EntityType::Profile,
            profile.merchant_id.to_string(),
            Some(profile.email.clone()),
            &profile,
        )?;

        info!(merchant_id = %profile.merchant_id, "merchant signed up");
        Ok(profile)
    }

    /// The stored profile, if any
    pub fn current(&self) -> AtlasResult<Option<UserProfile>> {
        self.storage.profiles.get()
    }

    /// The stored profile, or `NotFound` when nobody has signed up
    pub fn require(&self) -> AtlasResult<UserProfile> {
        self.current()?.ok_or_else(AtlasError::profile_not_found)
    }

    /// Merge a patch into the stored profile and persist the result
    pub fn update(&self, patch: &ProfilePatch) -> AtlasResult<UserProfile> {
        let before = self.require()?;
        let after = before.merged(patch);
        self.persist(&before, &after)?;
        Ok(after)
    }

    /// Store `after`, recording the change from `before`
    ///
    /// Nothing is written when the two are equal.
    pub fn persist(&self, before: &UserProfile, after: &UserProfile) -> AtlasResult<()> {
        if before == after {
            return Ok(());
        }

        self.storage.profiles.save(after)?;
        self.storage.log_update(
            EntityType::Profile,
            after.merchant_id.to_string(),
            Some(after.email.clone()),
            before,
            after,
        )
    }
}
