use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::{
    errors::{Error, Result},
    models::{stats::RosterStats, volunteer_key::VolunteerKey},
    store::{KeyStore, RosterStore},
    utils::secret::secrets_match,
};

/// Key issuance, revocation and reporting. Every operation checks the admin secret before
/// touching a store.
pub struct AdminService {
    admin_secret: String,
    keys: Arc<dyn KeyStore>,
    roster: Arc<dyn RosterStore>,
    key_writes: Mutex<()>,
}

impl AdminService {
    pub fn new(admin_secret: String, keys: Arc<dyn KeyStore>, roster: Arc<dyn RosterStore>) -> Self {
        Self {
            admin_secret,
            keys,
            roster,
            key_writes: Mutex::new(()),
        }
    }

    fn authorize(&self, provided: &str) -> Result<()> {
        if secrets_match(provided, &self.admin_secret) {
            Ok(())
        } else {
            warn!("Rejected admin request with a wrong secret");
            Err(Error::Unauthorized)
        }
    }

    fn lock_keys(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.key_writes
            .lock()
            .map_err(|_| Error::StoreUnavailable("key table write lock poisoned".to_string()))
    }

    pub fn issue_key(&self, admin_secret: &str, owner_id: &str) -> Result<VolunteerKey> {
        self.authorize(admin_secret)?;
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Err(Error::BadRequest("erp_id is required".to_string()));
        }

        let _guard = self.lock_keys()?;
        let issued = self.keys.issue(owner_id)?;
        info!("Issued volunteer key for {owner_id}");
        Ok(issued)
    }

    /// Returns the number of key records deactivated; zero when the key was never issued.
    pub fn deactivate_key(&self, admin_secret: &str, key: &str) -> Result<usize> {
        self.authorize(admin_secret)?;
        if key.trim().is_empty() {
            return Err(Error::BadRequest("pass_key is required".to_string()));
        }

        let _guard = self.lock_keys()?;
        let affected = self.keys.deactivate(key)?;
        info!("Deactivated {affected} volunteer key record(s)");
        Ok(affected)
    }

    pub fn list_keys(&self, admin_secret: &str) -> Result<Vec<VolunteerKey>> {
        self.authorize(admin_secret)?;
        self.keys.list_all()
    }

    pub fn get_stats(&self, admin_secret: &str) -> Result<RosterStats> {
        self.authorize(admin_secret)?;
        Ok(RosterStats::from_participants(&self.roster.load_all()?))
    }
}
