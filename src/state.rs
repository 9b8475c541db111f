use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    config::Config,
    services::{admin::AdminService, verification::VerificationService},
    store::{
        KeyStore, RosterStore,
        file::{CsvKeyStore, CsvRosterStore},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub verification: Arc<VerificationService>,
    pub admin: Arc<AdminService>,
}

impl AppState {
    pub fn init(config: &Config) -> Self {
        let roster = CsvRosterStore::new(&config.roster_path);
        match roster.load_all() {
            Ok(participants) => info!(
                "Roster {} lists {} participants",
                config.roster_path.display(),
                participants.len()
            ),
            Err(e) => warn!("Roster not readable yet, verification will fail until it is: {e}"),
        }
        let keys = CsvKeyStore::new(&config.keys_path);

        Self::with_stores(config.admin_secret.clone(), Arc::new(roster), Arc::new(keys))
    }

    pub fn with_stores(
        admin_secret: String,
        roster: Arc<dyn RosterStore>,
        keys: Arc<dyn KeyStore>,
    ) -> Self {
        Self {
            verification: Arc::new(VerificationService::new(roster.clone(), keys.clone())),
            admin: Arc::new(AdminService::new(admin_secret, keys, roster)),
        }
    }
}
