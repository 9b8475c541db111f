use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::{
    errors::{Error, Result},
    models::participant::Participant,
    store::{KeyStore, RosterStore, position_by_normalized_identifier},
    utils::{normalize::normalize_identifier, time::time_now},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// No roster entry matches the canonical identifier. Nothing was written.
    NotFound,
    /// The participant was verified earlier; carries the original stamp.
    AlreadyVerified(Participant),
    /// This call verified the participant and persisted the roster.
    NewlyVerified(Participant),
}

pub struct VerificationService {
    roster: Arc<dyn RosterStore>,
    keys: Arc<dyn KeyStore>,
    // ! held across load -> check -> persist so two scans of one code cannot both stamp it
    roster_writes: Mutex<()>,
}

impl VerificationService {
    pub fn new(roster: Arc<dyn RosterStore>, keys: Arc<dyn KeyStore>) -> Self {
        Self {
            roster,
            keys,
            roster_writes: Mutex::new(()),
        }
    }

    pub fn verify(&self, volunteer_key: &str, raw_identifier: &str) -> Result<VerificationOutcome> {
        if !self.keys.load_active_keys()?.contains(volunteer_key) {
            warn!("Rejected verification with an unknown or revoked volunteer key");
            return Err(Error::Forbidden);
        }

        let canonical = normalize_identifier(raw_identifier);
        if canonical.is_empty() {
            return Err(Error::BadRequest("uuid is required".to_string()));
        }

        let _guard = self
            .roster_writes
            .lock()
            .map_err(|_| Error::StoreUnavailable("roster write lock poisoned".to_string()))?;

        let mut participants = self.roster.load_all()?;
        let Some(index) = position_by_normalized_identifier(&participants, &canonical) else {
            info!("Scanned code {raw_identifier:?} matches no participant");
            return Ok(VerificationOutcome::NotFound);
        };

        if participants[index].is_verified() {
            info!("Participant {canonical} was already verified");
            return Ok(VerificationOutcome::AlreadyVerified(
                participants[index].clone(),
            ));
        }

        self.roster
            .mark_verified(&mut participants, index, time_now())?;
        info!("Participant {canonical} verified");
        Ok(VerificationOutcome::NewlyVerified(participants[index].clone()))
    }
}
