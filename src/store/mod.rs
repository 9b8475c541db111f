//! Roster and volunteer key persistence.
//!
//! Both stores reload their whole table on every call and rewrite it in full on every
//! mutation; nothing is cached between requests. Serialising writers is the caller's job
//! (see the services).

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::{
    errors::{Error, Result},
    models::{
        participant::{Participant, VerificationStatus},
        volunteer_key::VolunteerKey,
    },
    utils::{normalize::normalize_identifier, token::generate_volunteer_key},
};

pub mod file;
#[cfg(test)]
pub mod memory;

pub trait RosterStore: Send + Sync {
    /// Reads the full roster. Fails with `StoreUnavailable` when the table is missing or
    /// lacks a required column.
    fn load_all(&self) -> Result<Vec<Participant>>;

    /// Replaces the stored roster with `participants`.
    fn persist(&self, participants: &[Participant]) -> Result<()>;

    fn find_by_normalized_identifier(&self, canonical: &str) -> Result<Option<Participant>> {
        let participants = self.load_all()?;
        Ok(position_by_normalized_identifier(&participants, canonical)
            .map(|index| participants[index].clone()))
    }

    /// Stamps `participants[index]` as verified at `at` and persists the whole roster.
    /// A participant that is already verified keeps its original stamp and nothing is written.
    fn mark_verified(&self, participants: &mut [Participant], index: usize, at: String) -> Result<()> {
        let participant = participants
            .get_mut(index)
            .ok_or_else(|| Error::StoreUnavailable(format!("roster has no record at {index}")))?;
        if participant.is_verified() {
            return Ok(());
        }
        participant.status = VerificationStatus::Verified { at };
        self.persist(participants)
    }
}

/// Linear scan comparing the canonical form of each stored identifier. First match in
/// stored order wins; an empty canonical identifier never matches.
pub fn position_by_normalized_identifier(
    participants: &[Participant],
    canonical: &str,
) -> Option<usize> {
    if canonical.is_empty() {
        return None;
    }
    participants
        .iter()
        .position(|p| normalize_identifier(&p.identifier) == canonical)
}

pub(crate) fn warn_on_duplicate_identifiers(participants: &[Participant]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for participant in participants {
        *seen
            .entry(normalize_identifier(&participant.identifier))
            .or_default() += 1;
    }
    for (identifier, count) in seen.into_iter().filter(|(id, n)| !id.is_empty() && *n > 1) {
        warn!("Roster lists identifier {identifier} {count} times, the first one wins");
    }
}

pub trait KeyStore: Send + Sync {
    /// Reads every issued key. A key table that does not exist yet is empty.
    fn load_all(&self) -> Result<Vec<VolunteerKey>>;

    fn persist(&self, keys: &[VolunteerKey]) -> Result<()>;

    fn load_active_keys(&self) -> Result<HashSet<String>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|k| k.active)
            .map(|k| k.key)
            .collect())
    }

    fn issue(&self, owner_id: &str) -> Result<VolunteerKey> {
        let mut keys = self.load_all()?;
        let existing: HashSet<&str> = keys.iter().map(|k| k.key.as_str()).collect();
        let key = loop {
            let candidate = generate_volunteer_key();
            if !existing.contains(candidate.as_str()) {
                break candidate;
            }
        };
        let record = VolunteerKey::init(key, owner_id.to_string());
        keys.push(record.clone());
        self.persist(&keys)?;
        Ok(record)
    }

    /// Clears `active` on every record whose key matches exactly and returns how many
    /// matched. Zero matches is not an error.
    fn deactivate(&self, key: &str) -> Result<usize> {
        let mut keys = self.load_all()?;
        let mut affected = 0;
        for record in keys.iter_mut().filter(|k| k.key == key) {
            record.active = false;
            affected += 1;
        }
        self.persist(&keys)?;
        Ok(affected)
    }

    fn list_all(&self) -> Result<Vec<VolunteerKey>> {
        self.load_all()
    }
}
