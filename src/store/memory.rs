//! In-memory stores for tests. Writes are counted so tests can assert that an operation
//! left storage untouched.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crate::{
    errors::{Error, Result},
    models::{participant::Participant, volunteer_key::VolunteerKey},
    store::{KeyStore, RosterStore},
};

#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    participants: Mutex<Vec<Participant>>,
    persists: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryRosterStore {
    pub fn with_participants(participants: Vec<Participant>) -> Self {
        Self {
            participants: Mutex::new(participants),
            ..Default::default()
        }
    }

    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

impl RosterStore for MemoryRosterStore {
    fn load_all(&self) -> Result<Vec<Participant>> {
        Ok(self.participants.lock().expect("roster lock").clone())
    }

    fn persist(&self, participants: &[Participant]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable("roster is read-only".into()));
        }
        *self.participants.lock().expect("roster lock") = participants.to_vec();
        self.persists.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    keys: Mutex<Vec<VolunteerKey>>,
    persists: AtomicUsize,
}

impl MemoryKeyStore {
    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }
}

impl KeyStore for MemoryKeyStore {
    fn load_all(&self) -> Result<Vec<VolunteerKey>> {
        Ok(self.keys.lock().expect("key lock").clone())
    }

    fn persist(&self, keys: &[VolunteerKey]) -> Result<()> {
        *self.keys.lock().expect("key lock") = keys.to_vec();
        self.persists.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
