use serde::{Deserialize, Serialize};

use crate::consts::roster_const::{VERIFIED_STATUS, VERIFIED_STATUS_TOKENS};

/// One row of the roster table as stored on disk.
///
/// Accepts both the canonical headers and the legacy spreadsheet export headers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    #[serde(alias = "UUID")]
    pub identifier: String,
    #[serde(alias = "NAME")]
    pub name: String,
    #[serde(alias = "EMAIL-ID")]
    pub contact: String,
    #[serde(alias = "BRANCH")]
    pub affiliation: String,
    #[serde(default, alias = "verifyed status")]
    pub status: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Unverified,
    Verified { at: String },
}

impl VerificationStatus {
    fn from_columns(status: &str, time: String) -> Self {
        let status = status.trim().to_lowercase();
        if VERIFIED_STATUS_TOKENS.contains(&status.as_str()) {
            VerificationStatus::Verified { at: time }
        } else {
            VerificationStatus::Unverified
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub identifier: String,
    pub name: String,
    pub contact: String,
    pub affiliation: String,
    pub status: VerificationStatus,
}

impl Participant {
    pub fn is_verified(&self) -> bool {
        matches!(self.status, VerificationStatus::Verified { .. })
    }

    pub fn verified_at(&self) -> Option<&str> {
        match &self.status {
            VerificationStatus::Verified { at } => Some(at),
            VerificationStatus::Unverified => None,
        }
    }
}

impl From<ParticipantRow> for Participant {
    fn from(row: ParticipantRow) -> Self {
        Self {
            status: VerificationStatus::from_columns(&row.status, row.time),
            identifier: row.identifier,
            name: row.name,
            contact: row.contact,
            affiliation: row.affiliation,
        }
    }
}

impl From<&Participant> for ParticipantRow {
    fn from(participant: &Participant) -> Self {
        let (status, time) = match &participant.status {
            VerificationStatus::Verified { at } => (VERIFIED_STATUS.to_string(), at.clone()),
            VerificationStatus::Unverified => (String::new(), String::new()),
        };
        Self {
            identifier: participant.identifier.clone(),
            name: participant.name.clone(),
            contact: participant.contact.clone(),
            affiliation: participant.affiliation.clone(),
            status,
            time,
        }
    }
}
