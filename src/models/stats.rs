use serde::Serialize;

use crate::models::participant::Participant;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterStats {
    pub total: usize,
    pub verified: usize,
    pub unverified: usize,
}

impl RosterStats {
    pub fn from_participants(participants: &[Participant]) -> Self {
        let total = participants.len();
        let verified = participants.iter().filter(|p| p.is_verified()).count();
        Self {
            total,
            verified,
            unverified: total - verified,
        }
    }
}
