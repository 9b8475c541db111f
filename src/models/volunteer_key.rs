use serde::{Deserialize, Serialize};

/// One row of the volunteer key table. Rows are never removed; revocation clears `active`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VolunteerKey {
    pub key: String,
    pub owner_id: String,
    pub active: bool,
}

impl VolunteerKey {
    pub fn init(key: String, owner_id: String) -> Self {
        Self {
            key,
            owner_id,
            active: true,
        }
    }
}
