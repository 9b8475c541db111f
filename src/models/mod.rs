pub mod participant;
pub mod stats;
pub mod volunteer_key;
