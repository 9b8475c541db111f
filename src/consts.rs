pub mod roster_const {
    /// Status tokens (compared trimmed and case-insensitively) that mark a participant verified.
    pub const VERIFIED_STATUS_TOKENS: [&str; 2] = ["yes", "present"];
    /// Status written back for a verified participant.
    pub const VERIFIED_STATUS: &str = "Yes";
    pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

pub mod key_const {
    pub const VOLUNTEER_KEY_LEN: usize = 16;
    /// Upper-case letters and digits without the look-alikes `0 O 1 I L`.
    pub const VOLUNTEER_KEY_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
}

pub mod config_const {
    pub const DEFAULT_ADMIN_SECRET: &str = "change-this-admin-secret";
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: &str = "10000";
    pub const DEFAULT_ROSTER_PATH: &str = "data/students.csv";
    pub const DEFAULT_KEYS_PATH: &str = "data/volunteer_keys.csv";
}
