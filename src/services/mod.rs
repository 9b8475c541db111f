pub mod admin;
pub mod verification;
