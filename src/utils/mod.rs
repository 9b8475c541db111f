pub mod blocking;
pub mod json_body;
pub mod normalize;
pub mod secret;
pub mod time;
pub mod token;
