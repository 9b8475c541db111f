use rand::Rng;

use crate::consts::key_const::{VOLUNTEER_KEY_ALPHABET, VOLUNTEER_KEY_LEN};

pub fn generate_volunteer_key() -> String {
    let mut rng = rand::rng();
    (0..VOLUNTEER_KEY_LEN)
        .map(|_| {
            let idx = rng.random_range(0..VOLUNTEER_KEY_ALPHABET.len());
            char::from(VOLUNTEER_KEY_ALPHABET[idx])
        })
        .collect()
}
