use crate::config::PasswordScheme;
use crate::error::AdminError;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};

/// Turns a supplied password into the value stored in the users table.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, password: &str) -> Result<String, AdminError>;
}

/// Stores the password exactly as given.
pub struct Plaintext;

impl PasswordEncoder for Plaintext {
    fn encode(&self, password: &str) -> Result<String, AdminError> {
        Ok(password.to_string())
    }
}

/// Salted Argon2id, stored as a PHC string.
#[derive(Default)]
pub struct Argon2Encoder {
    argon2: Argon2<'static>,
}

impl PasswordEncoder for Argon2Encoder {
    fn encode(&self, password: &str) -> Result<String, AdminError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AdminError::PasswordHash(e.to_string()))
    }
}

pub fn encoder_for(scheme: PasswordScheme) -> Box<dyn PasswordEncoder> {
    match scheme {
        PasswordScheme::Plaintext => Box::new(Plaintext),
        PasswordScheme::Argon2 => Box::new(Argon2Encoder::default()),
    }
}
