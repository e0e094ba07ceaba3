use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{CryptoRng, RngCore};

use crate::env::Env;

pub const WEBUI_SECRET_KEY: &str = "WEBUI_SECRET_KEY";
pub const WEBUI_JWT_SECRET_KEY: &str = "WEBUI_JWT_SECRET_KEY";

/// Random bytes behind a generated secret.
pub const SECRET_KEY_BYTES: usize = 32;

/// The secret the application will run with, and where it came from.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretKey {
    /// `WEBUI_SECRET_KEY` was set.
    Primary(String),
    /// Only `WEBUI_JWT_SECRET_KEY` was set.
    Fallback(String),
    /// Neither was set; generated for this start.
    Generated(String),
}

impl SecretKey {
    /// Resolve the secret from the environment, generating one only when
    /// neither variable is present and non-empty. Each variable is checked
    /// on its own.
    pub fn provision<R: RngCore + CryptoRng>(env: &Env, rng: &mut R) -> Self {
        if let Some(value) = env.non_empty(WEBUI_SECRET_KEY) {
            SecretKey::Primary(value.to_string())
        } else if let Some(value) = env.non_empty(WEBUI_JWT_SECRET_KEY) {
            SecretKey::Fallback(value.to_string())
        } else {
            SecretKey::Generated(generate(rng))
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SecretKey::Primary(v) | SecretKey::Fallback(v) | SecretKey::Generated(v) => v,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, SecretKey::Generated(_))
    }

    /// Name of the variable the secret was read from, if any.
    pub fn source(&self) -> Option<&'static str> {
        match self {
            SecretKey::Primary(_) => Some(WEBUI_SECRET_KEY),
            SecretKey::Fallback(_) => Some(WEBUI_JWT_SECRET_KEY),
            SecretKey::Generated(_) => None,
        }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            SecretKey::Primary(_) => "Primary",
            SecretKey::Fallback(_) => "Fallback",
            SecretKey::Generated(_) => "Generated",
        };
        write!(f, "{kind}(***)")
    }
}

fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> String {
    let mut bytes = [0u8; SECRET_KEY_BYTES];
    rng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::{OsRng, StdRng};
    use rand::SeedableRng;

    #[test]
    fn configured_primary_is_kept() {
        let mut rng = OsRng;
        for env in [
            Env::from_pairs([(WEBUI_SECRET_KEY, "abc")]),
            Env::from_pairs([(WEBUI_SECRET_KEY, "abc"), (WEBUI_JWT_SECRET_KEY, "jwt")]),
            Env::from_pairs([(WEBUI_SECRET_KEY, "abc"), (WEBUI_JWT_SECRET_KEY, "")]),
        ] {
            let secret = SecretKey::provision(&env, &mut rng);
            assert_eq!(secret, SecretKey::Primary("abc".into()));
            assert_eq!(secret.value(), "abc");
        }
    }

    #[test]
    fn fallback_alone_suppresses_generation() {
        let env = Env::from_pairs([(WEBUI_SECRET_KEY, ""), (WEBUI_JWT_SECRET_KEY, "jwt")]);
        let secret = SecretKey::provision(&env, &mut OsRng);
        assert_eq!(secret, SecretKey::Fallback("jwt".into()));
        assert_eq!(secret.source(), Some(WEBUI_JWT_SECRET_KEY));
    }

    #[test]
    fn generates_when_both_absent_or_empty() {
        let env = Env::from_pairs([(WEBUI_SECRET_KEY, ""), (WEBUI_JWT_SECRET_KEY, "")]);
        let secret = SecretKey::provision(&env, &mut OsRng);
        assert!(secret.is_generated());
        let decoded = URL_SAFE_NO_PAD.decode(secret.value()).unwrap();
        assert_eq!(decoded.len(), SECRET_KEY_BYTES);
        assert!(secret
            .value()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn generated_secrets_differ_between_runs() {
        let env = Env::default();
        let a = SecretKey::provision(&env, &mut OsRng);
        let b = SecretKey::provision(&env, &mut OsRng);
        assert_ne!(a.value(), b.value());
    }

    #[test]
    fn generation_follows_the_rng() {
        let env = Env::default();
        let a = SecretKey::provision(&env, &mut StdRng::seed_from_u64(7));
        let b = SecretKey::provision(&env, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn debug_does_not_leak_value() {
        let secret = SecretKey::Primary("hunter2".into());
        assert_eq!(format!("{secret:?}"), "Primary(***)");
    }
}
