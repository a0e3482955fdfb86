//! Random identifiers for session tokens and fingerprints.

use rand::Rng;

/// Produces unique, unguessable opaque strings.
///
/// The session manager calls this for every new session token and for
/// every new login fingerprint. Swap it out if your deployment needs a
/// particular id format (UUIDs, a KMS-backed generator, ...).
pub trait IdGenerator: Send + Sync + 'static {
    /// Returns a fresh identifier. Must not repeat.
    fn generate(&self) -> String;
}

/// Generates random 32-character hex strings (128 bits of entropy).
///
/// 128 bits is enough that guessing a live session token is
/// computationally infeasible (2^128 possibilities).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        // `{:02x}` = lowercase hex, zero-padded to 2 digits per byte.
        let bytes: [u8; 16] = rng.random();
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generate_returns_32_hex_chars() {
        let id = RandomIdGenerator.generate();

        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_does_not_repeat() {
        let ids: HashSet<String> =
            (0..1000).map(|_| RandomIdGenerator.generate()).collect();

        assert_eq!(ids.len(), 1000);
    }
}
