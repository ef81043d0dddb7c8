use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Idempotency key for an insight draft: hex SHA-256 over its pipe-joined discriminators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Empty parts are dropped before joining.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw = parts
            .into_iter()
            .filter(|part| !part.as_ref().is_empty())
            .map(|part| part.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("|");

        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Fingerprint;

    #[test]
    fn hashes_pipe_joined_parts() {
        assert_eq!(
            Fingerprint::from_parts(["a", "b"]).as_str(),
            "0eab8a0a3380abf4c7d1fb0b43b66aafbb64a4b953e4eb2dccca579461912d0c"
        );
    }

    #[test]
    fn empty_parts_do_not_shift_the_join() {
        assert_eq!(
            Fingerprint::from_parts(["a", "", "b"]),
            Fingerprint::from_parts(["a", "b"])
        );
    }
}
