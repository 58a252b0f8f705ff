//! Payload checksums.

use sha2::{Digest, Sha256};

use dtm_model::TableState;

use crate::error::{PersistenceError, Result};

/// Serialize the payload and return it together with its SHA-256 hex digest.
pub(crate) fn encode_payload(state: &TableState) -> Result<(Vec<u8>, String)> {
    let bytes = serde_json::to_vec(state)
        .map_err(|source| PersistenceError::Serialization { source })?;
    let digest = hex::encode(Sha256::digest(&bytes));
    Ok((bytes, digest))
}

/// SHA-256 hex digest of the canonical JSON encoding of `state`.
pub fn payload_checksum(state: &TableState) -> Result<String> {
    encode_payload(state).map(|(_, digest)| digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtm_model::seed_state;

    #[test]
    fn test_checksum_is_stable() {
        let state = seed_state();
        let first = payload_checksum(&state).unwrap();
        let second = payload_checksum(&state.clone()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_checksum_tracks_content() {
        let state = seed_state();
        let mut changed = state.clone();
        changed.rows[0].name = "Someone Else".to_string();
        assert_ne!(
            payload_checksum(&state).unwrap(),
            payload_checksum(&changed).unwrap()
        );
    }
}
