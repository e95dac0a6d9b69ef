// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source fingerprinting — SHA-256 of the container bytes, used to make sure a
// reload reads the same file that was opened.

use sha2::{Digest, Sha256};
use tonwerk_core::error::{Result, TonwerkError};

/// Lowercase hex SHA-256 of `data`.
pub fn fingerprint(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check re-read bytes against the fingerprint recorded at open time.
pub fn verify_fingerprint(data: &[u8], recorded: &str) -> Result<()> {
    let actual = fingerprint(data);
    if actual.eq_ignore_ascii_case(recorded) {
        return Ok(());
    }
    Err(TonwerkError::IntegrityMismatch {
        expected: recorded.to_owned(),
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::decoder::tests::le_container;

    #[test]
    fn fingerprint_is_lowercase_hex_of_fixed_width() {
        let digest = fingerprint(&le_container(&[(256, 4, 1, 4), (257, 4, 1, 3)], &[]));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn single_byte_edit_in_pixel_block_is_detected() {
        let original = le_container(&[(256, 4, 1, 2), (257, 4, 1, 2)], &[10, 20, 30, 40]);
        let recorded = fingerprint(&original);

        let mut edited = original.clone();
        edited[9] ^= 0x01;
        match verify_fingerprint(&edited, &recorded).unwrap_err() {
            TonwerkError::IntegrityMismatch { expected, actual } => {
                assert_eq!(expected, recorded);
                assert_eq!(actual, fingerprint(&edited));
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn appended_bytes_are_detected() {
        // Trailing data leaves the decoded raster identical but is still a
        // different source.
        let original = le_container(&[(256, 4, 1, 4), (257, 4, 1, 3)], &[]);
        let mut grown = original.clone();
        grown.extend_from_slice(&[0, 0, 0, 0]);
        assert!(verify_fingerprint(&grown, &fingerprint(&original)).is_err());
    }

    #[test]
    fn unchanged_source_verifies_with_either_hex_case() {
        let data = le_container(&[(256, 4, 1, 4), (257, 4, 1, 3)], &[]);
        let recorded = fingerprint(&data);
        assert!(verify_fingerprint(&data, &recorded).is_ok());
        assert!(verify_fingerprint(&data, &recorded.to_ascii_uppercase()).is_ok());
    }
}
