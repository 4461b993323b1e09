// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! NIP-19 `npub` display encoding for public keys.
//!
//! Cosmetic only: nothing in the auth flow depends on it.

use bech32::{Bech32, Hrp};

const NPUB_HRP: Hrp = Hrp::parse_unchecked("npub");

/// Encode a hex public key as `npub1...`, or `None` if it is not 32 bytes of hex.
pub fn encode_npub(pubkey_hex: &str) -> Option<String> {
    let bytes = hex::decode(pubkey_hex).ok()?;
    if bytes.len() != 32 {
        return None;
    }
    bech32::encode::<Bech32>(NPUB_HRP, &bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_vector() {
        // NIP-19 test vector
        assert_eq!(
            encode_npub("7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e")
                .as_deref(),
            Some("npub10elfcs4fr0l0r8af98jlmgdh9c8tcxjvz9qkw038js35mp4dma8qzvjptg")
        );
    }

    #[test]
    fn invalid_input_is_none() {
        assert_eq!(encode_npub("not hex"), None);
        assert_eq!(encode_npub("abcd"), None);
    }
}
