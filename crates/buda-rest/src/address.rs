//! Bitcoin withdrawal-address validation
//!
//! Withdrawals to a Bitcoin address are checked locally against the client's
//! configured [`BitcoinNetwork`] before any request is issued. Both legacy
//! Base58Check addresses and segwit (bech32/bech32m) addresses are accepted.

use buda_types::BitcoinNetwork;

// Base58Check version bytes per network
const MAINNET_P2PKH: u8 = 0x00;
const MAINNET_P2SH: u8 = 0x05;
const TESTNET_P2PKH: u8 = 0x6f;
const TESTNET_P2SH: u8 = 0xc4;

/// Returns true if `address` is a well-formed Bitcoin address for `network`
pub fn is_valid_btc_address(address: &str, network: BitcoinNetwork) -> bool {
    is_valid_base58(address, network) || is_valid_segwit(address, network)
}

/// Legacy address: Base58Check payload of version byte + 20-byte hash
fn is_valid_base58(address: &str, network: BitcoinNetwork) -> bool {
    let payload = match bs58::decode(address).with_check(None).into_vec() {
        Ok(payload) => payload,
        Err(_) => return false,
    };

    if payload.len() != 21 {
        return false;
    }

    match network {
        BitcoinNetwork::Mainnet => matches!(payload[0], MAINNET_P2PKH | MAINNET_P2SH),
        BitcoinNetwork::Testnet => matches!(payload[0], TESTNET_P2PKH | TESTNET_P2SH),
    }
}

/// Segwit address: bech32 (v0) or bech32m (v1+) with the network's HRP
fn is_valid_segwit(address: &str, network: BitcoinNetwork) -> bool {
    let (hrp, version, program) = match bech32::segwit::decode(address) {
        Ok(decoded) => decoded,
        Err(_) => return false,
    };

    let expected = match network {
        BitcoinNetwork::Mainnet => bech32::hrp::BC,
        BitcoinNetwork::Testnet => bech32::hrp::TB,
    };
    if hrp != expected {
        return false;
    }

    // v0 programs are exactly a P2WPKH or P2WSH hash
    if version.to_u8() == 0 && program.len() != 20 && program.len() != 32 {
        return false;
    }

    (2..=40).contains(&program.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_legacy_addresses() {
        assert!(is_valid_btc_address(
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            BitcoinNetwork::Mainnet
        ));
        assert!(is_valid_btc_address(
            "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy",
            BitcoinNetwork::Mainnet
        ));
    }

    #[test]
    fn test_testnet_legacy_addresses() {
        assert!(is_valid_btc_address(
            "mipcBbFg9gMiCh81Kj8tqqdgoZub1ZJRfn",
            BitcoinNetwork::Testnet
        ));
        assert!(is_valid_btc_address(
            "2MzQwSSnBHWHqSAqtTVQ6v47XtaisrJa1Vc",
            BitcoinNetwork::Testnet
        ));
        assert!(is_valid_btc_address(
            "n4eA2nbYqErp7H6jebchxAN59DmNpksexv",
            BitcoinNetwork::Testnet
        ));
    }

    #[test]
    fn test_network_mismatch_rejected() {
        // Valid mainnet address, wrong network
        assert!(!is_valid_btc_address(
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            BitcoinNetwork::Testnet
        ));
        // Valid testnet address, wrong network
        assert!(!is_valid_btc_address(
            "mipcBbFg9gMiCh81Kj8tqqdgoZub1ZJRfn",
            BitcoinNetwork::Mainnet
        ));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // Last character flipped
        assert!(!is_valid_btc_address(
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb",
            BitcoinNetwork::Mainnet
        ));
    }

    #[test]
    fn test_segwit_addresses() {
        assert!(is_valid_btc_address(
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4",
            BitcoinNetwork::Mainnet
        ));
        assert!(is_valid_btc_address(
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx",
            BitcoinNetwork::Testnet
        ));
        // HRP belongs to the other network
        assert!(!is_valid_btc_address(
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4",
            BitcoinNetwork::Testnet
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(!is_valid_btc_address("", BitcoinNetwork::Mainnet));
        assert!(!is_valid_btc_address("not-an-address", BitcoinNetwork::Mainnet));
        assert!(!is_valid_btc_address("bc1", BitcoinNetwork::Mainnet));
    }
}
