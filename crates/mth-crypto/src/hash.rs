//! Keccak-256 hashing

use mth_primitives::H256;
use sha3::{Digest, Keccak256};

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        let hash = keccak256(&[]);
        assert_eq!(
            hash.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        let hash = keccak256(b"hello");
        assert_eq!(
            hash.to_hex(),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_hex_input() {
        let data = hex::decode("deadbeef").unwrap();
        assert_eq!(
            keccak256(&data).to_hex(),
            "0xd4fd4e189132273036449fc9e11198c739161b4c0116a9a2dccdfa1c492006f1"
        );
    }

    #[test]
    fn test_keccak256_erc20_approve_selector() {
        // approve(address,uint256) => 0x095ea7b3
        let hash = keccak256(b"approve(address,uint256)");
        assert_eq!(&hash.as_bytes()[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn test_keccak256_transfer_event_signature() {
        // Topic 0 of every ERC-20 Transfer log
        assert_eq!(
            keccak256(b"Transfer(address,address,uint256)").to_hex(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }
}
