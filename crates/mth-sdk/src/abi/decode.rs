//! ABI decoding

use mth_primitives::{Address, U256};

use super::types::{ParamType, Token};
use crate::SdkError;

/// Decode tokens from ABI-encoded data
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, SdkError> {
    types
        .iter()
        .enumerate()
        .map(|(i, param_type)| decode_token(param_type, data, i * 32))
        .collect()
}

/// Decode the token whose head slot starts at `offset`
fn decode_token(param_type: &ParamType, data: &[u8], offset: usize) -> Result<Token, SdkError> {
    let word = read_word(data, offset)?;

    match param_type {
        ParamType::Address => {
            let mut addr_bytes = [0u8; 20];
            addr_bytes.copy_from_slice(&word[12..32]);
            Ok(Token::Address(Address::from_bytes(addr_bytes)))
        }
        ParamType::Uint(bits) => {
            let value = U256::from_big_endian(word);
            if *bits < 256 && value.bits() > *bits {
                return Err(SdkError::AbiDecode(format!(
                    "Value does not fit in uint{}",
                    bits
                )));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Bool => match U256::from_big_endian(word) {
            v if v.is_zero() => Ok(Token::Bool(false)),
            v if v == U256::one() => Ok(Token::Bool(true)),
            _ => Err(SdkError::AbiDecode("Invalid bool word".to_string())),
        },
        ParamType::FixedBytes(size) => Ok(Token::FixedBytes(word[..*size].to_vec())),
        ParamType::Bytes => Ok(Token::Bytes(decode_tail(data, word)?)),
        ParamType::String => {
            let bytes = decode_tail(data, word)?;
            let s = String::from_utf8(bytes)
                .map_err(|e| SdkError::AbiDecode(format!("Invalid UTF-8: {}", e)))?;
            Ok(Token::String(s))
        }
    }
}

/// Follow a head offset word to its length-prefixed tail
fn decode_tail(data: &[u8], offset_word: &[u8]) -> Result<Vec<u8>, SdkError> {
    let offset = word_to_usize(offset_word)?;
    let len = word_to_usize(read_word(data, offset)?)?;
    let start = offset + 32;
    let end = start
        .checked_add(len)
        .ok_or_else(|| SdkError::AbiDecode("Length overflow".to_string()))?;
    check_length(data, end)?;
    Ok(data[start..end].to_vec())
}

fn read_word(data: &[u8], offset: usize) -> Result<&[u8], SdkError> {
    let end = offset
        .checked_add(32)
        .ok_or_else(|| SdkError::AbiDecode("Offset overflow".to_string()))?;
    check_length(data, end)?;
    Ok(&data[offset..end])
}

fn word_to_usize(word: &[u8]) -> Result<usize, SdkError> {
    let value = U256::from_big_endian(word);
    if value > U256::from(u32::MAX) {
        return Err(SdkError::AbiDecode(format!("Offset or length too large: {}", value)));
    }
    Ok(value.as_usize())
}

/// Check that data has at least `required` bytes
fn check_length(data: &[u8], required: usize) -> Result<(), SdkError> {
    if data.len() < required {
        return Err(SdkError::AbiDecode(format!(
            "Insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}
