//! Typed views over decoded call outputs.

use ethers_core::abi::Token;
use icogen_types::{Address, U256};

use crate::error::{GatewayError, Result};

fn first(tokens: Vec<Token>) -> Option<Token> {
    tokens.into_iter().next()
}

fn unexpected(method: &str, expected: &'static str) -> GatewayError {
    GatewayError::UnexpectedOutput {
        method: method.to_string(),
        expected,
    }
}

pub fn uint(tokens: Vec<Token>, method: &str) -> Result<U256> {
    first(tokens)
        .and_then(Token::into_uint)
        .ok_or_else(|| unexpected(method, "uint"))
}

pub fn address(tokens: Vec<Token>, method: &str) -> Result<Address> {
    first(tokens)
        .and_then(Token::into_address)
        .ok_or_else(|| unexpected(method, "address"))
}

pub fn string(tokens: Vec<Token>, method: &str) -> Result<String> {
    first(tokens)
        .and_then(Token::into_string)
        .ok_or_else(|| unexpected(method, "string"))
}

/// Unsigned value that must fit in 64 bits (timestamps).
pub fn uint64(tokens: Vec<Token>, method: &str) -> Result<u64> {
    let value = uint(tokens, method)?;
    if value > U256::from(u64::MAX) {
        return Err(unexpected(method, "uint64"));
    }
    Ok(value.low_u64())
}

/// Unsigned value that must fit in 32 bits (token decimals).
pub fn uint32(tokens: Vec<Token>, method: &str) -> Result<u32> {
    let value = uint(tokens, method)?;
    if value > U256::from(u32::MAX) {
        return Err(unexpected(method, "uint32"));
    }
    Ok(value.low_u32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_matching_tokens() {
        assert_eq!(uint(vec![Token::Uint(7u64.into())], "rate").unwrap(), U256::from(7u64));
        assert_eq!(
            address(vec![Token::Address(Address::repeat_byte(1))], "wallet").unwrap(),
            Address::repeat_byte(1)
        );
        assert_eq!(string(vec![Token::String("EXM".into())], "symbol").unwrap(), "EXM");
        assert_eq!(uint32(vec![Token::Uint(18u64.into())], "decimals").unwrap(), 18);
    }

    #[test]
    fn test_decode_mismatch() {
        let err = uint(vec![Token::String("x".into())], "tokenCap").unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedOutput { expected: "uint", .. }));
        assert!(address(vec![], "token").is_err());
    }

    #[test]
    fn test_decode_u64_overflow() {
        let big = Token::Uint(U256::from(u64::MAX) + U256::one());
        assert!(uint64(vec![big], "endTime").is_err());
        assert_eq!(uint64(vec![Token::Uint(U256::from(u64::MAX))], "endTime").unwrap(), u64::MAX);
    }
}
