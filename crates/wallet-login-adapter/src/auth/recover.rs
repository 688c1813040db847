/*
[INPUT]:  Signed message and hex signature
[OUTPUT]: Recovered signer address, address comparison
[POS]:    Auth layer - EIP-191 signature recovery
[UPDATE]: When supporting signature schemes other than personal_sign
*/

use alloy_signer::Signature;

use crate::http::ProviderError;

/// Recover the checksummed address that produced `signature` over `message`.
///
/// `message` is hashed with the EIP-191 `personal_sign` prefix, matching
/// what wallets do for login challenges.
pub fn recover_signer(message: &str, signature: &str) -> Result<String, ProviderError> {
    let signature_hex = signature.trim();
    let signature_hex = signature_hex
        .strip_prefix("0x")
        .unwrap_or(signature_hex);
    let bytes = hex::decode(signature_hex)
        .map_err(|e| ProviderError::Internal(format!("signature is not hex: {e}")))?;
    let signature = Signature::from_raw(&bytes)
        .map_err(|e| ProviderError::Internal(format!("malformed signature: {e}")))?;

    let address = signature
        .recover_address_from_msg(message.as_bytes())
        .map_err(|e| ProviderError::Internal(format!("signer recovery failed: {e}")))?;

    Ok(address.to_checksum(None))
}

/// Compare two EVM addresses ignoring case and an optional 0x prefix
pub fn addresses_equal(left: &str, right: &str) -> bool {
    normalize_evm_address(left) == normalize_evm_address(right)
}

fn normalize_evm_address(address: &str) -> String {
    let address = address.trim();
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address)
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("0xABC", "0xabc", true)]
    #[case("0xabc", "abc", true)]
    #[case(" 0XAbC ", "0xabc", true)]
    #[case("0xabc", "0xabd", false)]
    fn test_addresses_equal(#[case] left: &str, #[case] right: &str, #[case] expected: bool) {
        assert_eq!(addresses_equal(left, right), expected);
    }

    #[test]
    fn test_recover_signer_rejects_garbage() {
        assert!(recover_signer("xyz123", "0xsig").is_err());
        assert!(recover_signer("xyz123", "0x1234").is_err());
    }
}
