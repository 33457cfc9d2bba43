// Text to EVM primitive conversions shared by the codec

use alloy::hex;
use alloy::primitives::Address;
use error_stack::{Report, ResultExt};

use crate::errors::{ArgPath, BridgeError, BridgeResult};

/// The text after a `0x` or `0X` prefix, if there is one.
pub fn strip_hex_prefix(value: &str) -> Option<&str> {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))
}

/// Parses a 20 byte hex address, with or without `0x`.
/// Mixed-case input must carry a valid EIP-55 checksum; all-lower and
/// all-upper input is accepted as is.
pub fn string_to_address(address_str: &str, path: &ArgPath) -> BridgeResult<Address> {
    let address_error = |reason: String| {
        Report::new(BridgeError::AddressFormat {
            path: path.clone(),
            value: address_str.to_string(),
            reason,
        })
    };

    let body = strip_hex_prefix(address_str).unwrap_or(address_str);

    if body.len() != 40 {
        return Err(address_error(format!(
            "expected 20 bytes (40 hex characters), got {} characters",
            body.len()
        )));
    }
    let bytes = hex::decode(body).map_err(|e| address_error(e.to_string()))?;
    let address = Address::from_slice(&bytes);

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = address.to_checksum(None);
        if &checksummed[2..] != body {
            return Err(Report::new(BridgeError::Checksum {
                path: path.clone(),
                value: address_str.to_string(),
            }))
            .attach_printable(format!("Expected checksum casing: {}", checksummed));
        }
    }
    Ok(address)
}

/// Decodes hex input (optional `0x` or `0X`) such as contract bytecode.
pub fn decode_hex(field: &str, value: &str) -> BridgeResult<Vec<u8>> {
    let body = value.trim();
    let body = strip_hex_prefix(body).unwrap_or(body);
    hex::decode(body).map_err(|e| {
        Report::new(BridgeError::Encoding { field: field.to_string(), reason: e.to_string() })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0x0000000000000000000000000000000000000001" ; "lowercase with prefix")]
    #[test_case("0000000000000000000000000000000000000001" ; "without prefix")]
    #[test_case("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed" ; "valid checksum")]
    #[test_case("0xFB6916095CA1DF60BB79CE92CE3EA74C37C5D359" ; "uppercase")]
    fn test_valid_addresses(input: &str) {
        assert!(string_to_address(input, &ArgPath::named("to")).is_ok());
    }

    #[test]
    fn test_address_value() {
        let address =
            string_to_address("0x0000000000000000000000000000000000000001", &ArgPath::named("to"))
                .unwrap();
        let mut expected = [0u8; 20];
        expected[19] = 1;
        assert_eq!(address.0 .0, expected);
    }

    #[test_case("0x00000000000000000000000000000000000001" ; "19 bytes")]
    #[test_case("0x000000000000000000000000000000000000000001" ; "21 bytes")]
    #[test_case("0xGG00000000000000000000000000000000000001" ; "invalid hex")]
    #[test_case("5" ; "integer literal")]
    fn test_invalid_addresses(input: &str) {
        let err = string_to_address(input, &ArgPath::named("to")).unwrap_err();
        assert!(matches!(err.current_context(), BridgeError::AddressFormat { .. }));
    }

    #[test]
    fn test_bad_checksum() {
        let err =
            string_to_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD", &ArgPath::named("to"))
                .unwrap_err();
        assert!(matches!(err.current_context(), BridgeError::Checksum { .. }));
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("bin", "0x6080").unwrap(), vec![0x60, 0x80]);
        assert_eq!(decode_hex("bin", "6080\n").unwrap(), vec![0x60, 0x80]);
        assert_eq!(decode_hex("bin", "0X6080").unwrap(), vec![0x60, 0x80]);
        let err = decode_hex("bin", "0x608").unwrap_err();
        assert!(matches!(err.current_context(), BridgeError::Encoding { .. }));
    }
}
