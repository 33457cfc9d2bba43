use alloy::primitives::{Sign, I256, U256};
use error_stack::{Report, ResultExt};
use indexmap::IndexMap;

use super::types::{EncodedValue, RawArgument, TupleField, TypeDescriptor};
use crate::codec::conversion::{string_to_address, strip_hex_prefix};
use crate::errors::{ArgPath, BridgeError, BridgeResult};

/// Converts positional raw arguments against the resolved descriptors.
/// The counts are compared before any element is looked at.
pub fn convert_arguments(
    descriptors: &[TypeDescriptor],
    raw_arguments: &[RawArgument],
) -> BridgeResult<Vec<EncodedValue>> {
    if descriptors.len() != raw_arguments.len() {
        let mut error = Report::new(BridgeError::ArgumentCount {
            expected: descriptors.len(),
            actual: raw_arguments.len(),
        });
        error = error.attach_printable("Expected arguments:");
        for (i, descriptor) in descriptors.iter().enumerate() {
            let status = if i < raw_arguments.len() { "✓" } else { "✗ missing" };
            error = error.attach_printable(format!("  [{}] {} {}", i, descriptor, status));
        }
        return Err(error);
    }

    descriptors
        .iter()
        .zip(raw_arguments.iter())
        .enumerate()
        .map(|(i, (descriptor, raw))| convert_argument(descriptor, raw, &ArgPath::argument(i)))
        .collect()
}

/// Dispatches on the descriptor, never on what the raw text looks like.
pub fn convert_argument(
    descriptor: &TypeDescriptor,
    raw: &RawArgument,
    path: &ArgPath,
) -> BridgeResult<EncodedValue> {
    check_width(descriptor)?;
    match descriptor {
        TypeDescriptor::Uint(bits) => {
            let text = expect_text(descriptor, raw, path)?;
            convert_uint(text, *bits, path)
        }
        TypeDescriptor::Int(bits) => {
            let text = expect_text(descriptor, raw, path)?;
            convert_int(text, *bits, path)
        }
        TypeDescriptor::Bool => {
            let text = expect_text(descriptor, raw, path)?;
            convert_bool(text, path)
        }
        TypeDescriptor::FixedBytes(size) => {
            let text = expect_text(descriptor, raw, path)?;
            let bytes = text.as_bytes();
            if bytes.len() != *size {
                return Err(Report::new(BridgeError::ByteLength {
                    path: path.clone(),
                    ty: descriptor.to_string(),
                    expected: *size,
                    actual: bytes.len(),
                }))
                .attach_printable("Fixed-size byte values are never padded or truncated");
            }
            Ok(EncodedValue::FixedBytes(bytes.to_vec()))
        }
        TypeDescriptor::Address => {
            let text = expect_text(descriptor, raw, path)?;
            Ok(EncodedValue::Address(string_to_address(text, path)?))
        }
        TypeDescriptor::String => {
            Ok(EncodedValue::String(expect_text(descriptor, raw, path)?.to_string()))
        }
        TypeDescriptor::Bytes => {
            Ok(EncodedValue::Bytes(expect_text(descriptor, raw, path)?.as_bytes().to_vec()))
        }
        TypeDescriptor::FixedArray(inner, size) => {
            let structured = structure(descriptor, raw, path)?;
            let items = expect_list(descriptor, &structured, path)?;
            if items.len() != *size {
                return Err(Report::new(BridgeError::ArrayLength {
                    path: path.clone(),
                    ty: descriptor.to_string(),
                    expected: *size,
                    actual: items.len(),
                }));
            }
            Ok(EncodedValue::FixedArray(convert_elements(inner, items, path)?))
        }
        TypeDescriptor::Array(inner) => {
            let structured = structure(descriptor, raw, path)?;
            let items = expect_list(descriptor, &structured, path)?;
            Ok(EncodedValue::Array(convert_elements(inner, items, path)?))
        }
        TypeDescriptor::Tuple(fields) => {
            let structured = structure(descriptor, raw, path)?;
            convert_tuple(descriptor, fields, &structured, path)
        }
    }
}

fn convert_elements(
    inner: &TypeDescriptor,
    items: &[RawArgument],
    path: &ArgPath,
) -> BridgeResult<Vec<EncodedValue>> {
    items.iter().enumerate().map(|(i, item)| convert_argument(inner, item, &path.index(i))).collect()
}

fn convert_tuple(
    descriptor: &TypeDescriptor,
    fields: &[TupleField],
    raw: &RawArgument,
    path: &ArgPath,
) -> BridgeResult<EncodedValue> {
    let mut tuple = Vec::with_capacity(fields.len());
    match raw {
        RawArgument::Record(entries) => {
            for field in fields.iter() {
                let entry = entries.get(&field.name).ok_or_else(|| {
                    Report::new(BridgeError::TupleField {
                        path: path.clone(),
                        reason: format!("missing component '{}' of {}", field.name, descriptor),
                    })
                })?;
                let value = convert_argument(&field.ty, entry, &path.field(&field.name))?;
                tuple.push((field.name.clone(), value));
            }
            reject_unknown_keys(entries, fields, path)?;
        }
        RawArgument::List(items) => {
            if items.len() != fields.len() {
                return Err(Report::new(BridgeError::TupleField {
                    path: path.clone(),
                    reason: format!(
                        "{} has {} components, got {}",
                        descriptor,
                        fields.len(),
                        items.len()
                    ),
                }));
            }
            for (i, (field, item)) in fields.iter().zip(items.iter()).enumerate() {
                let field_path =
                    if field.name.is_empty() { path.index(i) } else { path.field(&field.name) };
                tuple.push((field.name.clone(), convert_argument(&field.ty, item, &field_path)?));
            }
        }
        RawArgument::Text(_) => return Err(shape_error(descriptor, raw, path, "record or list")),
    }
    Ok(EncodedValue::Tuple(tuple))
}

fn reject_unknown_keys(
    entries: &IndexMap<String, RawArgument>,
    fields: &[TupleField],
    path: &ArgPath,
) -> BridgeResult<()> {
    let unknown: Vec<&str> = entries
        .keys()
        .filter(|key| !fields.iter().any(|field| &field.name == *key))
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    Err(Report::new(BridgeError::TupleField {
        path: path.clone(),
        reason: format!("unknown components: {}", unknown.join(", ")),
    }))
}

/// Integer widths are multiples of 8 up to 256, fixed bytes hold 1 to 32 bytes.
fn check_width(descriptor: &TypeDescriptor) -> BridgeResult<()> {
    let valid = match descriptor {
        TypeDescriptor::Uint(bits) | TypeDescriptor::Int(bits) => {
            (8..=256).contains(bits) && bits % 8 == 0
        }
        TypeDescriptor::FixedBytes(size) => (1..=32).contains(size),
        _ => true,
    };
    if valid {
        Ok(())
    } else {
        Err(Report::new(BridgeError::UnsupportedType(descriptor.to_string())))
    }
}

fn convert_uint(text: &str, bits: usize, path: &ArgPath) -> BridgeResult<EncodedValue> {
    let ty = format!("uint{}", bits);
    let (sign, magnitude) = parse_integer_literal(text, &ty, path)?;
    if sign == Sign::Negative || magnitude.bit_len() > bits {
        return Err(Report::new(BridgeError::NumericRange {
            path: path.clone(),
            ty: ty.clone(),
            value: text.to_string(),
        }))
        .attach_printable(format!("{} range: 0 to 2^{} - 1", ty, bits));
    }
    Ok(EncodedValue::Uint { value: magnitude, bits })
}

fn convert_int(text: &str, bits: usize, path: &ArgPath) -> BridgeResult<EncodedValue> {
    let ty = format!("int{}", bits);
    let (sign, magnitude) = parse_integer_literal(text, &ty, path)?;
    // -2^(bits-1) ..= 2^(bits-1) - 1
    let limit = U256::from(1u8) << (bits - 1);
    let in_range = match sign {
        Sign::Positive => magnitude < limit,
        Sign::Negative => magnitude <= limit,
    };
    let value = if in_range { I256::checked_from_sign_and_abs(sign, magnitude) } else { None };
    let value = value.ok_or_else(|| {
        Report::new(BridgeError::NumericRange {
            path: path.clone(),
            ty: ty.clone(),
            value: text.to_string(),
        })
        .attach_printable(format!("{} range: -2^{} to 2^{} - 1", ty, bits - 1, bits - 1))
    })?;
    Ok(EncodedValue::Int { value, bits })
}

/// Base-10, or base-16 with a `0x` prefix, with an optional leading `-`.
fn parse_integer_literal(text: &str, ty: &str, path: &ArgPath) -> BridgeResult<(Sign, U256)> {
    let format_error = || {
        Report::new(BridgeError::NumericFormat {
            path: path.clone(),
            ty: ty.to_string(),
            value: text.to_string(),
        })
    };

    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (Sign::Negative, rest),
        None => (Sign::Positive, text),
    };
    let (digits, radix) = match strip_hex_prefix(body) {
        Some(hex) => (hex, 16u32),
        None => (body, 10u32),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format_error());
    }

    let magnitude = U256::from_str_radix(digits, radix as u64).map_err(|_| {
        Report::new(BridgeError::NumericRange {
            path: path.clone(),
            ty: ty.to_string(),
            value: text.to_string(),
        })
        .attach_printable("Value exceeds 256 bits")
    })?;

    let sign = if magnitude.is_zero() { Sign::Positive } else { sign };
    Ok((sign, magnitude))
}

fn convert_bool(text: &str, path: &ArgPath) -> BridgeResult<EncodedValue> {
    if text.eq_ignore_ascii_case("true") {
        Ok(EncodedValue::Bool(true))
    } else if text.eq_ignore_ascii_case("false") {
        Ok(EncodedValue::Bool(false))
    } else {
        Err(Report::new(BridgeError::BooleanFormat { path: path.clone(), value: text.to_string() }))
    }
}

fn expect_text<'a>(
    descriptor: &TypeDescriptor,
    raw: &'a RawArgument,
    path: &ArgPath,
) -> BridgeResult<&'a str> {
    match raw {
        RawArgument::Text(text) => Ok(text.as_str()),
        _ => Err(shape_error(descriptor, raw, path, "text")),
    }
}

fn expect_list<'a>(
    descriptor: &TypeDescriptor,
    raw: &'a RawArgument,
    path: &ArgPath,
) -> BridgeResult<&'a [RawArgument]> {
    match raw {
        RawArgument::List(items) => Ok(items.as_slice()),
        _ => Err(shape_error(descriptor, raw, path, "list")),
    }
}

/// String-only hosts hand composite values over as a JSON document.
fn structure(
    descriptor: &TypeDescriptor,
    raw: &RawArgument,
    path: &ArgPath,
) -> BridgeResult<RawArgument> {
    let RawArgument::Text(text) = raw else {
        return Ok(raw.clone());
    };
    let document: serde_json::Value = serde_json::from_str(text)
        .map_err(|_| shape_error(descriptor, raw, path, "list or record"))
        .attach_printable(format!("'{}' is not a JSON list or object", text))?;
    let structured = RawArgument::try_from(document).map_err(|reason| {
        Report::new(BridgeError::ArgumentShape {
            path: path.clone(),
            ty: descriptor.to_string(),
            expected: "list or record".to_string(),
            actual: reason,
        })
    })?;
    if let RawArgument::Text(_) = structured {
        return Err(shape_error(descriptor, raw, path, "list or record"));
    }
    Ok(structured)
}

fn shape_error(
    descriptor: &TypeDescriptor,
    raw: &RawArgument,
    path: &ArgPath,
    expected: &str,
) -> Report<BridgeError> {
    Report::new(BridgeError::ArgumentShape {
        path: path.clone(),
        ty: descriptor.to_string(),
        expected: expected.to_string(),
        actual: raw.kind().to_string(),
    })
}
