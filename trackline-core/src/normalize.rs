//! Shared helpers for turning carrier payload fragments into canonical types.
//!
//! Every mapping here is pass-through friendly: an unmapped input value is
//! preserved (status strings) or reported as unknown (container codes),
//! never dropped.

use std::collections::HashMap;

use trackline_types::{ContainerSize, ContainerType, ShipmentStatus};

/// Normalize a raw tracking number for matching: trimmed, uppercased.
#[must_use]
pub fn normalize_tracking_number(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Whether a normalized number has ISO 6346 container shape:
/// three owner letters, the `U` equipment category, seven digits.
#[must_use]
pub fn looks_like_iso6346(number: &str) -> bool {
    let bytes = number.as_bytes();
    bytes.len() == 11
        && bytes[..3].iter().all(u8::is_ascii_uppercase)
        && bytes[3] == b'U'
        && bytes[4..].iter().all(u8::is_ascii_digit)
}

/// Map a carrier status string using a per-carrier table, falling back to
/// the built-in vocabulary, then to verbatim pass-through.
#[must_use]
pub fn map_status(table: &HashMap<String, ShipmentStatus>, raw: &str) -> ShipmentStatus {
    let key = raw.trim().to_ascii_uppercase().replace([' ', '-'], "_");
    if let Some(status) = table.get(&key) {
        return status.clone();
    }
    builtin_status(&key, raw)
}

/// The built-in status vocabulary used when no per-carrier entry exists.
fn builtin_status(key: &str, raw: &str) -> ShipmentStatus {
    match key {
        "REGISTERED" | "BOOKED" | "BOOKING_CONFIRMED" => ShipmentStatus::Registered,
        "IN_TRANSIT" | "LOADED" | "DEPARTED" | "ON_WATER" => ShipmentStatus::InTransit,
        "TRANSSHIPMENT" | "TRANSHIPMENT" => ShipmentStatus::Transshipment,
        "ARRIVED" | "VESSEL_ARRIVED" => ShipmentStatus::Arrived,
        "DISCHARGED" | "UNLOADED" => ShipmentStatus::Discharged,
        "GATE_OUT" | "GATED_OUT" => ShipmentStatus::GateOut,
        "DELIVERED" => ShipmentStatus::Delivered,
        "EMPTY_RETURNED" | "EMPTY_RETURN" => ShipmentStatus::EmptyReturned,
        _ => ShipmentStatus::Other(raw.trim().to_string()),
    }
}

/// Parse a container size/type code into `(size, type)`.
///
/// Accepts both the friendly form carriers put in JSON (`"40HC"`, `"20GP"`)
/// and the ISO 6346 size-type code (`"22G1"`, `"45G1"`, `"L5G1"`). Unknown
/// codes yield `(None, None)`.
#[must_use]
pub fn parse_container_code(code: &str) -> (Option<ContainerSize>, Option<ContainerType>) {
    let code = code.trim().to_ascii_uppercase();
    if let Some(parsed) = parse_friendly_code(&code) {
        return parsed;
    }
    if let Some(parsed) = parse_iso_code(&code) {
        return parsed;
    }
    (None, None)
}

fn parse_friendly_code(code: &str) -> Option<(Option<ContainerSize>, Option<ContainerType>)> {
    let (size_str, type_str) = code.split_at_checked(2)?;
    let size = match size_str {
        "20" => ContainerSize::Size20,
        "40" => ContainerSize::Size40,
        "45" => ContainerSize::Size45,
        _ => return None,
    };
    let container_type = match type_str {
        "GP" | "DV" => Some(ContainerType::Gp),
        "HC" | "HQ" => Some(ContainerType::Hc),
        "RF" | "RH" => Some(ContainerType::Rf),
        "OT" => Some(ContainerType::Ot),
        "" => None,
        _ => return None,
    };
    Some((Some(size), container_type))
}

fn parse_iso_code(code: &str) -> Option<(Option<ContainerSize>, Option<ContainerType>)> {
    let bytes = code.as_bytes();
    if bytes.len() != 4 {
        return None;
    }
    // First char is length, second is height, third is the type group.
    let size = match bytes[0] {
        b'2' => ContainerSize::Size20,
        b'4' => ContainerSize::Size40,
        b'9' | b'L' => ContainerSize::Size45,
        _ => return None,
    };
    let high_cube = matches!(bytes[1], b'5' | b'E');
    let container_type = match bytes[2] {
        b'G' if high_cube => ContainerType::Hc,
        b'G' => ContainerType::Gp,
        b'R' => ContainerType::Rf,
        b'U' => ContainerType::Ot,
        _ => return None,
    };
    Some((Some(size), Some(container_type)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso6346_shape_detection() {
        assert!(looks_like_iso6346("MAEU1234567"));
        assert!(looks_like_iso6346("MSCU7654321"));
        assert!(!looks_like_iso6346("MAEU123456")); // too short
        assert!(!looks_like_iso6346("MAEX1234567")); // category letter not U
        assert!(!looks_like_iso6346("1AEU1234567"));
        assert!(!looks_like_iso6346("MAEU12345A7"));
    }

    #[test]
    fn status_mapping_prefers_carrier_table() {
        let mut table = HashMap::new();
        table.insert("VD".to_string(), ShipmentStatus::Delivered);
        assert_eq!(map_status(&table, "VD"), ShipmentStatus::Delivered);
        assert_eq!(map_status(&table, "gate out"), ShipmentStatus::GateOut);
        assert_eq!(
            map_status(&table, "CUSTOMS HOLD"),
            ShipmentStatus::Other("CUSTOMS HOLD".to_string())
        );
    }

    #[test]
    fn container_codes_friendly_and_iso() {
        assert_eq!(
            parse_container_code("40HC"),
            (Some(ContainerSize::Size40), Some(ContainerType::Hc))
        );
        assert_eq!(
            parse_container_code("20gp"),
            (Some(ContainerSize::Size20), Some(ContainerType::Gp))
        );
        assert_eq!(
            parse_container_code("22G1"),
            (Some(ContainerSize::Size20), Some(ContainerType::Gp))
        );
        assert_eq!(
            parse_container_code("45G1"),
            (Some(ContainerSize::Size40), Some(ContainerType::Hc))
        );
        assert_eq!(
            parse_container_code("L5G1"),
            (Some(ContainerSize::Size45), Some(ContainerType::Hc))
        );
        assert_eq!(
            parse_container_code("42R1"),
            (Some(ContainerSize::Size40), Some(ContainerType::Rf))
        );
        assert_eq!(parse_container_code("flatrack"), (None, None));
    }
}
