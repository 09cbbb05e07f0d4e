//! Integration tests for address flattening, override resolution, and
//! free-text parsing through the public API.

use handwrytten::address::{flatten, resolve, OrderDefaults, Role, Sender};
use handwrytten::{parse_address, Address, AddressError, Recipient};
use serde_json::{json, Map, Value};

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

#[test]
fn test_flattening_spec_example() {
    let friendly = obj(json!({
        "firstName": "Jane",
        "street1": "123 Main St",
        "city": "Phoenix",
        "state": "AZ",
        "zip": "85001",
    }));

    let wire = flatten(&friendly, Role::To);
    assert_eq!(wire["to_first_name"], "Jane");
    assert_eq!(wire["to_address1"], "123 Main St");
    assert_eq!(wire["to_city"], "Phoenix");
    assert_eq!(wire["to_state"], "AZ");
    assert_eq!(wire["to_zip"], "85001");
    assert!(!wire.contains_key("to_address2"));
}

#[test]
fn test_address_value_object_round_trip() {
    let recipient: Recipient = Address::new("Jane", "Doe", "123 Main St", "Phoenix", "AZ", "85001")
        .street2("Apt 4B")
        .company("Acme Inc")
        .into();

    let resolved = resolve(
        &[recipient],
        &OrderDefaults {
            message: Some("Hi".to_string()),
            ..OrderDefaults::default()
        },
    )
    .unwrap();

    let entry = &resolved.entries[0];
    assert_eq!(entry["to_address2"], "Apt 4B");
    assert_eq!(entry["to_business_name"], "Acme Inc");
    assert_eq!(entry["to_country"], "US");
}

#[test]
fn test_message_inheritance_and_retention() {
    let with_own = obj(json!({
        "firstName": "A",
        "street1": "1 St",
        "message": "Own message",
    }));
    let without = obj(json!({"firstName": "B", "street1": "2 St"}));

    let resolved = resolve(
        &[Recipient::from_map(with_own), Recipient::from_map(without)],
        &OrderDefaults {
            message: Some("Default".to_string()),
            ..OrderDefaults::default()
        },
    )
    .unwrap();

    assert_eq!(resolved.entries[0]["message"], "Own message");
    assert_eq!(resolved.entries[1]["message"], "Default");
}

#[test]
fn test_integer_sender_semantics_at_both_levels() {
    // Call level: one request-wide return_address_id, no from_* fields.
    let call_level = resolve(
        &[Recipient::Saved(1)],
        &OrderDefaults {
            message: Some("m".to_string()),
            sender: Some(Sender::Saved(500)),
            ..OrderDefaults::default()
        },
    )
    .unwrap();
    assert_eq!(call_level.return_address_id, Some(500));
    assert!(!call_level.entries[0].contains_key("return_address_id"));

    // Entry level: return_address_id on that entry only.
    let entry_level = resolve(
        &[
            Recipient::from_map(obj(json!({"firstName": "A", "sender": 501}))),
            Recipient::Saved(2),
        ],
        &OrderDefaults {
            message: Some("m".to_string()),
            ..OrderDefaults::default()
        },
    )
    .unwrap();
    assert_eq!(entry_level.return_address_id, None);
    assert_eq!(entry_level.entries[0]["return_address_id"], 501);
    assert!(!entry_level.entries[1].contains_key("return_address_id"));
}

#[test]
fn test_unsupported_recipient_shapes_rejected() {
    for value in [json!(1.5), json!("text"), json!(true), json!([1, 2])] {
        assert!(matches!(
            Recipient::try_from(value),
            Err(AddressError::InvalidRecipient { .. })
        ));
    }
}

#[test]
fn test_parse_address_spec_example() {
    let address = parse_address("Jane Doe, 123 Main St, Phoenix AZ 85001").unwrap();
    assert_eq!(address.first_name, "Jane");
    assert_eq!(address.last_name, "Doe");
    assert_eq!(address.street1, "123 Main St");
    assert_eq!(address.city, "Phoenix");
    assert_eq!(address.state, "AZ");
    assert_eq!(address.zip, "85001");
}

#[test]
fn test_parse_address_failure_modes() {
    // Fewer than three comma-separated segments.
    assert!(matches!(
        parse_address("Jane Doe, 123 Main St"),
        Err(AddressError::Parse { .. })
    ));

    // No recognizable state+zip tail.
    assert!(matches!(
        parse_address("Jane Doe, 123 Main St, Phoenix Arizona"),
        Err(AddressError::Parse { .. })
    ));
}

#[test]
fn test_parsed_address_flattens_to_expected_wire_form() {
    let address =
        parse_address("Jane Doe, Acme Inc, 123 Main St, Apt 4B, Phoenix AZ 85001").unwrap();
    let wire = flatten(&address.to_friendly(), Role::To);

    assert_eq!(wire["to_first_name"], "Jane");
    assert_eq!(wire["to_business_name"], "Acme Inc");
    assert_eq!(wire["to_address1"], "123 Main St");
    assert_eq!(wire["to_address2"], "Apt 4B");
    assert_eq!(wire["to_zip"], "85001");
}
