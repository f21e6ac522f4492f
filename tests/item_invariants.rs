//! Item Invariant Tests
//!
//! Tests for item validation and the item model:
//! - Type id mismatch is a single fatal error
//! - Items are never validated against an invalid type
//! - Dotted-path set/get round-trips, creating intermediate records
//! - Undefined values are reported by path
//! - Validation is deterministic

use gentype::catalog::{TypeCatalog, TypeSource};
use gentype::item::{Item, ItemError, ItemValue, Record, UnitValue};
use gentype::model::{Attribute, AttributeKind, GenericType, Structure, Unit};
use gentype::validation::{validate_item, ErrorCode, ErrorKind};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn reference_type() -> GenericType {
    serde_json::from_value(json!({
        "id": "t1",
        "name": "t",
        "group": "g",
        "pageSize": 10,
        "attributes": [
            { "id": 1, "name": "age", "kind": "LONG", "mandatory": true, "min": 0, "max": 120 }
        ]
    }))
    .unwrap()
}

fn order_type() -> GenericType {
    GenericType::new("order", "sales")
        .with_id("order")
        .with_attribute(Attribute::new(1, "number", AttributeKind::String).unique().with_pattern("[A-Z]{2}\\d+"))
        .with_attribute(Attribute::structure(
            2,
            "customer",
            Structure::new(vec![
                Attribute::new(21, "name", AttributeKind::String).mandatory(),
                Attribute::structure(
                    22,
                    "address",
                    Structure::new(vec![Attribute::new(221, "city", AttributeKind::String)]),
                ),
            ]),
        ))
        .with_attribute(Attribute::structure_list(
            3,
            "lines",
            Structure::new(vec![
                Attribute::new(31, "sku", AttributeKind::String).mandatory(),
                Attribute::new(32, "quantity", AttributeKind::Long).with_range(Some(1.0), None),
            ]),
        ))
        .with_attribute(
            Attribute::new(4, "weight", AttributeKind::Double)
                .with_range(Some(0.0), Some(1000.0))
                .with_units(vec![Unit::new("kg", 1.0), Unit::new("g", 0.001)]),
        )
        .with_attribute(Attribute::new(5, "shipped", AttributeKind::Date))
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// age 150 exceeds max: exactly one invalid value error at "age".
#[test]
fn test_reference_item_over_max() {
    let t = reference_type();
    let item: Item = serde_json::from_value(json!({ "typeId": "t1", "values": { "age": 150 } })).unwrap();

    let result = validate_item(Some(&t), Some(&item));
    assert_eq!(result.error_count(), 1);
    let error = &result.errors()[0];
    assert_eq!(error.kind(), ErrorKind::InvalidValue);
    assert_eq!(error.path, "age");
}

/// A pattern must match the whole value.
#[test]
fn test_pattern_scenario() {
    let t = GenericType::new("t", "g")
        .with_id("t1")
        .with_attribute(Attribute::new(1, "code", AttributeKind::String).with_pattern("\\d+"));
    let item = Item::new("t1").with("code", "12345abc");

    let result = validate_item(Some(&t), Some(&item));
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors()[0].kind(), ErrorKind::InvalidValue);
}

/// An empty mandatory list is one missing value.
#[test]
fn test_empty_mandatory_list_scenario() {
    let t = GenericType::new("t", "g")
        .with_id("t1")
        .with_attribute(Attribute::list(1, "tags", AttributeKind::String).mandatory());
    let item = Item::new("t1").with("tags", Vec::<ItemValue>::new());

    let result = validate_item(Some(&t), Some(&item));
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors()[0].kind(), ErrorKind::MissingRequiredField);
}

/// A unit the attribute does not declare is one structural error.
#[test]
fn test_undeclared_unit_scenario() {
    let t = GenericType::new("t", "g").with_id("t1").with_attribute(
        Attribute::new(1, "duration", AttributeKind::Double)
            .with_units(vec![Unit::new("s", 1.0), Unit::new("m", 60.0)]),
    );
    let item: Item = serde_json::from_value(json!({
        "typeId": "t1",
        "values": { "duration": { "unit": "h", "value": 1 } }
    }))
    .unwrap();

    let result = validate_item(Some(&t), Some(&item));
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors()[0].code, ErrorCode::UnitUnknown);
    assert_eq!(result.errors()[0].kind(), ErrorKind::StructuralMismatch);
}

/// A complete order validates cleanly.
#[test]
fn test_valid_order() {
    let item: Item = serde_json::from_value(json!({
        "typeId": "order",
        "values": {
            "number": "AB123",
            "customer": { "name": "Ada", "address": { "city": "London" } },
            "lines": [{ "sku": "x", "quantity": 2 }, { "sku": "y", "quantity": 1.0 }],
            "weight": { "unit": "g", "value": 1500 },
            "shipped": "2024-05-01"
        }
    }))
    .unwrap();

    let t = order_type();
    let result = validate_item(Some(&t), Some(&item));
    assert!(result.is_valid(), "{:?}", result.errors());
}

// =============================================================================
// Fatal Condition Tests
// =============================================================================

/// typeId mismatch is exactly one fatal cross reference error.
#[test]
fn test_type_id_mismatch_is_single_fatal_error() {
    let t = reference_type();
    let item = Item::new("t2").with("age", 150).with("undefined", true);

    let result = validate_item(Some(&t), Some(&item));
    assert_eq!(result.error_count(), 1);
    assert!(result.errors()[0].is_fatal());
    assert_eq!(result.errors()[0].kind(), ErrorKind::CrossReferenceMismatch);
}

/// An invalid type yields only the upstream error.
#[test]
fn test_invalid_type_is_upstream_error() {
    let t = reference_type().with_attribute(Attribute::new(1, "dup", AttributeKind::String));
    let item = Item::new("t1").with("age", "not a number");

    let result = validate_item(Some(&t), Some(&item));
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors()[0].kind(), ErrorKind::UpstreamInvalid);
}

/// Absent item after a present type.
#[test]
fn test_absent_item() {
    let t = reference_type();
    let result = validate_item(Some(&t), None);
    assert_eq!(result.errors()[0].code, ErrorCode::ItemRequired);
    assert_eq!(result.error_count(), 1);
}

// =============================================================================
// Value Tests
// =============================================================================

/// Defects across nested records, list elements and units are all reported.
#[test]
fn test_nested_defects() {
    let item: Item = serde_json::from_value(json!({
        "typeId": "order",
        "values": {
            "number": "ab1",
            "customer": { "address": { "city": 5, "zip": "N1" } },
            "lines": [{ "sku": "x", "quantity": 0 }, "oops"],
            "weight": 3,
            "note": "hi"
        }
    }))
    .unwrap();

    let t = order_type();
    let result = validate_item(Some(&t), Some(&item));
    let found: Vec<_> = result
        .errors()
        .iter()
        .map(|e| (e.path.as_str(), e.code))
        .collect();

    assert_eq!(
        found,
        vec![
            ("number", ErrorCode::PatternMismatch),
            ("customer.name", ErrorCode::ValueMissing),
            ("customer.address.city", ErrorCode::ValueTypeMismatch),
            ("lines", ErrorCode::ListElementTypeMismatch),
            ("lines[0].quantity", ErrorCode::ValueTooSmall),
            ("weight", ErrorCode::UnitValueRequired),
            ("customer.address.zip", ErrorCode::UndefinedAttribute),
            ("note", ErrorCode::UndefinedAttribute),
        ]
    );
}

/// A structure whose fields are named `unit` and `value` accepts its records.
#[test]
fn test_structure_with_unit_and_value_fields() {
    let t: GenericType = serde_json::from_value(json!({
        "id": "t1",
        "name": "t",
        "group": "g",
        "attributes": [{
            "id": 1,
            "name": "measure",
            "kind": "STRUCTURE",
            "nestedStructure": {
                "attributes": [
                    { "id": 2, "name": "unit", "kind": "STRING" },
                    { "id": 3, "name": "value", "kind": "LONG" }
                ]
            }
        }]
    }))
    .unwrap();
    let item: Item = serde_json::from_value(json!({
        "typeId": "t1",
        "values": { "measure": { "unit": "kg", "value": 3 } }
    }))
    .unwrap();

    let result = validate_item(Some(&t), Some(&item));
    assert!(result.is_valid(), "{:?}", result.errors());
}

/// Integers beyond 2^53 are range-checked without rounding.
#[test]
fn test_large_integer_above_max() {
    let max = 1_i64 << 53;
    let t = GenericType::new("t", "g").with_id("t1").with_attribute(
        Attribute::new(1, "n", AttributeKind::Long).with_range(None, Some(max as f64)),
    );
    let item = Item::new("t1").with("n", max + 1);

    let result = validate_item(Some(&t), Some(&item));
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors()[0].code, ErrorCode::ValueTooLarge);
}

/// Range checks on unit values compare in the base unit.
#[test]
fn test_unit_value_range() {
    let t = order_type();
    let item = Item::new("order")
        .with("number", "AB1")
        .with("weight", UnitValue::new("g", 2_000_000));

    let result = validate_item(Some(&t), Some(&item));
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors()[0].code, ErrorCode::ValueTooLarge);
}

/// Validating the same pair twice gives identical results.
#[test]
fn test_item_validation_is_idempotent() {
    let t = order_type();
    let item = Item::new("order").with("number", "bad").with("extra.deep", 1);
    assert_eq!(validate_item(Some(&t), Some(&item)), validate_item(Some(&t), Some(&item)));
}

// =============================================================================
// Item Model Tests
// =============================================================================

/// set then get returns the value, creating intermediate records.
#[test]
fn test_set_get_round_trip() {
    let values = [
        ItemValue::from(1),
        ItemValue::from("text"),
        ItemValue::from(vec![ItemValue::from(true)]),
        ItemValue::from(Record::new().with("x", 2.5)),
    ];
    for path in ["a", "a.b", "x.y.z.w"] {
        for value in &values {
            let mut item = Item::new("t");
            item.set(path, value.clone());
            assert_eq!(item.get(path), Some(value), "{}", path);
        }
    }
}

/// Setting through a scalar is a corrupt access.
#[test]
fn test_set_through_scalar_is_corrupt() {
    let mut item = Item::new("t").with("a", 1);
    let err = item.try_set("a.b", 2).unwrap_err();
    assert!(matches!(err, ItemError::CorruptValue { .. }));
    assert_eq!(item.get("a"), Some(&ItemValue::Integer(1)));
}

/// flatten yields leaf paths.
#[test]
fn test_flatten() {
    let item = Item::new("t")
        .with("a.b", 1)
        .with("a.c.d", "x")
        .with("list", vec![ItemValue::from(1)]);
    let flat = item.flatten();
    let paths: Vec<_> = flat.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["a.b", "a.c.d", "list"]);
}

/// Unique keys are taken from nested structures too.
#[test]
fn test_unique_key() {
    let t = order_type();
    let item = Item::new("order").with("number", "AB1");
    let key = t.structure.unique_key(Some(&item.values)).unwrap();
    assert_eq!(key.len(), 1);
    assert_eq!(key["number"], ItemValue::from("AB1"));
}

// =============================================================================
// Catalog Orchestration Tests
// =============================================================================

/// Fetch from the catalog, then validate.
#[test]
fn test_fetch_then_validate() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = TypeCatalog::new(tmp.path());
    catalog.put_type(order_type()).unwrap();
    catalog.save_type("order").unwrap();

    let mut reloaded = TypeCatalog::new(tmp.path());
    reloaded.load_all().unwrap();

    let item = Item::new("order").with("number", "ZZ9");
    let t = reloaded.fetch_type("order").unwrap();
    assert!(validate_item(Some(t), Some(&item)).is_valid());
}
