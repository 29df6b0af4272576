//! Integration tests for the field type registry and built-in validation rules

use serde_json::{json, Value};
use settings_pages::{default_registry, Field, FieldSpec, FieldType, FieldTypeRegistry, StaticOptionSource};
use std::sync::Arc;

mod common;
use common::print_test_header;

const BUILTIN: [&str; 5] = ["boolean", "callback", "dropdown", "number", "text"];

fn valid_spec(field_type: &str) -> FieldSpec {
    FieldSpec::new(field_type, "field-id", "Field label").with_option("tns_general_options")
}

fn number_spec(min: i64, max: i64, step: i64) -> FieldSpec {
    valid_spec("number")
        .with_attr("min", json!(min))
        .with_attr("max", json!(max))
        .with_attr("step", json!(step))
}

/// Color picker storing `#rrggbb` strings
struct ColorType;

struct ColorField {
    id: String,
    value: String,
}

impl Field for ColorField {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> i64 {
        0
    }

    fn data(&self) -> Value {
        json!(self.value)
    }

    fn label(&self) -> String {
        "Color".to_string()
    }

    fn render_body(&self) -> String {
        format!("<input type=\"color\" value=\"{}\" />", self.value)
    }
}

impl FieldType for ColorType {
    fn create(&self, spec: &FieldSpec) -> Option<Box<dyn Field>> {
        Some(Box::new(ColorField {
            id: spec.id.clone(),
            value: spec.data.as_ref().and_then(Value::as_str).unwrap_or("#000000").to_string(),
        }))
    }

    fn validate(&self, input: &Value, _spec: &FieldSpec) -> Option<Value> {
        let s = input.as_str()?;
        let hex = s.strip_prefix('#')?;
        (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())).then(|| json!(s.to_lowercase()))
    }
}

#[test]
fn test_builtin_types_create_fields() {
    print_test_header(
        "test_builtin_types_create_fields",
        &["Every built-in type creates a field from a valid spec"],
    );

    let registry = default_registry();
    assert_eq!(registry.registered_types(), BUILTIN.to_vec());
    for type_name in BUILTIN {
        assert!(registry.is_registered(type_name));
        let field = registry.create(type_name, &valid_spec(type_name)).unwrap();
        assert_eq!(field.id(), "field-id");
    }
    assert!(registry.create("color", &valid_spec("color")).is_none());
    assert!(registry.create("text", &FieldSpec::default()).is_none());
}

#[test]
fn test_type_names_are_normalized() {
    print_test_header(
        "test_type_names_are_normalized",
        &["Lookups sanitize the type name the same way registration does"],
    );

    let registry = default_registry();
    assert!(registry.is_registered("TEXT"));
    assert!(registry.is_registered(" Number "));
    assert!(!registry.is_registered(""));
    assert!(!registry.is_registered("%%"));
    assert_eq!(registry.unset_value("Boolean"), Some(json!("off")));
}

#[test]
fn test_second_registration_is_rejected() {
    print_test_header(
        "test_second_registration_is_rejected",
        &["A type name can only be registered once; the first stays in place"],
    );

    let registry = FieldTypeRegistry::with_builtin_types(Arc::new(StaticOptionSource::default()));
    assert!(!registry.register("text", Arc::new(ColorType)));
    assert!(!registry.register("", Arc::new(ColorType)));

    // Text still sanitizes instead of running the color rule
    let spec = valid_spec("text");
    assert_eq!(registry.validate(&spec, &json!("plain")), Some(json!("plain")));

    assert!(registry.register("Color", Arc::new(ColorType)));
    assert!(!registry.register("color", Arc::new(ColorType)));
    let spec = valid_spec("color");
    assert_eq!(registry.validate(&spec, &json!("#A0B1C2")), Some(json!("#a0b1c2")));
    assert_eq!(registry.validate(&spec, &json!("red")), None);
    assert_eq!(registry.unset_value("color"), None);
    assert!(registry.create("color", &spec).is_some());
}

#[test]
fn test_boolean_validation() {
    print_test_header("test_boolean_validation", &["Only \"on\" is kept, everything else is \"off\""]);

    let registry = default_registry();
    let spec = valid_spec("boolean");
    assert_eq!(registry.validate(&spec, &json!("on")), Some(json!("on")));
    for input in [json!("off"), json!("ON"), json!(true), json!(1), json!(""), Value::Null] {
        assert_eq!(registry.validate(&spec, &input), Some(json!("off")));
    }
    assert_eq!(registry.unset_value("boolean"), Some(json!("off")));
}

#[test]
fn test_number_clamp_without_step() {
    print_test_header("test_number_clamp_without_step", &["min 0, max 10, step 0 clamps only"]);

    let registry = default_registry();
    let spec = number_spec(0, 10, 0);
    assert_eq!(registry.validate(&spec, &json!(-5)), Some(json!(0)));
    assert_eq!(registry.validate(&spec, &json!(15)), Some(json!(10)));
    assert_eq!(registry.validate(&spec, &json!(5)), Some(json!(5)));
    assert_eq!(registry.validate(&spec, &json!("5")), Some(json!(5)));
}

#[test]
fn test_number_step_rounding() {
    print_test_header(
        "test_number_step_rounding",
        &[
            "min 0, max 10, step 3 rounds down onto the step grid",
            "values already on the grid pass through unchanged",
        ],
    );

    let registry = default_registry();
    let spec = number_spec(0, 10, 3);
    assert_eq!(registry.validate(&spec, &json!(7)), Some(json!(6)));
    assert_eq!(registry.validate(&spec, &json!(9)), Some(json!(9)));
    assert_eq!(registry.validate(&spec, &json!(0)), Some(json!(0)));
    // 10 is clamped first, then 10 - (10 % 3)
    assert_eq!(registry.validate(&spec, &json!(10)), Some(json!(9)));

    // Grid anchored at the minimum
    let spec = number_spec(1, 20, 5);
    assert_eq!(registry.validate(&spec, &json!(9)), Some(json!(6)));
    assert_eq!(registry.validate(&spec, &json!(11)), Some(json!(11)));
}

#[test]
fn test_number_degenerate_range() {
    print_test_header("test_number_degenerate_range", &["max below min pins every value to min"]);

    let registry = default_registry();
    let spec = valid_spec("number")
        .with_attr("min", json!(5))
        .with_attr("max", json!(2));
    for input in [json!(-100), json!(2), json!(5), json!(9), json!("abc")] {
        assert_eq!(registry.validate(&spec, &input), Some(json!(5)));
    }
}

#[test]
fn test_callback_passes_value_through() {
    print_test_header("test_callback_passes_value_through", &["Callback values are not transformed"]);

    let registry = default_registry();
    let spec = valid_spec("callback");
    let value = json!({"layout": ["a", "b"]});
    assert_eq!(registry.validate(&spec, &value), Some(value));
    assert_eq!(registry.unset_value("callback"), None);
}

#[test]
fn test_dropdown_uses_live_source() {
    print_test_header(
        "test_dropdown_uses_live_source",
        &["Dropdown ids are checked against the source, not the data_list"],
    );

    let registry = FieldTypeRegistry::with_builtin_types(Arc::new(StaticOptionSource::new([json!(2), json!(7)])));
    let spec = valid_spec("dropdown").with_attr("data_list", json!({"9": "Archive"}));
    assert_eq!(registry.validate(&spec, &json!("7")), Some(json!(7)));
    assert_eq!(registry.validate(&spec, &json!("9")), None);

    // The shared default registry has no source and accepts nothing
    assert_eq!(default_registry().validate(&spec, &json!("7")), None);
}

#[test]
fn test_validate_requires_type() {
    print_test_header("test_validate_requires_type", &["Specs without a type never validate"]);

    let registry = default_registry();
    let spec = FieldSpec::new("", "field-id", "Label");
    assert_eq!(registry.validate(&spec, &json!("on")), None);
    assert_eq!(registry.unset_value("missing"), None);
}
