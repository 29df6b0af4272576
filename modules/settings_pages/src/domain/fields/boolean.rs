use super::{escape_html, BaseField};
use crate::contract::{Field, FieldSpec, FieldType};
use serde_json::Value;

const ON: &str = "on";
const OFF: &str = "off";

/// Checkbox stored as the strings "on" / "off"
///
/// Accepts `true`/`"on"` and `false`/`"off"` as data; anything else falls
/// back to the default, which is `false` unless set to `true`/`"on"`.
#[derive(Debug, Clone)]
pub struct BooleanField {
    base: BaseField,
    description: String,
    checked: Option<bool>,
    default_checked: bool,
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == ON => Some(true),
        Value::String(s) if s == OFF => Some(false),
        _ => None,
    }
}

impl BooleanField {
    pub fn from_spec(spec: &FieldSpec) -> Option<Self> {
        let base = BaseField::from_spec(spec)?;
        Some(Self {
            checked: spec.data.as_ref().and_then(parse_flag),
            default_checked: spec.default.as_ref().and_then(parse_flag) == Some(true),
            description: spec.description.clone(),
            base,
        })
    }

    pub fn is_checked(&self) -> bool {
        self.checked.unwrap_or(self.default_checked)
    }
}

impl Field for BooleanField {
    fn id(&self) -> &str {
        &self.base.id
    }

    fn order(&self) -> i64 {
        self.base.order
    }

    fn data(&self) -> Value {
        Value::Bool(self.is_checked())
    }

    fn label(&self) -> String {
        escape_html(&self.base.label)
    }

    fn render_body(&self) -> String {
        let checked = if self.is_checked() { " checked=\"checked\"" } else { "" };
        format!(
            "<span class=\"control\"><input type=\"checkbox\" name=\"{}\"{}></input></span>\
             <span class=\"description\">{}</span>",
            self.base.input_name(),
            checked,
            escape_html(&self.description),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl FieldType for BooleanType {
    fn create(&self, spec: &FieldSpec) -> Option<Box<dyn Field>> {
        BooleanField::from_spec(spec).map(|f| Box::new(f) as Box<dyn Field>)
    }

    /// Unchecked boxes are not posted, so absence means "off"
    fn unset_value(&self) -> Option<Value> {
        Some(Value::String(OFF.to_string()))
    }

    fn validate(&self, input: &Value, _spec: &FieldSpec) -> Option<Value> {
        let flag = if input.as_str() == Some(ON) { ON } else { OFF };
        Some(Value::String(flag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> FieldSpec {
        FieldSpec::new("boolean", "show-tagline", "Show tagline")
            .with_option("general")
            .with_description("Display the tagline")
    }

    #[test]
    fn test_validate_only_accepts_on() {
        let spec = spec();
        assert_eq!(BooleanType.validate(&json!("on"), &spec), Some(json!("on")));
        assert_eq!(BooleanType.validate(&json!("off"), &spec), Some(json!("off")));
        assert_eq!(BooleanType.validate(&json!("yes"), &spec), Some(json!("off")));
        assert_eq!(BooleanType.validate(&json!(true), &spec), Some(json!("off")));
        assert_eq!(BooleanType.validate(&json!(1), &spec), Some(json!("off")));
    }

    #[test]
    fn test_unset_value_is_off() {
        assert_eq!(BooleanType.unset_value(), Some(json!("off")));
    }

    #[test]
    fn test_data_resolution() {
        let field = BooleanField::from_spec(&spec()).unwrap();
        assert_eq!(field.data(), json!(false));

        let field = BooleanField::from_spec(&spec().with_default(json!("on"))).unwrap();
        assert_eq!(field.data(), json!(true));

        let field = BooleanField::from_spec(
            &spec().with_default(json!("on")).with_data(Some(json!("off"))),
        )
        .unwrap();
        assert_eq!(field.data(), json!(false));

        let field = BooleanField::from_spec(&spec().with_data(Some(json!(true)))).unwrap();
        assert_eq!(field.data(), json!(true));

        // Unrecognized data falls back to the default
        let field = BooleanField::from_spec(
            &spec().with_default(json!(true)).with_data(Some(json!("maybe"))),
        )
        .unwrap();
        assert_eq!(field.data(), json!(true));
    }

    #[test]
    fn test_render_body() {
        let field = BooleanField::from_spec(&spec().with_data(Some(json!("on")))).unwrap();
        assert_eq!(
            field.render_body(),
            "<span class=\"control\"><input type=\"checkbox\" name=\"general[show-tagline]\" \
             checked=\"checked\"></input></span><span class=\"description\">Display the tagline</span>"
        );

        let field = BooleanField::from_spec(&spec()).unwrap();
        assert!(!field.render_body().contains("checked"));
    }
}
