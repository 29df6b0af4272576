//! Key sanitizing and value coercion shared by fields, store and pipeline

use serde_json::Value;

/// Normalize a name to lowercase alphanumerics, '-' and '_'
///
/// Used for type names, storage names, section keys and page slugs.
pub fn sanitize_key(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Whether a value counts as "empty": null, false, 0, "", "0" or an empty collection
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// String form of a scalar submitted value
///
/// `true` becomes "1", `false`, null and collections become "".
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Sanitize markup down to the tags allowed in post content
pub fn sanitize_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Parse a numeric value, accepting numeric strings
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Emit a number as a JSON integer when it is integral
///
/// Integral values beyond the i64 range saturate to `i64::MIN` / `i64::MAX`.
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Loose id comparison: "7" matches 7, "7.0" matches 7
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(_) | Value::String(_), Value::Number(_) | Value::String(_)) => {
            match (as_number(a), as_number(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_key_strips_and_lowercases() {
        assert_eq!(sanitize_key("Text"), "text");
        assert_eq!(sanitize_key("my_Type-2"), "my_type-2");
        assert_eq!(sanitize_key("tns general options"), "tnsgeneraloptions");
        assert_eq!(sanitize_key("a.b@c!"), "abc");
        assert_eq!(sanitize_key("***"), "");
    }

    #[test]
    fn test_is_empty_value() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!("0")));
        assert!(is_empty_value(&json!(0)));
        assert!(is_empty_value(&json!(false)));
        assert!(is_empty_value(&json!([])));
        assert!(!is_empty_value(&json!("off")));
        assert!(!is_empty_value(&json!(1)));
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("abc")), "abc");
        assert_eq!(value_to_string(&json!(12)), "12");
        assert_eq!(value_to_string(&json!(true)), "1");
        assert_eq!(value_to_string(&json!(null)), "");
    }

    #[test]
    fn test_sanitize_html_keeps_safe_markup() {
        assert_eq!(sanitize_html("<strong>Hi</strong>"), "<strong>Hi</strong>");
        assert_eq!(sanitize_html("a<script>alert(1)</script>b"), "ab");
        assert_eq!(sanitize_html("plain"), "plain");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(&json!(7)), Some(7.0));
        assert_eq!(as_number(&json!("7")), Some(7.0));
        assert_eq!(as_number(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(as_number(&json!("seven")), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn test_number_value_prefers_integers() {
        assert_eq!(number_value(6.0), json!(6));
        assert_eq!(number_value(2.5), json!(2.5));
        assert_eq!(number_value(1.0e16), json!(10_000_000_000_000_000_i64));
        assert_eq!(number_value(i64::MAX as f64), json!(i64::MAX));
        assert_eq!(number_value(i64::MIN as f64), json!(i64::MIN));
    }

    #[test]
    fn test_loose_eq() {
        assert!(loose_eq(&json!(7), &json!("7")));
        assert!(loose_eq(&json!("7.0"), &json!(7)));
        assert!(loose_eq(&json!("about"), &json!("about")));
        assert!(!loose_eq(&json!("8"), &json!(7)));
        assert!(!loose_eq(&json!(null), &json!(0)));
    }
}
