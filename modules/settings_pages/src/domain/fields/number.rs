use super::{escape_attr, escape_html, BaseField};
use crate::contract::{Field, FieldSpec, FieldType};
use crate::domain::validation::{as_number, number_value};
use serde_json::Value;

const LIMIT: f64 = i64::MAX as f64;

/// Min / max / step rules of a number field
///
/// - `min` defaults to 0 and must lie within ±i64::MAX
/// - `max` defaults to i64::MAX; a `max` below `min` is raised to `min`
/// - `step` only applies when positive
/// - the default is the numeric `default`, else `min`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberConstraints {
    pub minimum: f64,
    pub maximum: f64,
    pub step: f64,
    pub default: f64,
}

impl NumberConstraints {
    pub fn from_spec(spec: &FieldSpec) -> Self {
        let minimum = spec
            .attr("min")
            .and_then(as_number)
            .filter(|min| (-LIMIT..=LIMIT).contains(min))
            .unwrap_or(0.0);

        let maximum = match spec.attr("max").and_then(as_number) {
            Some(max) if max < minimum => minimum,
            Some(max) if max <= LIMIT => max,
            _ => LIMIT,
        };

        let step = spec
            .attr("step")
            .and_then(as_number)
            .filter(|step| *step > 0.0)
            .unwrap_or(0.0);

        let default = spec.default.as_ref().and_then(as_number).unwrap_or(minimum);

        Self {
            minimum,
            maximum,
            step,
            default,
        }
    }

    /// Clamp into [min, max]; non-numeric input becomes the minimum
    pub fn constrain(&self, input: &Value) -> f64 {
        match as_number(input) {
            Some(n) if n < self.minimum => self.minimum,
            Some(n) if n > self.maximum => self.maximum,
            Some(n) => n,
            None => self.minimum,
        }
    }

    /// Clamp, then round down onto the step grid anchored at the minimum
    ///
    /// Values already on the grid are returned unchanged.
    pub fn validate_constraints(&self, input: &Value) -> f64 {
        let value = self.constrain(input);
        if self.step <= 0.0 {
            return value;
        }

        // Tolerate float error so values on the grid stay put
        let steps = ((value - self.minimum) / self.step + GRID_EPSILON).floor();
        let precision = decimal_places(self.step).max(decimal_places(self.minimum));
        let rounded = round_to(self.minimum + steps * self.step, precision);
        if (rounded - value).abs() <= self.step * GRID_EPSILON {
            return value;
        }
        if rounded < value && rounded >= self.minimum {
            return rounded;
        }
        value
    }
}

const GRID_EPSILON: f64 = 1e-9;
const MAX_DECIMALS: i32 = 12;

/// Number of decimals needed to write `n` exactly, capped at 12
fn decimal_places(n: f64) -> i32 {
    let mut places = 0;
    let mut scaled = n.abs();
    while places < MAX_DECIMALS && (scaled - scaled.round()).abs() > GRID_EPSILON * scaled.max(1.0) {
        scaled *= 10.0;
        places += 1;
    }
    places
}

fn round_to(n: f64, places: i32) -> f64 {
    if places == 0 {
        return n.round();
    }
    let factor = 10f64.powi(places);
    (n * factor).round() / factor
}

/// Number input clamped to its constraints
#[derive(Debug, Clone)]
pub struct NumberField {
    base: BaseField,
    constraints: NumberConstraints,
}

impl NumberField {
    pub fn from_spec(spec: &FieldSpec) -> Option<Self> {
        BaseField::from_spec(spec).map(|base| Self {
            base,
            constraints: NumberConstraints::from_spec(spec),
        })
    }

    pub fn constraints(&self) -> &NumberConstraints {
        &self.constraints
    }
}

impl Field for NumberField {
    fn id(&self) -> &str {
        &self.base.id
    }

    fn order(&self) -> i64 {
        self.base.order
    }

    fn data(&self) -> Value {
        let stored = self
            .base
            .data
            .clone()
            .unwrap_or_else(|| number_value(self.constraints.default));
        number_value(self.constraints.constrain(&stored))
    }

    fn label(&self) -> String {
        escape_html(&self.base.label)
    }

    fn render_body(&self) -> String {
        let c = &self.constraints;
        let min = number_value(c.minimum).to_string();
        let max = number_value(c.maximum).to_string();
        let (step_attribute, step_text) = if c.step > 0.0 {
            let step = number_value(c.step).to_string();
            (
                format!(" step=\"{}\"", escape_attr(&step)),
                format!(", increments of {}", escape_html(&step)),
            )
        } else {
            (String::new(), String::new())
        };

        format!(
            "<span class=\"control\"><input type=\"number\" min=\"{min_attr}\" max=\"{max_attr}\" \
             name=\"{name}\" value=\"{value}\"{step_attribute}></input></span>\
             <span class=\"description\">Minimum of {min_text}, maximum of {max_text}{step_text}</span>",
            min_attr = escape_attr(&min),
            max_attr = escape_attr(&max),
            name = self.base.input_name(),
            value = escape_attr(&self.data().to_string()),
            step_attribute = step_attribute,
            min_text = escape_html(&min),
            max_text = escape_html(&max),
            step_text = step_text,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberType;

impl FieldType for NumberType {
    fn create(&self, spec: &FieldSpec) -> Option<Box<dyn Field>> {
        NumberField::from_spec(spec).map(|f| Box::new(f) as Box<dyn Field>)
    }

    fn validate(&self, input: &Value, spec: &FieldSpec) -> Option<Value> {
        let constraints = NumberConstraints::from_spec(spec);
        Some(number_value(constraints.validate_constraints(input)))
    }
}
