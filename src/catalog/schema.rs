// ABOUTME: Typed parameter schemas for workflow functions - field kinds,
// ABOUTME: enums, defaults, JSON Schema rendering and best-effort coercion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// The JSON type a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl ParamKind {
    /// The JSON Schema `type` keyword for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Integer => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::Array => "array",
            ParamKind::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Number => value.is_number(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::Array => value.is_array(),
            ParamKind::Object => value.is_object(),
        }
    }

    /// Try to convert a loosely-typed value into this kind.
    /// Returns `None` when no lossless conversion exists.
    fn coerce(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (ParamKind::Number, Value::String(s)) => {
                s.trim().parse::<f64>().ok().and_then(|n| {
                    serde_json::Number::from_f64(n).map(Value::Number)
                })
            }
            (ParamKind::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),
            (ParamKind::Integer, Value::Number(n)) => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| Value::from(f as i64)),
            (ParamKind::Boolean, Value::String(s)) => match s.trim() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specification of a single named parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub kind: ParamKind,
    pub description: Option<String>,
    pub allowed: Option<Vec<Value>>,
    pub default: Option<Value>,
}

impl ParamSpec {
    /// Create a spec of the given kind with no extra constraints.
    pub fn new(kind: ParamKind) -> Self {
        Self {
            kind,
            description: None,
            allowed: None,
            default: None,
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new(ParamKind::String).describe(description)
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self::new(ParamKind::Number).describe(description)
    }

    pub fn integer(description: impl Into<String>) -> Self {
        Self::new(ParamKind::Integer).describe(description)
    }

    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new(ParamKind::Boolean).describe(description)
    }

    pub fn array(description: impl Into<String>) -> Self {
        Self::new(ParamKind::Array).describe(description)
    }

    pub fn object(description: impl Into<String>) -> Self {
        Self::new(ParamKind::Object).describe(description)
    }

    /// Set the description shown to the model.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the parameter to an enumerated set of values.
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the value filled in when the parameter is omitted.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn to_json_schema(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!(self.kind.as_str()));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        if let Some(allowed) = &self.allowed {
            out.insert("enum".into(), Value::Array(allowed.clone()));
        }
        if let Some(default) = &self.default {
            out.insert("default".into(), default.clone());
        }
        Value::Object(out)
    }
}

/// A violation found while checking arguments against a schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamViolation {
    #[error("arguments must be a JSON object")]
    NotAnObject,

    #[error("missing required parameter '{0}'")]
    MissingRequired(String),

    #[error("parameter '{field}' must be of type {expected}")]
    WrongKind { field: String, expected: ParamKind },

    #[error("parameter '{field}' has value {value} outside its allowed set")]
    NotInEnum { field: String, value: Value },
}

/// Arguments after coercion, along with any non-fatal violations.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    pub arguments: Map<String, Value>,
    pub violations: Vec<ParamViolation>,
}

impl Coerced {
    /// True when the arguments satisfied the schema without complaint.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Object-shaped parameter schema with ordered fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    fields: Vec<(String, ParamSpec)>,
    required: Vec<String>,
}

impl ParameterSchema {
    /// Create an empty schema (accepts any object).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an optional field.
    pub fn field(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        let name = name.into();
        self.fields.retain(|(existing, _)| *existing != name);
        self.fields.push((name, spec));
        self
    }

    /// Add a required field.
    pub fn required_field(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.field(name, spec)
    }

    /// Look up a field spec by name.
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, spec)| spec)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Names of the required fields.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Render as a JSON Schema object for function-calling APIs.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, spec)| (name.clone(), spec.to_json_schema()))
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }

    /// Check and coerce raw arguments.
    ///
    /// Only a non-object argument value is an error. Everything else is
    /// reported in [`Coerced::violations`] so callers can decide whether
    /// to proceed. `null` is treated as an empty object. Declared defaults
    /// are filled for absent fields and unknown fields pass through.
    pub fn validate(&self, arguments: &Value) -> Result<Coerced, ParamViolation> {
        let mut arguments = match arguments {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            _ => return Err(ParamViolation::NotAnObject),
        };
        let mut violations = Vec::new();

        for (name, spec) in &self.fields {
            let Some(value) = arguments.get_mut(name) else {
                if let Some(default) = &spec.default {
                    arguments.insert(name.clone(), default.clone());
                }
                continue;
            };
            if value.is_null() {
                continue;
            }

            if !spec.kind.matches(value) {
                match spec.kind.coerce(value) {
                    Some(coerced) => *value = coerced,
                    None => {
                        violations.push(ParamViolation::WrongKind {
                            field: name.clone(),
                            expected: spec.kind,
                        });
                        continue;
                    }
                }
            }

            if let Some(allowed) = &spec.allowed {
                if !allowed.contains(value) {
                    violations.push(ParamViolation::NotInEnum {
                        field: name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        // After defaults, so a required field with a default is satisfied.
        for name in &self.required {
            if arguments.get(name).is_none_or(Value::is_null) {
                violations.push(ParamViolation::MissingRequired(name.clone()));
            }
        }

        Ok(Coerced {
            arguments,
            violations,
        })
    }
}

impl Serialize for ParameterSchema {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_schema().serialize(serializer)
    }
}
