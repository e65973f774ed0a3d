// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Funcenv pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FuncenvError;

/// A resolved environment mapping: variable name to platform-safe value.
pub type EnvMap = BTreeMap<String, String>;

/// Per-function resolved environments, one entry per function known to the
/// host once resolution completes.
pub type FunctionEnvironmentMap = BTreeMap<String, EnvMap>;

/// Pseudo-parameter resolved to the active deployment region.
pub const PSEUDO_REGION: &str = "AWS::Region";
/// Pseudo-parameter resolved to the active account identifier.
pub const PSEUDO_ACCOUNT_ID: &str = "AWS::AccountId";
/// Pseudo-parameter resolved to the deployed stack name.
pub const PSEUDO_STACK_NAME: &str = "AWS::StackName";

/// Classification of a raw configuration value.
///
/// INI files carry no type information, so every value arrives as text and
/// is classified here. Numbers keep their original text so values like
/// `PORT=8080` round-trip without reformatting.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Free-form string value.
    Str(String),
    /// Numeric literal; `text` is the original spelling.
    Num { text: String, value: f64 },
    /// Boolean literal. Never reaches an environment map as-is; the coercer
    /// rewrites it to `"1"` / `"0"` with a warning.
    Bool(bool),
}

impl ScalarValue {
    /// Classify a raw INI value into a scalar kind.
    pub fn classify(raw: &str) -> ScalarValue {
        match raw {
            "true" => ScalarValue::Bool(true),
            "false" => ScalarValue::Bool(false),
            _ => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => ScalarValue::Num {
                    text: raw.to_string(),
                    value,
                },
                _ => ScalarValue::Str(raw.to_string()),
            },
        }
    }
}

/// A single deployed-resource record from the stack inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackResource {
    /// Template-time name of the resource.
    pub logical_id: String,
    /// Deployed-instance identifier.
    pub physical_id: String,
}

/// One page of the deployed resource inventory.
///
/// `next_token` carries the continuation token for the following page, or
/// `None` when the inventory is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ResourcePage {
    pub resources: Vec<StackResource>,
    pub next_token: Option<String>,
}

/// A provider-environment value that may reference deployed resources.
///
/// One level of `Fn::Join` is supported; join parts are literals or `Ref`
/// objects only.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicReference {
    /// A plain scalar, used verbatim.
    Literal(String),
    /// A reference to a pseudo-parameter or a deployed resource's logical id.
    Ref(String),
    /// Parts joined with a delimiter after each part resolves.
    Join {
        delimiter: String,
        parts: Vec<SymbolicReference>,
    },
}

impl SymbolicReference {
    /// Parse a provider-environment value into its reference grammar.
    ///
    /// A value matching none of the expected shapes is an explicit error
    /// rather than a silent no-op.
    pub fn parse(value: &serde_json::Value) -> Result<SymbolicReference, FuncenvError> {
        Self::parse_at(value, false)
    }

    fn parse_at(value: &serde_json::Value, inside_join: bool) -> Result<SymbolicReference, FuncenvError> {
        use serde_json::Value;

        match value {
            Value::String(s) => Ok(SymbolicReference::Literal(s.clone())),
            Value::Number(n) => Ok(SymbolicReference::Literal(n.to_string())),
            Value::Bool(b) => Ok(SymbolicReference::Literal(b.to_string())),
            Value::Object(map) if map.len() == 1 => {
                if let Some(target) = map.get("Ref") {
                    let name = target.as_str().ok_or_else(|| {
                        FuncenvError::Config("Ref target must be a string".to_string())
                    })?;
                    return Ok(SymbolicReference::Ref(name.to_string()));
                }
                if let Some(join) = map.get("Fn::Join") {
                    if inside_join {
                        return Err(FuncenvError::Config(
                            "nested Fn::Join is not supported".to_string(),
                        ));
                    }
                    let args = join.as_array().filter(|a| a.len() == 2).ok_or_else(|| {
                        FuncenvError::Config(
                            "Fn::Join expects [delimiter, [parts...]]".to_string(),
                        )
                    })?;
                    let delimiter = args[0]
                        .as_str()
                        .ok_or_else(|| {
                            FuncenvError::Config("Fn::Join delimiter must be a string".to_string())
                        })?
                        .to_string();
                    let raw_parts = args[1].as_array().ok_or_else(|| {
                        FuncenvError::Config("Fn::Join parts must be an array".to_string())
                    })?;
                    let parts = raw_parts
                        .iter()
                        .map(|p| Self::parse_at(p, true))
                        .collect::<Result<Vec<_>, _>>()?;
                    return Ok(SymbolicReference::Join { delimiter, parts });
                }
                Err(FuncenvError::Config(format!(
                    "unsupported reference shape: {value}"
                )))
            }
            _ => Err(FuncenvError::Config(format!(
                "unsupported reference shape: {value}"
            ))),
        }
    }
}
