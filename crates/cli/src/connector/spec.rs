// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative command metadata and argument binding.
//!
//! Every command, core or connector-provided, describes its parameters with a
//! [`CommandSpec`]. The same record drives signature display, completion and
//! conversion of the typed words into [`Args`].

use std::fmt;
use thiserror::Error;

/// Errors binding typed words to a command's parameters
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("missing argument '{param}' for {command}")]
    Missing { command: String, param: String },

    #[error("{command} takes at most {expected} argument(s), got {got}")]
    TooMany {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid value '{value}' for {param}: expected {kind}")]
    Invalid {
        param: String,
        kind: ParamKind,
        value: String,
    },

    #[error("argument '{0}' is not declared")]
    Undeclared(String),

    #[error("unbalanced quotes in: {0}")]
    Quoting(String),
}

/// Parameter type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Str,
    Int,
    Float,
    Bool,
}

impl ParamKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }

    /// Convert one typed word.
    pub fn parse(&self, param: &str, raw: &str) -> Result<Value, UsageError> {
        let invalid = || UsageError::Invalid {
            param: param.to_string(),
            kind: *self,
            value: raw.to_string(),
        };
        match self {
            Self::Str => Ok(Value::Str(raw.to_string())),
            Self::Int => raw.parse().map(Value::Int).map_err(|_| invalid()),
            Self::Float => raw.parse().map(Value::Float).map_err(|_| invalid()),
            Self::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(invalid()),
            },
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bound argument value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// One declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    /// Whether the command can be invoked without this argument
    pub required: bool,
    /// Value used when the argument is omitted
    pub default: Option<String>,
}

impl ParamSpec {
    /// `name: kind` plus `=default` when there is one.
    pub fn signature(&self) -> String {
        match &self.default {
            Some(default) => format!("{}: {}={}", self.name, self.kind, default),
            None => format!("{}: {}", self.name, self.kind),
        }
    }
}

/// Metadata for one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a required parameter.
    pub fn param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            required: true,
            default: None,
        });
        self
    }

    /// Add an optional parameter, with or without a default.
    pub fn optional(
        mut self,
        name: impl Into<String>,
        kind: ParamKind,
        default: Option<&str>,
    ) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            required: false,
            default: default.map(str::to_string),
        });
        self
    }

    /// Parameter list, e.g. `count: int, text: str`.
    pub fn signature(&self) -> String {
        self.params
            .iter()
            .map(ParamSpec::signature)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Invocation form, e.g. `burst <count: int> <text: str>`.
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        for param in &self.params {
            if param.required {
                usage.push_str(&format!(" <{}>", param.signature()));
            } else {
                usage.push_str(&format!(" [{}]", param.signature()));
            }
        }
        usage
    }

    /// Bind positional words to the declared parameters.
    pub fn bind(&self, words: &[String]) -> Result<Args, UsageError> {
        if words.len() > self.params.len() {
            return Err(UsageError::TooMany {
                command: self.name.clone(),
                expected: self.params.len(),
                got: words.len(),
            });
        }

        let mut values = Vec::with_capacity(self.params.len());
        for (i, param) in self.params.iter().enumerate() {
            let raw = match (words.get(i), &param.default) {
                (Some(word), _) => word.as_str(),
                (None, Some(default)) => default.as_str(),
                (None, None) if param.required => {
                    return Err(UsageError::Missing {
                        command: self.name.clone(),
                        param: param.name.clone(),
                    })
                }
                (None, None) => continue,
            };
            values.push((param.name.clone(), param.kind.parse(&param.name, raw)?));
        }
        Ok(Args { values })
    }
}

/// Arguments bound to a [`CommandSpec`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    values: Vec<(String, Value)>,
}

impl Args {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }

    pub fn str(&self, name: &str) -> Result<&str, UsageError> {
        self.opt_str(name)
            .ok_or_else(|| UsageError::Undeclared(name.to_string()))
    }

    /// An optional string argument that was omitted yields `None`.
    pub fn opt_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Result<i64, UsageError> {
        match self.get(name) {
            Some(Value::Int(n)) => Ok(*n),
            _ => Err(UsageError::Undeclared(name.to_string())),
        }
    }

    pub fn bool(&self, name: &str) -> Result<bool, UsageError> {
        match self.get(name) {
            Some(Value::Bool(b)) => Ok(*b),
            _ => Err(UsageError::Undeclared(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
