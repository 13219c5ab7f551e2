//! Raw input validation for user-supplied problem data.
//!
//! The surrounding UI passes free-form strings (a JSON number array, a target
//! number, raw text). The generator assumes well-formed input, so callers
//! validate here first. Two styles are offered: strict parsers that fail with
//! [`InputError`], and defaulting parsers that substitute a known-good default
//! while reporting the substitution through [`InputSource::DefaultFallback`]
//! instead of swallowing it.

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("input is not a JSON array of numbers: {0}")]
    NumberList(String),

    #[error("target is not a number: {0}")]
    Target(String),

    #[error("text input is empty")]
    EmptyText,
}

/// Where a parsed value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// The caller-supplied raw string parsed cleanly
    Custom,
    /// The raw string was malformed and the default was used instead
    DefaultFallback,
}

/// A validated value plus the visible record of how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub source: InputSource,
}

impl<T> Parsed<T> {
    pub fn used_default(&self) -> bool {
        self.source == InputSource::DefaultFallback
    }
}

pub fn parse_number_list_strict(raw: &str) -> Result<Vec<i64>, InputError> {
    serde_json::from_str::<Vec<i64>>(raw.trim())
        .map_err(|_| InputError::NumberList(raw.to_string()))
}

pub fn parse_target_strict(raw: &str) -> Result<i64, InputError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InputError::Target(raw.to_string()))
}

pub fn parse_text_strict(raw: &str) -> Result<String, InputError> {
    if raw.is_empty() {
        return Err(InputError::EmptyText);
    }
    Ok(raw.to_string())
}

pub fn parse_number_list(raw: &str, default: &[i64]) -> Parsed<Vec<i64>> {
    match parse_number_list_strict(raw) {
        Ok(values) => Parsed {
            value: values,
            source: InputSource::Custom,
        },
        Err(err) => {
            warn!(%err, "falling back to default number list");
            Parsed {
                value: default.to_vec(),
                source: InputSource::DefaultFallback,
            }
        }
    }
}

pub fn parse_target(raw: &str, default: i64) -> Parsed<i64> {
    match parse_target_strict(raw) {
        Ok(target) => Parsed {
            value: target,
            source: InputSource::Custom,
        },
        Err(err) => {
            warn!(%err, "falling back to default target");
            Parsed {
                value: default,
                source: InputSource::DefaultFallback,
            }
        }
    }
}

pub fn parse_text(raw: &str, default: &str) -> Parsed<String> {
    match parse_text_strict(raw) {
        Ok(value) => Parsed {
            value,
            source: InputSource::Custom,
        },
        Err(err) => {
            warn!(%err, "falling back to default text");
            Parsed {
                value: default.to_string(),
                source: InputSource::DefaultFallback,
            }
        }
    }
}
