//! Trace generation: instruments two competing strategies of an algorithm
//! family into inspectable step sequences.
//!
//! Generation is pure and deterministic. Identical arguments always produce
//! identical step sequences; there is no randomness, no I/O, and the whole
//! trace is built synchronously before it is returned. Every snapshot stored
//! on a step is copied at emission time.

pub mod pair_sum;
pub mod substring;

use thiserror::Error;

use crate::types::{ProblemFamily, ProblemInput, ProblemInstance, TracePair};

#[derive(Error, Debug, PartialEq)]
pub enum GenerateError {
    /// The catalog named a family this build does not implement.
    #[error("unsupported algorithm family: {slug}")]
    UnsupportedFamily { slug: String },

    /// The input shape does not belong to the requested family.
    #[error("input does not match family {}", .family.as_str())]
    InputMismatch { family: ProblemFamily },

    /// The input is too small to produce a single step.
    #[error("input for family {} is too small: {}", .family.as_str(), .reason)]
    InputTooSmall {
        family: ProblemFamily,
        reason: &'static str,
    },
}

/// Generate the brute and optimal traces for one problem instance.
pub fn generate(family: ProblemFamily, input: &ProblemInput) -> Result<TracePair, GenerateError> {
    match (family, input) {
        (ProblemFamily::PairSum, ProblemInput::Numbers { values, target }) => {
            if values.len() < 2 {
                return Err(GenerateError::InputTooSmall {
                    family,
                    reason: "pair-sum needs at least two numbers",
                });
            }
            Ok(pair_sum::generate(values, *target))
        }
        (ProblemFamily::DistinctSubstring, ProblemInput::Text { value }) => {
            if value.is_empty() {
                return Err(GenerateError::InputTooSmall {
                    family,
                    reason: "substring search needs a non-empty text",
                });
            }
            Ok(substring::generate(value))
        }
        _ => Err(GenerateError::InputMismatch { family }),
    }
}

/// Generate from a catalog slug, surfacing unknown families as errors rather
/// than silently producing an empty trace.
pub fn generate_for_slug(slug: &str, input: &ProblemInput) -> Result<TracePair, GenerateError> {
    let family = ProblemFamily::parse(slug).ok_or_else(|| GenerateError::UnsupportedFamily {
        slug: slug.to_string(),
    })?;
    generate(family, input)
}

/// Convenience wrapper over [`generate`] for a full [`ProblemInstance`].
pub fn generate_instance(instance: &ProblemInstance) -> Result<TracePair, GenerateError> {
    generate(instance.family, &instance.input)
}
