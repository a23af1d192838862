//! Annotation log.
//!
//! Metadata captured from `@entropy` and `@tag` markers on `let` bindings.
//! The log is owned by whoever runs the compilation and handed to the parser
//! by mutable reference, so separate compilations never share records unless
//! the caller passes the same log on purpose.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::slice;

/// Metadata attached to a single binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub symbol: SmolStr,
    pub entropy: Option<f64>,
    pub tag: Option<SmolStr>,
}

/// Append-only, ordered sequence of annotations.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationLog {
    records: Vec<Annotation>,
}

impl AnnotationLog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the annotations of a binding.
    ///
    /// Nothing is recorded when neither value is present.
    pub fn record(
        &mut self,
        symbol: impl Into<SmolStr>,
        entropy: Option<f64>,
        tag: Option<SmolStr>,
    ) -> bool {
        if entropy.is_none() && tag.is_none() {
            return false;
        }

        self.records.push(Annotation {
            symbol: symbol.into(),
            entropy,
            tag,
        });
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Annotation> {
        self.records.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Annotation] {
        &self.records
    }

    /// Drop all records so the log can be reused for another compilation.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a AnnotationLog {
    type Item = &'a Annotation;
    type IntoIter = slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
