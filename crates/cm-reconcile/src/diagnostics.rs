//! Error translation into ordered, severity-ranked diagnostics
//!
//! Translation is total: any [`Error`] becomes at least one diagnostic, and
//! the order produced is the order callers display.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::remote::{ErrorResponse, RemoteError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
}

impl Diagnostic {
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
        }
    }

    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
        }
    }
}

/// Diagnostics in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Translate an error.
    ///
    /// A structured remote rejection yields one warning per detail, in
    /// order, formatted as `"<detail> (<dotted path>)"`, followed by a
    /// single error carrying the top-level message. Every other error yields
    /// a single error with its message. `None` yields nothing.
    pub fn translate(error: Option<&Error>) -> Self {
        match error {
            None => Self::default(),
            Some(Error::Remote(RemoteError::Validation(response))) => Self::from_response(response),
            Some(other) => Self(vec![Diagnostic::error(other.to_string())]),
        }
    }

    /// Diagnostics for the failure of `result`, empty on success.
    pub fn from_result<T>(result: &crate::Result<T>) -> Self {
        Self::translate(result.as_ref().err())
    }

    fn from_response(response: &ErrorResponse) -> Self {
        let mut diagnostics: Vec<Diagnostic> = response
            .details
            .iter()
            .flat_map(|details| &details.errors)
            .map(|detail| {
                Diagnostic::warning(format!("{} ({})", detail.details, detail.dotted_path()))
            })
            .collect();

        diagnostics.push(Diagnostic::error(response.message.clone()));
        Self(diagnostics)
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
