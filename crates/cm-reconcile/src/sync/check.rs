//! Outcome of comparing declarations with what the remote side holds

use serde::{Deserialize, Serialize};

use crate::drift::Difference;

/// Ordered from best to worst, so combining reports keeps the maximum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CheckStatus {
    #[default]
    Healthy,
    /// The content type does not exist remotely
    Missing,
    /// The content type or its editor interface differs from the declaration
    Drifted,
    /// The declaration is invalid or the remote state could not be read
    Broken,
}

/// Which of the two remote objects a drift item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fragment {
    ContentType,
    EditorInterface,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftItem {
    /// Id of the content type, or its name when it has no id yet
    pub content_type: String,
    pub fragment: Fragment,
    pub description: String,
}

impl DriftItem {
    pub fn new(
        content_type: impl Into<String>,
        fragment: Fragment,
        description: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            fragment,
            description: description.into(),
        }
    }

    pub(crate) fn from_difference(content_type: &str, difference: &Difference) -> Self {
        let fragment = if difference.is_editor_interface() {
            Fragment::EditorInterface
        } else {
            Fragment::ContentType
        };
        Self::new(content_type, fragment, difference.to_string())
    }
}

/// Result of [`Reconciler::check`](super::Reconciler::check).
///
/// Reports for several content types combine through [`Extend`] or
/// [`FromIterator`]; the combined status is the worst one seen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    pub drifted: Vec<DriftItem>,
    pub missing: Vec<DriftItem>,
    /// Why a content type could not be checked
    pub messages: Vec<String>,
}

impl CheckReport {
    pub fn in_sync() -> Self {
        Self::default()
    }

    pub fn not_found(content_type: &str) -> Self {
        Self {
            status: CheckStatus::Missing,
            missing: vec![DriftItem::new(
                content_type,
                Fragment::ContentType,
                "Content type not found",
            )],
            ..Self::default()
        }
    }

    /// Healthy when `differences` is empty, drifted otherwise.
    pub fn from_differences(content_type: &str, differences: &[Difference]) -> Self {
        if differences.is_empty() {
            return Self::in_sync();
        }

        Self {
            status: CheckStatus::Drifted,
            drifted: differences
                .iter()
                .map(|difference| DriftItem::from_difference(content_type, difference))
                .collect(),
            ..Self::default()
        }
    }

    pub fn broken(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Broken,
            messages: vec![message.into()],
            ..Self::default()
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }
}

impl Extend<CheckReport> for CheckReport {
    fn extend<I: IntoIterator<Item = CheckReport>>(&mut self, reports: I) {
        for report in reports {
            self.status = self.status.max(report.status);
            self.drifted.extend(report.drifted);
            self.missing.extend(report.missing);
            self.messages.extend(report.messages);
        }
    }
}

impl FromIterator<CheckReport> for CheckReport {
    fn from_iter<I: IntoIterator<Item = CheckReport>>(reports: I) -> Self {
        let mut combined = Self::in_sync();
        combined.extend(reports);
        combined
    }
}
