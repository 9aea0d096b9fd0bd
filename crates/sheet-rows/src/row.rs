//! Discussion rows

use serde::{Deserialize, Serialize};
use sheet_model::{ResponseMap, RowId};

/// A single discussion prompt within a daily sheet
///
/// Fields are read-only outside this crate; every change goes through
/// [`RowStore`](crate::RowStore), which enforces role rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    id: RowId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_visible")]
    is_visible: bool,
    #[serde(default)]
    order: i64,
    #[serde(default)]
    responses: ResponseMap,
}

fn default_visible() -> bool {
    true
}

impl Row {
    /// Create a visible row with no responses
    #[must_use]
    pub fn new(id: RowId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_visible: true,
            order: 0,
            responses: ResponseMap::new(),
        }
    }

    /// Set visibility (seeding)
    #[inline]
    #[must_use]
    pub fn with_visibility(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self
    }

    /// Set order key (seeding)
    #[inline]
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Attach existing responses (seeding)
    #[inline]
    #[must_use]
    pub fn with_responses(mut self, responses: ResponseMap) -> Self {
        self.responses = responses;
        self
    }

    /// Row id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether students can see the row
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Sort key
    #[inline]
    #[must_use]
    pub fn order(&self) -> i64 {
        self.order
    }

    /// Responses by participant name
    #[inline]
    #[must_use]
    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub(crate) fn set_content(&mut self, title: String, description: String) {
        self.title = title;
        self.description = description;
    }

    pub(crate) fn set_order(&mut self, order: i64) {
        self.order = order;
    }

    pub(crate) fn flip_visibility(&mut self) -> bool {
        self.is_visible = !self.is_visible;
        self.is_visible
    }

    pub(crate) fn responses_mut(&mut self) -> &mut ResponseMap {
        &mut self.responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let json = r#"{"id":"1","title":"Check-in","isVisible":false,"responses":{"Alice":"8"}}"#;
        let row: Row = serde_json::from_str(json).unwrap();

        assert_eq!(row.id().as_str(), "1");
        assert_eq!(row.description(), "");
        assert!(!row.is_visible());
        assert_eq!(row.order(), 0);
        assert_eq!(row.responses().get("Alice"), Some("8"));
    }

    #[test]
    fn missing_visibility_defaults_to_visible() {
        let row: Row = serde_json::from_str(r#"{"id":"2","title":"Topic"}"#).unwrap();
        assert!(row.is_visible());
        assert!(row.responses().is_empty());
    }
}
