//! App spec data model
//!
//! The structured output of the generator: named data models, each with
//! typed fields, and named pages, each with typed display widgets that
//! reference a data model. Wire names are camelCase to match the HTTP
//! contract.

use serde::{Deserialize, Serialize};

/// A generated application specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSpec {
    /// Human-readable application name
    pub app_name: String,
    /// Entity definitions
    pub data_models: Vec<DataModel>,
    /// Page definitions
    pub pages: Vec<Page>,
}

impl AppSpec {
    /// Serialize to a JSON value
    ///
    /// These types contain only string keys, so serialization cannot
    /// fail.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Find a data model by name
    #[inline]
    #[must_use]
    pub fn find_model(&self, name: &str) -> Option<&DataModel> {
        self.data_models.iter().find(|m| m.name == name)
    }

    /// Find a page by name
    #[inline]
    #[must_use]
    pub fn find_page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.name == name)
    }
}

/// An entity with typed fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    /// Entity name (e.g. "invoices")
    pub name: String,
    /// Field definitions
    pub fields: Vec<Field>,
}

/// A single typed field of a data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type tag: "text", "number", "date", "select", ...
    ///
    /// Kept as an open string so model-generated specs can introduce
    /// types the bundled templates never use.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the field is mandatory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Allowed values for "select" fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Field {
    /// Shorthand for an optional field of the given type
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            required: None,
            options: None,
        }
    }

    /// Mark the field as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Constrain the field to a fixed option set
    #[must_use]
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|s| (*s).to_string()).collect());
        self
    }
}

/// A page with display widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page name (e.g. "Dashboard")
    pub name: String,
    /// Widgets shown on the page
    pub widgets: Vec<Widget>,
}

/// A display widget referencing a data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Widget {
    /// Single aggregated figure
    Kpi {
        /// Widget caption
        title: String,
        /// Source data model
        source: String,
        /// Aggregation: "count", "sum", ...
        agg: String,
    },
    /// Chart over a data model
    Chart {
        /// Chart kind: "bar", "line", ...
        chart: String,
        /// Widget caption
        title: String,
        /// Source data model
        source: String,
    },
    /// Tabular listing
    Table {
        /// Source data model
        source: String,
        /// Column field names
        columns: Vec<String>,
    },
    /// Record entry form
    Form {
        /// Widget caption
        title: String,
        /// Form mode: "create", "edit"
        mode: String,
        /// Source data model
        source: String,
    },
}

impl Widget {
    /// The data model this widget draws from
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Widget::Kpi { source, .. }
            | Widget::Chart { source, .. }
            | Widget::Table { source, .. }
            | Widget::Form { source, .. } => source,
        }
    }

    /// Whether this is a count-aggregation KPI
    #[inline]
    #[must_use]
    pub fn is_count_kpi(&self) -> bool {
        matches!(self, Widget::Kpi { agg, .. } if agg == "count")
    }
}
