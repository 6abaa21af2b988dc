//! Canned preview data
//!
//! Demo table rows and a small chart series keyed by category, used by
//! clients that want to render something before real data exists.
//! Presentation sugar only; never validated against the spec schema.

use crate::classify::Category;
use serde::Serialize;
use serde_json::{json, Value};

/// One labelled value in the demo chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Bucket label
    pub label: String,
    /// Bucket value
    pub value: u32,
}

/// Preview payload attached to a response on request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Demo rows for the category's primary table
    pub table_rows: Vec<Value>,
    /// Demo chart series
    pub chart: Vec<ChartPoint>,
}

/// Build the canned preview for a category
#[must_use]
pub fn preview(category: Category) -> Preview {
    Preview {
        table_rows: demo_rows(category),
        chart: demo_chart(),
    }
}

fn demo_rows(category: Category) -> Vec<Value> {
    match category {
        Category::Sales => vec![
            json!({ "name": "Acme Ltd", "status": "Active", "total": "$12,300" }),
            json!({ "name": "Globex", "status": "Active", "total": "$5,100" }),
            json!({ "name": "Initech", "status": "On Hold", "total": "$800" }),
        ],
        Category::Tasks => vec![
            json!({ "name": "Draft proposal", "status": "Open" }),
            json!({ "name": "Email client", "status": "Done" }),
            json!({ "name": "Schedule meeting", "status": "Open" }),
        ],
        Category::Generic => vec![
            json!({ "name": "Sample A", "status": "Draft" }),
            json!({ "name": "Sample B", "status": "Active" }),
            json!({ "name": "Sample C", "status": "Done" }),
        ],
    }
}

fn demo_chart() -> Vec<ChartPoint> {
    [("Draft", 3), ("Paid", 6), ("Overdue", 2)]
        .into_iter()
        .map(|(label, value)| ChartPoint {
            label: label.to_string(),
            value,
        })
        .collect()
}
