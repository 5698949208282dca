//! Table output formatting

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format a single JSON object as a two-column FIELD / VALUE table
pub fn format_record(value: &serde_json::Value) -> String {
    let Some(fields) = value.as_object() else {
        return value.to_string();
    };

    let mut builder = Builder::default();
    builder.push_record(["FIELD", "VALUE"]);
    for (key, val) in fields {
        let text = match val {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        builder.push_record([key.clone(), text]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
