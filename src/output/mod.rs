//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use gradebook::error::Result;

pub mod json;
pub mod table;

/// Print records as a table of `R` rows or as JSON.
pub fn print_list<T, R>(items: Vec<T>, format: OutputFormat) -> Result<()>
where
    T: Serialize,
    R: Tabled + From<T>,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = items.into_iter().map(R::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&items)?);
        }
    }
    Ok(())
}

/// Print one record as a key/value table or as JSON.
pub fn print_record<T>(item: &T, format: OutputFormat) -> Result<()>
where
    T: Serialize,
{
    match format {
        OutputFormat::Table => {
            let value = serde_json::to_value(item)?;
            println!("{}", table::format_record(&value));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(item)?);
        }
    }
    Ok(())
}
