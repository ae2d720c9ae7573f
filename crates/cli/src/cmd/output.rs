//! Shared output formatting for command results.

use color_eyre::eyre::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use snmcli_core::config::OutputFormat;
use std::fmt::Display;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Longest cell shown in table output before truncation.
pub const MAX_CELL_WIDTH: usize = 60;

/// Renders results in the configured [`OutputFormat`].
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print typed rows.
    pub fn rows<T: Tabled + Serialize>(&self, rows: &[T]) -> Result<()> {
        match self.format {
            OutputFormat::Json => print_json(rows),
            OutputFormat::Table | OutputFormat::Markdown if rows.is_empty() => {
                println!("(no results)");
                Ok(())
            }
            OutputFormat::Table => {
                println!("{}", Table::new(rows).with(Style::rounded()));
                Ok(())
            }
            OutputFormat::Markdown => {
                self.print_table(markdown_rows(rows));
                Ok(())
            }
        }
    }

    /// Print untyped JSON objects, one row each. Columns are the union of keys.
    pub fn records(&self, records: &[Map<String, Value>]) -> Result<()> {
        if self.format == OutputFormat::Json {
            return print_json(records);
        }
        if records.is_empty() {
            println!("(no results)");
            return Ok(());
        }

        let mut columns: Vec<&str> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().copied());
        for record in records {
            builder.push_record(columns.iter().map(|c| self.cell(record.get(*c))));
        }
        self.print_table(builder.build());
        Ok(())
    }

    /// Print a single object as key/value pairs.
    pub fn object(&self, object: &Map<String, Value>) -> Result<()> {
        if self.format == OutputFormat::Json {
            return print_json(object);
        }
        let mut builder = Builder::default();
        builder.push_record(["Key", "Value"]);
        for (key, value) in object {
            builder.push_record([key.clone(), self.cell(Some(value))]);
        }
        self.print_table(builder.build());
        Ok(())
    }

    /// Print a scalar result: bare in table/markdown mode, a JSON string otherwise.
    pub fn scalar(&self, value: &str) -> Result<()> {
        if self.format == OutputFormat::Json {
            return print_json(value);
        }
        println!("{value}");
        Ok(())
    }

    fn print_table(&self, mut table: Table) {
        match self.format {
            OutputFormat::Markdown => table.with(Style::markdown()),
            _ => table.with(Style::rounded()),
        };
        println!("{table}");
    }

    fn cell(&self, value: Option<&Value>) -> String {
        let text = match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        match self.format {
            OutputFormat::Markdown => markdown_cell(&text),
            _ => truncate(&text.replace('\n', " "), MAX_CELL_WIDTH),
        }
    }
}

/// Typed rows as a table whose cells are safe inside Markdown pipes.
fn markdown_rows<T: Tabled>(rows: &[T]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(T::headers().iter().map(|h| markdown_cell(h)));
    for row in rows {
        builder.push_record(row.fields().iter().map(|f| markdown_cell(f)));
    }
    builder.build()
}

fn markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn success(message: impl Display) {
    println!("OK   {message}");
}

pub fn info(message: impl Display) {
    println!("{message}");
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
