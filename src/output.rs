//! Console and JSON output for the directory tool.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::items::Item;

/// Stdout printer; labels are colored when enabled, payload text never is.
pub struct Printer {
    out: StandardStream,
}

impl Printer {
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            out: StandardStream::stdout(choice),
        }
    }

    /// One absolute path per line.
    pub fn paths(&mut self, items: &[Item]) -> io::Result<()> {
        for item in items {
            writeln!(self.out, "{}", item.path.display())?;
        }
        Ok(())
    }

    /// `path<TAB>size` per line.
    pub fn sized(&mut self, items: &[Item]) -> io::Result<()> {
        for item in items {
            writeln!(
                self.out,
                "{}\t{}",
                item.path.display(),
                item.size.unwrap_or(0)
            )?;
        }
        Ok(())
    }

    /// `label: value`, with the label emphasized when color is on.
    pub fn summary(&mut self, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(self.out, "{}:", label)?;
        self.out.reset()?;
        writeln!(self.out, " {}", value)
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }
}

/// Pretty-printed JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

/// Serializable view of a collected item; absent fields are omitted.
#[derive(Serialize)]
struct JsonItem {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
}

/// Items as a JSON array (path, optional size, RFC3339 modified time).
pub fn items_json(items: &[Item]) -> serde_json::Value {
    let rows: Vec<JsonItem> = items
        .iter()
        .map(|item| JsonItem {
            path: item.path.display().to_string(),
            size: item.size,
            modified: item
                .modified
                .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339()),
        })
        .collect();
    serde_json::to_value(rows).unwrap_or_default()
}
