//! Shared presentation: success marks, tables, empty-cell placeholder.

use comfy_table::{presets, ContentArrangement, Table};
use owo_colors::OwoColorize;

pub use crate::views::NONE_MARK;

/// `✓ <message>` with a green mark.
pub fn success(message: impl AsRef<str>) -> String {
    format!("{} {}", "✓".green(), message.as_ref())
}

pub fn table_with_header(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

pub fn or_none(value: &str) -> &str {
    if value.is_empty() {
        NONE_MARK
    } else {
        value
    }
}
