/// Standard output utilities for consistent command formatting
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::fmt::Display;

/// Display a section header
pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
}

/// Display an empty/none indicator
pub fn empty(message: &str) {
    println!("{} {}", "◌".dimmed(), message);
}

/// Display a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let prefix = if is_last { "└─" } else { "├─" };
    if let Some(val) = value {
        println!("{} {}: {}", prefix.dimmed(), label, val);
    } else {
        println!("{} {}", prefix.dimmed(), label);
    }
}

/// Prints every entry as a tree, or a placeholder when there are none
pub fn tree_list(items: &[String], placeholder: &str) {
    if items.is_empty() {
        empty(placeholder);
        return;
    }
    for (i, item) in items.iter().enumerate() {
        tree_item(i + 1 == items.len(), item, None);
    }
}

/// Two column metric table with a coloured title
pub struct MetricTable {
    table: Table,
}

impl MetricTable {
    pub fn new(title: &str) -> Self {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new(title)
                .add_attribute(Attribute::Bold)
                .fg(Color::Green),
            Cell::new(""),
        ]);

        Self { table }
    }

    pub fn add_metric(&mut self, name: &str, value: impl Display) {
        self.table.add_row(vec![
            Cell::new(format!("  {}", name)),
            Cell::new(value.to_string()).add_attribute(Attribute::Bold),
        ]);
    }

    pub fn render(&self) -> String {
        self.table.to_string()
    }
}
