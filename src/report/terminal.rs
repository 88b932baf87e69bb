use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Assignments, Category, QualityReport};

/// Visible width of the text inside the summary box.
const BOX_TEXT_WIDTH: usize = 49;

/// How many fallback labels to list outside verbose mode.
const FALLBACK_ROWS: usize = 15;

/// Render a colored terminal report.
pub fn render(
    quality: &QualityReport,
    assignments: &Assignments,
    fallback_labels: &[(&str, usize)],
    input: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if quiet {
        println!(
            "Records: {}  Labels: {}  Matched: {}  Other: {} ({})",
            quality.total_records,
            quality.distinct_labels,
            (quality.total_records - quality.fallback_records)
                .to_string()
                .green(),
            quality.fallback_records.to_string().yellow(),
            percent(quality.fallback_record_ratio),
        );
        return Ok(());
    }

    println!("\n {} v{}", "stormtype".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Input: {}\n", input.display());

    let rule = "─".repeat(BOX_TEXT_WIDTH + 3);
    println!(" ┌{rule}┐");
    println!(" │  {} │", format!("{:<BOX_TEXT_WIDTH$}", "SUMMARY").bold());
    println!(
        "{}",
        box_row(None, &format!("Records            : {}", quality.total_records))
    );
    println!(
        "{}",
        box_row(None, &format!("Distinct labels    : {}", quality.distinct_labels))
    );
    println!(
        "{}",
        box_row(
            Some("✓".green()),
            &format!(
                "Matched labels  : {:>6}",
                quality.distinct_labels - quality.fallback_labels
            )
        )
    );
    println!(
        "{}",
        box_row(
            Some("⚠".yellow()),
            &format!(
                "Other labels    : {:>6}  ({})",
                quality.fallback_labels,
                percent(quality.fallback_label_ratio)
            )
        )
    );
    println!(
        "{}",
        box_row(
            Some("⚠".yellow()),
            &format!(
                "Other records   : {:>6}  ({})",
                quality.fallback_records,
                percent(quality.fallback_record_ratio)
            )
        )
    );
    println!(" └{rule}┘\n");

    if !quality.categories.is_empty() {
        println!(" {} Records per category:\n", "[CATEGORIES]".cyan().bold());
        render_categories(quality);
        println!();
    }

    if !fallback_labels.is_empty() {
        let shown = if verbose {
            fallback_labels.len()
        } else {
            fallback_labels.len().min(FALLBACK_ROWS)
        };
        println!(
            " {} Labels mapped to {} ({} of {}):\n",
            "[OTHER]".yellow().bold(),
            Category::Fallback,
            shown,
            fallback_labels.len()
        );
        render_fallbacks(&fallback_labels[..shown], assignments);
        println!();
    }

    if verbose && !assignments.is_empty() {
        println!(" {} All assignments:\n", "[ALL]".green().bold());
        render_assignments(assignments);
        println!();
    }

    Ok(())
}

fn render_categories(quality: &QualityReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Labels").add_attribute(Attribute::Bold),
            Cell::new("Records").add_attribute(Attribute::Bold),
            Cell::new("Share").add_attribute(Attribute::Bold),
        ]);

    for count in &quality.categories {
        let share = if quality.total_records == 0 {
            0.0
        } else {
            count.records as f64 / quality.total_records as f64
        };
        table.add_row(vec![
            Cell::new(count.category.to_string()).fg(category_color(&count.category)),
            Cell::new(count.labels).set_alignment(CellAlignment::Right),
            Cell::new(count.records).set_alignment(CellAlignment::Right),
            Cell::new(percent(share)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

fn render_fallbacks(fallback_labels: &[(&str, usize)], assignments: &Assignments) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Label").add_attribute(Attribute::Bold),
            Cell::new("Scored as").add_attribute(Attribute::Bold),
            Cell::new("Records").add_attribute(Attribute::Bold),
            Cell::new("Best score").add_attribute(Attribute::Bold),
        ]);

    for (label, records) in fallback_labels {
        let (scored, confidence) = match assignments.get(*label) {
            Some(a) => (a.preprocessed.as_str(), format!("{:.3}", a.confidence)),
            None => (*label, "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(display_label(label)),
            Cell::new(display_label(scored)),
            Cell::new(records).set_alignment(CellAlignment::Right),
            Cell::new(confidence)
                .fg(Color::DarkGrey)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

fn render_assignments(assignments: &Assignments) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Label").add_attribute(Attribute::Bold),
            Cell::new("Scored as").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
        ]);

    for a in assignments.values() {
        table.add_row(vec![
            Cell::new(display_label(&a.label)),
            Cell::new(display_label(&a.preprocessed)),
            Cell::new(a.category.to_string()).fg(category_color(&a.category)),
            Cell::new(format!("{:.3}", a.confidence))
                .fg(confidence_color(a.confidence))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

fn category_color(category: &Category) -> Color {
    match category {
        Category::Matched(_) => Color::Green,
        Category::Fallback => Color::Yellow,
    }
}

fn confidence_color(confidence: f64) -> Color {
    if confidence >= 0.999 {
        Color::Green
    } else if confidence >= 0.6 {
        Color::Cyan
    } else {
        Color::Yellow
    }
}

/// Empty labels are otherwise invisible in a table cell.
fn display_label(label: &str) -> &str {
    if label.is_empty() {
        "(empty)"
    } else {
        label
    }
}

/// One summary box line. Text is padded before any color is applied so escape
/// codes never count toward the width.
fn box_row(marker: Option<ColoredString>, text: &str) -> String {
    match marker {
        Some(marker) => format!(" │  {}  {:<width$} │", marker, text, width = BOX_TEXT_WIDTH - 3),
        None => format!(" │  {:<BOX_TEXT_WIDTH$} │", text),
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(0.1234), "12.3%");
        assert_eq!(percent(1.0), "100.0%");
    }

    #[test]
    fn test_box_rows_align_with_colored_markers() {
        colored::control::set_override(true);
        let escapes = regex::Regex::new("\x1b\\[[0-9;]*m").unwrap();
        let border_width = format!(" ┌{}┐", "─".repeat(BOX_TEXT_WIDTH + 3))
            .chars()
            .count();

        let rows = [
            box_row(None, "Records            : 9"),
            box_row(Some("✓".green()), "Matched labels  :      5"),
            box_row(Some("⚠".yellow()), "Other records   :      2  (22.2%)"),
        ];
        assert!(rows[1].contains('\x1b'), "marker should carry color codes");
        for row in &rows {
            let visible = escapes.replace_all(row, "");
            assert_eq!(visible.chars().count(), border_width, "{visible}");
        }
        colored::control::unset_override();
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label(""), "(empty)");
        assert_eq!(display_label("HAIL"), "HAIL");
    }
}
