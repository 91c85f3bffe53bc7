use std::io::{self, Write};

use client_core::{
    categories, format::format_cost, table::PAGE_SIZE_OPTIONS, LoadState, ProjectColumn,
    ProjectTable, SortDirection,
};
use shared::domain::Project;

const TITLE_WIDTH: usize = 44;
const CATEGORY_WIDTH: usize = 20;
const COST_WIDTH: usize = 18;

pub fn render<T, W: Write>(
    out: &mut W,
    state: &LoadState<T>,
    table: &ProjectTable,
) -> io::Result<()> {
    writeln!(out, "PMEGP - Info")?;

    match state {
        LoadState::Loading => writeln!(out, "Loading projects...")?,
        LoadState::Failed(reason) => writeln!(out, "!! Failed to load projects: {reason}")?,
        LoadState::Loaded(_) => {
            let mut options = vec!["All"];
            options.extend(categories(table.records()));
            writeln!(out, "Categories: {}", options.join(", "))?;
        }
    }

    let view = table.view();
    writeln!(out)?;
    writeln!(
        out,
        "{} | {} | {} | {}",
        pad(&header(table, ProjectColumn::Title), TITLE_WIDTH),
        pad(&header(table, ProjectColumn::Category), CATEGORY_WIDTH),
        pad_left(&header(table, ProjectColumn::Cost), COST_WIDTH),
        header(table, ProjectColumn::PdfUrl),
    )?;
    writeln!(
        out,
        "{}",
        "-".repeat(TITLE_WIDTH + CATEGORY_WIDTH + COST_WIDTH + 15)
    )?;

    if view.rows.is_empty() {
        writeln!(out, "No results.")?;
    }
    for project in view.records() {
        writeln!(out, "{}", row(project))?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} of {} row(s) | Page {} of {} | Rows per page: {} ({})",
        view.rows.len(),
        view.filtered_count,
        view.page_index + 1,
        view.page_count,
        view.page_size,
        PAGE_SIZE_OPTIONS.map(|size| size.to_string()).join("/"),
    )?;
    Ok(())
}

fn header(table: &ProjectTable, column: ProjectColumn) -> String {
    let marker = match table.sort() {
        Some(sort) if sort.column == column => match sort.direction {
            SortDirection::Ascending => " ^",
            SortDirection::Descending => " v",
        },
        _ => "",
    };
    let filtered = if table.filter(column).is_some() { " *" } else { "" };
    format!("{}{marker}{filtered}", column.header())
}

fn row(project: &Project) -> String {
    let link = match project.pdf_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => "(no link)",
    };
    format!(
        "{} | {} | {} | {}",
        pad(&project.title, TITLE_WIDTH),
        pad(&project.category, CATEGORY_WIDTH),
        pad_left(&format_cost(project), COST_WIDTH),
        link,
    )
}

/// Pads or truncates `text` to exactly `width` characters.
fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    } else {
        format!("{text}{}", " ".repeat(width - count))
    }
}

fn pad_left(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        text.to_string()
    } else {
        format!("{}{text}", " ".repeat(width - count))
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
