use std::{borrow::Cow, collections::HashSet, str::FromStr};

use shared::domain::{Cost, Project};

use crate::table::{FilterKind, SortKind, TableController, TableError, Tabular};

pub type ProjectTable = TableController<Project>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectColumn {
    Title,
    Category,
    Cost,
    PdfUrl,
}

impl ProjectColumn {
    pub const ALL: [ProjectColumn; 4] = [
        ProjectColumn::Title,
        ProjectColumn::Category,
        ProjectColumn::Cost,
        ProjectColumn::PdfUrl,
    ];

    pub fn header(self) -> &'static str {
        match self {
            ProjectColumn::Title => "Title",
            ProjectColumn::Category => "Category",
            ProjectColumn::Cost => "Cost (₹)",
            ProjectColumn::PdfUrl => "PDF",
        }
    }
}

impl FromStr for ProjectColumn {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(ProjectColumn::Title),
            "category" => Ok(ProjectColumn::Category),
            "cost" => Ok(ProjectColumn::Cost),
            "pdf" | "pdfurl" | "pdf_url" => Ok(ProjectColumn::PdfUrl),
            _ => Err(TableError::UnknownColumn(s.to_string())),
        }
    }
}

impl Tabular for Project {
    type Column = ProjectColumn;

    fn filter_kind(column: ProjectColumn) -> FilterKind {
        match column {
            ProjectColumn::Title | ProjectColumn::PdfUrl => FilterKind::Text,
            ProjectColumn::Category => FilterKind::Exact,
            ProjectColumn::Cost => FilterKind::Range,
        }
    }

    fn sort_kind(column: ProjectColumn) -> Option<SortKind> {
        match column {
            ProjectColumn::Title | ProjectColumn::Category => Some(SortKind::Text),
            ProjectColumn::Cost => Some(SortKind::Numeric),
            ProjectColumn::PdfUrl => None,
        }
    }

    fn text(&self, column: ProjectColumn) -> Cow<'_, str> {
        match column {
            ProjectColumn::Title => Cow::Borrowed(&self.title),
            ProjectColumn::Category => Cow::Borrowed(&self.category),
            ProjectColumn::PdfUrl => Cow::Borrowed(self.pdf_url.as_deref().unwrap_or_default()),
            ProjectColumn::Cost => match &self.cost {
                Some(Cost::Number(number)) => Cow::Owned(number.to_string()),
                Some(Cost::Text(text)) => Cow::Borrowed(text),
                Some(Cost::Other(value)) if value.is_null() => Cow::Borrowed(""),
                Some(Cost::Other(value)) => Cow::Owned(value.to_string()),
                None => Cow::Borrowed(""),
            },
        }
    }

    fn number(&self, column: ProjectColumn) -> Option<f64> {
        match column {
            ProjectColumn::Cost => self.cost_amount(),
            _ => None,
        }
    }
}

/// Distinct non-empty categories in the order they first appear.
pub fn categories(projects: &[Project]) -> Vec<&str> {
    let mut seen = HashSet::new();
    projects
        .iter()
        .map(|project| project.category.as_str())
        .filter(|category| !category.is_empty() && seen.insert(*category))
        .collect()
}

#[cfg(test)]
#[path = "tests/projects_tests.rs"]
mod tests;
