//! Table commands typed at the interactive prompt or derived from CLI flags.

use client_core::{
    table::{FilterKind, Tabular},
    FilterValue, ProjectColumn, ProjectTable, SortDirection, TableError,
};
use shared::domain::Project;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  filter <title|pdf> <text>      substring filter (case-sensitive)
  filter category <name|all>     exact category match
  filter cost <min|-> <max|->    inclusive cost range
  clear [column]                 remove one filter, or all
  sort <column> [asc|desc]       sort; without a direction, toggle
  unsort                         remove the sort
  page <n> | next | prev         move between pages (1-based)
  size <10|20|30|40|50>          rows per page
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Filter {
        column: ProjectColumn,
        value: FilterValue,
    },
    Clear(Option<ProjectColumn>),
    Sort {
        column: ProjectColumn,
        direction: Option<SortDirection>,
    },
    Unsort,
    /// One-based page number.
    Page(usize),
    Next,
    Prev,
    PageSize(usize),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'; type 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Table(#[from] TableError),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();

    match name.to_ascii_lowercase().as_str() {
        "filter" | "f" => {
            let (column, rest) = args
                .split_first()
                .ok_or(CommandError::Usage("filter <column> <value>"))?;
            let column: ProjectColumn = column.parse()?;
            Ok(Command::Filter {
                column,
                value: filter_value(column, rest)?,
            })
        }
        "clear" => match args.as_slice() {
            [] => Ok(Command::Clear(None)),
            [column] => Ok(Command::Clear(Some(column.parse()?))),
            _ => Err(CommandError::Usage("clear [column]")),
        },
        "sort" | "s" => {
            let (column, direction) = match args.as_slice() {
                [column] => (column, None),
                [column, direction] => (column, Some(parse_direction(direction)?)),
                _ => return Err(CommandError::Usage("sort <column> [asc|desc]")),
            };
            Ok(Command::Sort {
                column: column.parse()?,
                direction,
            })
        }
        "unsort" => Ok(Command::Unsort),
        "page" | "p" => match args.as_slice() {
            [n] => n
                .parse()
                .map(Command::Page)
                .map_err(|_| CommandError::Usage("page <n>")),
            _ => Err(CommandError::Usage("page <n>")),
        },
        "next" | "n" => Ok(Command::Next),
        "prev" | "previous" => Ok(Command::Prev),
        "size" => match args.as_slice() {
            [n] => n
                .parse()
                .map(Command::PageSize)
                .map_err(|_| CommandError::Usage("size <10|20|30|40|50>")),
            _ => Err(CommandError::Usage("size <10|20|30|40|50>")),
        },
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn filter_value(column: ProjectColumn, rest: &[&str]) -> Result<FilterValue, CommandError> {
    match Project::filter_kind(column) {
        FilterKind::Text => Ok(FilterValue::contains(rest.join(" "))),
        FilterKind::Exact => Ok(category_filter(&rest.join(" "))),
        FilterKind::Range => match rest {
            [min, max] => Ok(FilterValue::range(bound(min), bound(max))),
            _ => Err(CommandError::Usage("filter cost <min|-> <max|->")),
        },
    }
}

/// Exact-match filter for a category selection; `all` selects every category.
pub fn category_filter(selected: &str) -> FilterValue {
    if selected.eq_ignore_ascii_case("all") {
        FilterValue::equals("")
    } else {
        FilterValue::equals(selected)
    }
}

fn bound(raw: &str) -> &str {
    if raw == "-" {
        ""
    } else {
        raw
    }
}

fn parse_direction(raw: &str) -> Result<SortDirection, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(SortDirection::Ascending),
        "desc" | "descending" => Ok(SortDirection::Descending),
        _ => Err(CommandError::Usage("sort <column> [asc|desc]")),
    }
}

/// Applies a table command. `Help` and `Quit` leave the table untouched.
pub fn apply(table: &mut ProjectTable, command: &Command) -> Result<(), CommandError> {
    match command {
        Command::Filter { column, value } => table.set_filter(*column, value.clone())?,
        Command::Clear(Some(column)) => table.clear_filter(*column),
        Command::Clear(None) => table.clear_filters(),
        Command::Sort {
            column,
            direction: Some(direction),
        } => table.set_sort(*column, *direction),
        Command::Sort {
            column,
            direction: None,
        } => {
            table.toggle_sort(*column);
        }
        Command::Unsort => table.clear_sort(),
        Command::Page(number) => {
            table.set_page(number.saturating_sub(1));
        }
        Command::Next => {
            table.next_page();
        }
        Command::Prev => {
            table.previous_page();
        }
        Command::PageSize(size) => table.set_page_size(*size)?,
        Command::Help | Command::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
