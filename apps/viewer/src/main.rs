use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    CatalogueClient, CatalogueStore, FilterValue, LoadState, ProjectColumn, ProjectTable,
    SortDirection,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{apply, category_filter, parse_command, Command, HELP};
use render::render;

#[derive(Parser, Debug)]
#[command(about = "Browse the PMEGP project catalogue")]
struct Args {
    #[arg(long, default_value = "http://localhost:5000")]
    server_url: String,
    /// Substring the title must contain (case-sensitive).
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    min_cost: Option<String>,
    #[arg(long)]
    max_cost: Option<String>,
    #[arg(long)]
    sort: Option<ProjectColumn>,
    #[arg(long, requires = "sort")]
    desc: bool,
    /// One-based page number.
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long, default_value_t = 20)]
    page_size: usize,
    /// Read table commands from stdin after the first render.
    #[arg(long, short)]
    interactive: bool,
}

impl Args {
    fn initial_commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(title) = &self.title {
            commands.push(Command::Filter {
                column: ProjectColumn::Title,
                value: FilterValue::contains(title.as_str()),
            });
        }
        if let Some(category) = &self.category {
            commands.push(Command::Filter {
                column: ProjectColumn::Category,
                value: category_filter(category),
            });
        }
        if self.min_cost.is_some() || self.max_cost.is_some() {
            commands.push(Command::Filter {
                column: ProjectColumn::Cost,
                value: FilterValue::range(
                    self.min_cost.clone().unwrap_or_default(),
                    self.max_cost.clone().unwrap_or_default(),
                ),
            });
        }
        if let Some(column) = self.sort {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            commands.push(Command::Sort {
                column,
                direction: Some(direction),
            });
        }
        commands.push(Command::PageSize(self.page_size));
        commands.push(Command::Page(self.page));
        commands
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let client = CatalogueClient::new(&args.server_url)?;
    let store = CatalogueStore::load(&client).await;

    let mut table = store.table();
    for command in args.initial_commands() {
        apply(&mut table, &command).context("invalid table options")?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, store.state(), &table)?;

    if args.interactive {
        run_interactive(&mut out, store.state(), &mut table)?;
    }

    Ok(if matches!(store.state(), LoadState::Failed(_)) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_interactive<T, W: Write>(
    out: &mut W,
    state: &LoadState<T>,
    table: &mut ProjectTable,
) -> Result<()> {
    writeln!(out, "type 'help' for commands")?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(command) => match apply(table, &command) {
                Ok(()) => render(out, state, table)?,
                Err(error) => {
                    warn!(%error, "table command rejected");
                    writeln!(out, "error: {error}")?;
                }
            },
            Err(error) => writeln!(out, "error: {error}")?,
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
