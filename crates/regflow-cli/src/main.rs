use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use regflow_core::{ColumnMap, GraphResult, RegulationRow, build_graph, change_totals, regulation};
use tracing::Level;

mod display;
mod render;

/// Trace how a regulation was amended or revoked by later regulations.
#[derive(Debug, Parser)]
#[command(name = "regflow", version)]
struct Cli {
    /// Regulation table (.csv or .parquet).
    #[arg(
        long,
        env = "REGFLOW_DATA",
        global = true,
        default_value = "jdih_data_cleaning.csv"
    )]
    data: PathBuf,

    /// JSON file overriding the table's column names.
    #[arg(long, env = "REGFLOW_COLUMNS", global = true)]
    columns: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List regulation forms.
    Forms,
    /// List regulation numbers.
    Numbers {
        /// Only numbers of this form.
        #[arg(long)]
        form: Option<String>,
    },
    /// List the table's rows with form, number and content.
    Rows {
        /// Only rows of this form.
        #[arg(long)]
        form: Option<String>,
    },
    /// List the table's column names.
    Columns,
    /// Print every row recorded for a regulation number, then its totals.
    Show { number: String },
    /// Build and print the change graph of a regulation number.
    Graph {
        number: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Dot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::info!("regflow v{}", env!("CARGO_PKG_VERSION"));

    let columns = load_columns(cli.columns.as_deref())?;
    let batches = regflow_store::load_table(&cli.data)
        .with_context(|| format!("loading regulation table {}", cli.data.display()))?;

    // Listing columns must work on tables the column map does not fit.
    let rows = if matches!(cli.command, Command::Columns) {
        Vec::new()
    } else {
        RegulationRow::from_batches(&batches, &columns)
            .with_context(|| format!("reading regulation rows from {}", cli.data.display()))?
    };

    match cli.command {
        Command::Columns => {
            for name in regflow_store::column_names(&batches) {
                println!("{name}");
            }
        }
        Command::Forms => {
            for form in regulation::forms(&rows) {
                println!("{form}");
            }
        }
        Command::Numbers { form } => {
            for number in regulation::numbers(&rows, form.as_deref()) {
                println!("{number}");
            }
        }
        Command::Rows { form } => {
            let listing = display::row_listing(
                form.as_deref(),
                regulation::rows_by_form(&rows, form.as_deref()),
            );
            print!("{listing}");
        }
        Command::Show { number } => {
            let mut found = false;
            for row in regulation::find(&rows, &number) {
                found = true;
                print!("{}", display::regulation_card(row));
            }
            if found {
                print!("{}", render::totals(&change_totals(&rows, &number)));
            } else {
                println!("{}", render::not_found(&number));
            }
        }
        Command::Graph { number, format } => {
            let result = build_graph(&rows, &number);
            let totals = change_totals(&rows, &number);
            let output = match (format, &result) {
                (Format::Json, _) => render::json(&result, &totals).context("serialising graph")?,
                (_, GraphResult::NotFound) => render::not_found(&number),
                (Format::Text, GraphResult::Empty) => {
                    format!("{}{}", render::totals(&totals), render::NO_CHANGES)
                }
                (Format::Dot, GraphResult::Empty) => render::NO_CHANGES.to_string(),
                (Format::Text, GraphResult::Graph(graph)) => {
                    format!("{}\n{}", render::totals(&totals), render::text(graph))
                }
                (Format::Dot, GraphResult::Graph(graph)) => render::dot(graph),
            };
            println!("{}", output.trim_end());
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_columns(path: Option<&Path>) -> anyhow::Result<ColumnMap> {
    let Some(path) = path else {
        return Ok(ColumnMap::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading column config {}", path.display()))?;
    ColumnMap::from_json(&json).with_context(|| format!("parsing column config {}", path.display()))
}
