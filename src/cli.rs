//! explorar CLI - Exploratory Data Analysis
//!
//! Command-line interface for explorar operations.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

use crate::{
    categories::top_categories,
    correlation::correlation_matrix,
    missing::missing_table,
    quality::QualityEvaluator,
    summary::{flatten_summary_for_print, summarize_dataset},
    Table,
};

/// explorar - Exploratory Data Analysis in Pure Rust
#[derive(Parser)]
#[command(name = "explorar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display table information
    Info {
        /// Path to dataset file
        path: PathBuf,
    },
    /// Summarize every column of a table
    Summary {
        /// Path to dataset file
        path: PathBuf,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Report missing values per column
    Missing {
        /// Path to dataset file
        path: PathBuf,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Correlation matrix over numeric columns
    Corr {
        /// Path to dataset file
        path: PathBuf,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Most frequent values of categorical columns
    Cats {
        /// Path to dataset file
        path: PathBuf,
        /// Maximum number of categorical columns to analyze
        #[arg(long, default_value = "10")]
        max_columns: usize,
        /// Rows per frequency table
        #[arg(long, default_value = "5")]
        top_k: usize,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Derive quality score and diagnostic flags
    Quality {
        /// Path to dataset file
        path: PathBuf,
        /// Missing-share threshold for the mostly-missing flag (0.0 to 1.0)
        #[arg(long, default_value = "0.5")]
        missing_threshold: f64,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

/// Run the CLI and translate errors into an exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { path } => cmd_info(&path),
        Commands::Summary { path, format } => cmd_summary(&path, &format),
        Commands::Missing { path, format } => cmd_missing(&path, &format),
        Commands::Corr { path, format } => cmd_corr(&path, &format),
        Commands::Cats {
            path,
            max_columns,
            top_k,
            format,
        } => cmd_cats(&path, max_columns, top_k, &format),
        Commands::Quality {
            path,
            missing_threshold,
            format,
        } => cmd_quality(&path, missing_threshold, &format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_table(path: &PathBuf) -> crate::Result<Table> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "parquet" => Table::from_parquet(path),
        "csv" => Table::from_csv(path),
        "json" | "jsonl" => Table::from_json(path),
        ext => Err(crate::Error::unsupported_format(ext)),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn cmd_info(path: &PathBuf) -> crate::Result<()> {
    let table = load_table(path)?;

    println!("File: {}", path.display());
    println!("Rows: {}", table.num_rows());
    println!("Columns: {}", table.num_columns());
    for field in table.schema().fields() {
        println!("  {} ({})", field.name(), field.data_type());
    }

    Ok(())
}

fn cmd_summary(path: &PathBuf, format: &str) -> crate::Result<()> {
    let table = load_table(path)?;
    let summary = summarize_dataset(&table);

    if format == "json" {
        print_json(&summary)?;
    } else {
        println!("Dataset Summary");
        println!("===============");
        println!("Rows: {}", summary.n_rows);
        println!("Columns: {}", summary.n_cols);
        println!();
        print!("{}", flatten_summary_for_print(&summary));
    }

    Ok(())
}

fn cmd_missing(path: &PathBuf, format: &str) -> crate::Result<()> {
    let table = load_table(path)?;
    let report = missing_table(&table);

    if format == "json" {
        print_json(&report)?;
    } else {
        print!("{report}");
    }

    Ok(())
}

fn cmd_corr(path: &PathBuf, format: &str) -> crate::Result<()> {
    let table = load_table(path)?;
    let matrix = correlation_matrix(&table);

    if format == "json" {
        print_json(&matrix)?;
    } else {
        print!("{matrix}");
    }

    Ok(())
}

fn cmd_cats(path: &PathBuf, max_columns: usize, top_k: usize, format: &str) -> crate::Result<()> {
    let table = load_table(path)?;
    let result = top_categories(&table, max_columns, top_k);

    if format == "json" {
        print_json(&result)?;
    } else if result.is_empty() {
        println!("(no categorical columns)");
    } else {
        print!("{result}");
    }

    Ok(())
}

fn cmd_quality(path: &PathBuf, missing_threshold: f64, format: &str) -> crate::Result<()> {
    let table = load_table(path)?;
    let summary = summarize_dataset(&table);
    let missing = missing_table(&table);

    let flags = QualityEvaluator::new()
        .mostly_missing_threshold(missing_threshold)
        .evaluate(&summary, &missing)?;

    if format == "json" {
        print_json(&flags)?;
    } else {
        println!("Data Quality Report");
        println!("===================");
        println!("File: {}", path.display());
        println!("Rows: {}", summary.n_rows);
        println!("Columns: {}", summary.n_cols);
        println!();
        print!("{flags}");
    }

    Ok(())
}
