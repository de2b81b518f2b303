//! # weekfold-cli
//!
//! Command-line interface for cleaning week-based planning workbooks.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use config::{Config, MAX_HEADER_ROW};
use output::{print_grid, print_table, OutputFormat};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use weekfold_core::DateOrder;
use weekfold_sheet::{
    output_file_name, process_workbook, write_xlsx, Workbook, DEFAULT_PREVIEW_ROWS,
};

/// weekfold - Convert date headers to YYYYWW and merge week columns
#[derive(Parser)]
#[command(name = "weekfold")]
#[command(author, version, about = "Convert date headers to YYYYWW and merge week columns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the sheets of a workbook
    Sheets {
        /// Workbook (.xlsx, .xlsm, .xls, .xlsb)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show the first rows of a sheet as stored, without a header
    Preview {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        rows: usize,

        /// Output format (json, csv, table)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,
    },

    /// Clean a sheet and write the result to <YYYYMMDD>.xlsx
    Process(ProcessArgs),
}

#[derive(Args)]
struct ProcessArgs {
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Sheet name (default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Zero-based row holding the column labels
    #[arg(short = 'H', long, value_parser = clap::value_parser!(u16).range(0..=MAX_HEADER_ROW as i64))]
    header_row: Option<u16>,

    /// Keep week columns in input order instead of sorting by code
    #[arg(long)]
    no_sort: bool,

    /// Read ambiguous dates like 03/04/2025 as month first
    #[arg(long)]
    month_first: bool,

    /// Output file or directory (default: current directory)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// YAML config file; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format for the result preview (json, csv, table)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Number of result rows to print
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    show: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Command::Sheets { file } => run_sheets(&file),
        Command::Preview {
            file,
            sheet,
            rows,
            format,
        } => run_preview(&file, sheet.as_deref(), rows, format),
        Command::Process(args) => run_process(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// List sheet names, one per line.
fn run_sheets(file: &Path) -> Result<()> {
    let workbook = open(file)?;
    for name in workbook.sheet_names() {
        println!("{name}");
    }
    Ok(())
}

/// Print the raw top of a sheet.
fn run_preview(file: &Path, sheet: Option<&str>, rows: usize, format: OutputFormat) -> Result<()> {
    let mut workbook = open(file)?;
    let grid = workbook.preview(sheet, rows)?;
    print_grid(&grid, format)
}

/// Run the pipeline over one sheet and save the result.
fn run_process(args: ProcessArgs) -> Result<()> {
    let config = build_config(&args)?;

    let (table, report) = process_workbook(&args.file, &config.read, &config.pipeline)
        .with_context(|| format!("Failed to process {}", args.file.display()))?;

    let today = chrono::Local::now().date_naive();
    let path = output_path(args.output.as_deref(), &output_file_name(today));
    write_xlsx(&table, &path)
        .with_context(|| format!("Failed to write result: {}", path.display()))?;

    println!("{}", "Done".green().bold());
    println!("{}", report.summary());
    if !report.serial_date_columns.is_empty() {
        println!(
            "Read as dates: {}",
            report.serial_date_columns.join(", ").yellow()
        );
    }
    print_table(&table, args.show, args.format)?;
    println!("Saved {}", path.display().to_string().cyan());
    Ok(())
}

fn open(file: &Path) -> Result<Workbook> {
    Workbook::open(file).with_context(|| format!("Failed to open {}", file.display()))
}

/// Merge the config file (if any) with command-line flags.
fn build_config(args: &ProcessArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(sheet) = &args.sheet {
        config.read.sheet = Some(sheet.clone());
    }
    if let Some(header_row) = args.header_row {
        config.read.header_row = usize::from(header_row);
    }
    if args.no_sort {
        config.pipeline.sort_week_cols = false;
    }
    if args.month_first {
        config.pipeline.date_order = DateOrder::MonthFirst;
    }

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Where to save the result: a file path as given, or `file_name` inside a directory.
fn output_path(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weekfold_core::CellValue;

    fn process_args(extra: &[&str]) -> ProcessArgs {
        let mut argv = vec!["weekfold", "process", "plan.xlsx"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Process(args) => args,
            _ => panic!("expected process"),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = process_args(&["-H", "3", "--no-sort", "--month-first", "-s", "Plan"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.read.header_row, 3);
        assert_eq!(config.read.sheet.as_deref(), Some("Plan"));
        assert!(!config.pipeline.sort_week_cols);
        assert_eq!(config.pipeline.date_order, DateOrder::MonthFirst);
    }

    #[test]
    fn test_header_row_limit() {
        let argv = ["weekfold", "process", "plan.xlsx", "--header-row", "51"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_process_writes_consolidated_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plan.xlsx");
        let output = dir.path().join("clean.xlsx");
        let table = weekfold_core::Table::from_rows(
            vec!["Part", "Status", "15/01/2025", "202503"],
            vec![
                vec![CellValue::from("P-1"), "Firm".into(), 5.into(), 3.into()],
                vec![CellValue::from("P-2"), "Dropped".into(), 1.into(), 1.into()],
            ],
        );
        write_xlsx(&table, &input).unwrap();

        let argv = [
            "weekfold".to_string(),
            "process".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        let Command::Process(args) = Cli::parse_from(argv).command else {
            panic!("expected process");
        };
        run_process(args).unwrap();

        let clean = Workbook::open(&output)
            .unwrap()
            .read_table(&weekfold_sheet::ReadOptions::default())
            .unwrap();
        assert_eq!(clean.labels(), vec!["Part", "Status", "202503"]);
        assert_eq!(clean.row_count(), 1);
        assert_eq!(clean.get(0, 2), Some(&CellValue::Number(8.0)));
    }

    #[test]
    fn test_process_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let argv = [
            "weekfold".to_string(),
            "process".to_string(),
            dir.path().join("missing.xlsx").display().to_string(),
        ];
        let Command::Process(args) = Cli::parse_from(argv).command else {
            panic!("expected process");
        };
        let err = run_process(args).unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to process"));
    }

    #[test]
    fn test_output_path() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            output_path(Some(dir.path()), "20250115.xlsx"),
            dir.path().join("20250115.xlsx")
        );
        assert_eq!(
            output_path(Some(Path::new("out/result.xlsx")), "20250115.xlsx"),
            PathBuf::from("out/result.xlsx")
        );
        assert_eq!(output_path(None, "20250115.xlsx"), PathBuf::from("20250115.xlsx"));
    }
}
