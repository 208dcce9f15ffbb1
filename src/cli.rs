//! Command line definitions for `sheet-inspect`.

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use clap_verbosity_flag::WarnLevel;
use sheet_inspect::config::ConvertOptions;
use sheet_inspect::config::DetailsOptions;
use sheet_inspect::LoadOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sheet-inspect",
    version,
    about = "Inspect spreadsheet sheets and export them as CSV",
    long_about = "Print overviews and focused statistics of workbook sheets, or export one \
                  sheet as CSV.\n\nReads .xlsx, .xlsm, .xltx, .xltm, .xlam, .ods and .csv files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Overview of every sheet: columns, shape, types, preview, unique counts and statistics.
    Analyze(AnalyzeArgs),

    /// Focused report on one sheet: value counts, group samples, date range and null counts.
    Details(DetailsArgs),

    /// Normalize one sheet and export it as CSV.
    Convert(ConvertArgs),
}

/// Options shared by every subcommand that loads a sheet.
#[derive(Args)]
pub struct LoadArgs {
    /// Cell text treated as a missing value (repeatable). Empty text always is.
    #[arg(long = "null", value_name = "LITERAL")]
    pub nulls: Vec<String>,

    /// Read spreadsheet error cells (#DIV/0!, #N/A, ...) as missing values instead of failing.
    #[arg(long = "error-as-null")]
    pub error_as_null: bool,

    /// Drop data rows in which every cell is missing.
    #[arg(long = "skip-empty-rows")]
    pub skip_empty_rows: bool,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Workbook to read.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Only this sheet (exact, case-sensitive name). Every sheet when omitted.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Args)]
pub struct DetailsArgs {
    /// Workbook to read.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Sheet to report on (exact, case-sensitive name).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: String,

    /// Column whose values are counted and whose groups are sampled.
    #[arg(long = "group-by", value_name = "COLUMN")]
    pub group_by: Option<String>,

    /// Key column shown in group samples and null counts (repeatable). All columns when omitted.
    #[arg(long = "columns", value_name = "COLUMN")]
    pub columns: Vec<String>,

    /// Rows shown per group.
    #[arg(long = "sample-size", value_name = "K", default_value_t = 10)]
    pub sample_size: usize,

    /// Numeric column to describe (repeatable).
    #[arg(long = "describe", value_name = "COLUMN")]
    pub describe: Vec<String>,

    /// Column whose sorted distinct values are listed (repeatable).
    #[arg(long = "unique", value_name = "COLUMN")]
    pub unique: Vec<String>,

    /// Temporal column for the date range. The first temporal column when omitted.
    #[arg(long = "date-column", value_name = "COLUMN")]
    pub date_column: Option<String>,

    /// Show only the N most frequent values.
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Workbook to read.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Sheet to export (exact, case-sensitive name).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: String,

    /// Destination CSV file. Its directory must exist.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<&LoadArgs> for LoadOptions {
    fn from(args: &LoadArgs) -> Self {
        let mut options = LoadOptions {
            error_as_null: args.error_as_null,
            skip_empty_rows: args.skip_empty_rows,
            ..LoadOptions::default()
        };
        options.nulls.extend(args.nulls.iter().cloned());
        options
    }
}

impl From<&DetailsArgs> for DetailsOptions {
    fn from(args: &DetailsArgs) -> Self {
        DetailsOptions {
            group_by: args.group_by.clone(),
            columns: args.columns.clone(),
            sample_size: args.sample_size,
            describe: args.describe.clone(),
            unique: args.unique.clone(),
            date_column: args.date_column.clone(),
            top: args.top,
        }
    }
}

impl From<&ConvertArgs> for ConvertOptions {
    fn from(args: &ConvertArgs) -> Self {
        ConvertOptions {
            sheet: args.sheet.clone(),
            output: args.output.clone(),
        }
    }
}
