use clap::{Parser, Subcommand};
use royalbit_ratio_forge::cli;
use royalbit_ratio_forge::config::JobConfig;
use royalbit_ratio_forge::error::RatioResult;
use royalbit_ratio_forge::types::Service;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ratio-forge")]
#[command(about = "Multi-ratio staffing workbooks from an exam-candidate roster.")]
#[command(long_about = "Ratio Forge - Multi-ratio staffing workbooks

Reads a roster of per-slot candidate counts and writes one worksheet per
candidate-to-invigilator ratio, plus a Summary sheet that aggregates them.
All derived values are Excel formulas, calculated when the file is opened.

COMMANDS:
  generate  - Build the ratio workbook (.xlsx)
  inspect   - Show detected candidate columns without writing anything

EXAMPLES:
  ratio-forge generate roster.xlsx --range 51-61
  ratio-forge generate roster.xlsx -r 40-60 -s FPS -o april_ratios
  ratio-forge generate roster.xlsx --config job.yaml
  ratio-forge inspect roster.xlsx --sheet Sheet1")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Build the ratio workbook.

Ratios are sampled every 5 from START, and END is always included:
  51-61 → Ratio_51, Ratio_56, Ratio_61
  10-37 → Ratio_10, Ratio_15, ..., Ratio_35, Ratio_37

INPUT REQUIREMENTS:
  - Candidate columns: header contains a month (Jan..Dec) and not 'Total'
  - A 'Total Candidate' column

JOB FILE (--config):
  range: 51-61
  service: IRIS
  output: cbse_multiple_ratio
  sheet: Sheet1

  Command-line flags override values from the job file.")]
    /// Build the ratio workbook
    Generate {
        /// Roster workbook (.xlsx)
        input: PathBuf,

        /// Ratio range, e.g. 51-61
        #[arg(short, long)]
        range: Option<String>,

        /// Service column label (IRIS or FPS)
        #[arg(short, long)]
        service: Option<Service>,

        /// Output file name (.xlsx is appended when missing)
        #[arg(short, long)]
        output: Option<String>,

        /// Worksheet holding the roster (default: Sheet1)
        #[arg(long)]
        sheet: Option<String>,

        /// YAML job file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show verbose generation steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show detected columns for a roster
    Inspect {
        /// Roster workbook (.xlsx)
        input: PathBuf,

        /// Worksheet holding the roster (default: Sheet1)
        #[arg(long)]
        sheet: Option<String>,
    },
}

fn main() -> RatioResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            range,
            service,
            output,
            sheet,
            config,
            verbose,
        } => {
            let flags = JobConfig {
                range,
                service,
                output,
                sheet,
            };
            cli::generate(input, flags, config, verbose).map(|_| ())
        }

        Commands::Inspect { input, sheet } => cli::inspect(input, sheet).map(|_| ()),
    }
}
