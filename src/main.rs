use clap::Parser;
use std::path::PathBuf;
use xlsx2json::cli::{self, ConvertOptions};
use xlsx2json::error::ConvertResult;

#[derive(Parser)]
#[command(name = "xlsx2json")]
#[command(about = "Convert every sheet of a workbook into its own JSON file")]
#[command(long_about = "xlsx2json - one JSON file per worksheet

Reads a workbook and writes each sheet as a pretty-printed JSON array of
row objects. The first row of a sheet supplies the keys.

OUTPUT NAMES:
  designated sheet (default '设备')  → designated output (default devices.json)
  any other sheet S                  → pattern with {sheet} = S (default S.json)

CONFIG FILE (all keys optional, flags win):
  input_path: config.xlsx
  designated_sheet_name: 设备
  designated_output_name: devices.json
  output_pattern: \"{sheet}.json\"
  output_dir: .

EXAMPLES:
  xlsx2json                          # config.xlsx → devices.json + <sheet>.json
  xlsx2json points.xlsx -o out/      # different input, output directory
  xlsx2json -c xlsx2json.yaml -n     # show the output plan only

Set RUST_LOG=xlsx2json=debug for per-sheet diagnostics.")]
#[command(version)]
struct Cli {
    /// Path to the workbook (default: config.xlsx)
    input: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the JSON files (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Name of the sheet written to the designated output file
    #[arg(long)]
    designated_sheet: Option<String>,

    /// File name for the designated sheet
    #[arg(long)]
    designated_output: Option<String>,

    /// File name pattern for the other sheets, must contain {sheet}
    #[arg(long)]
    pattern: Option<String>,

    /// Show the output plan without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show per-sheet details
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "xlsx2json=info"
    } else {
        "xlsx2json=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ConvertResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    cli::convert(ConvertOptions {
        input: cli.input,
        config_file: cli.config,
        output_dir: cli.output_dir,
        designated_sheet: cli.designated_sheet,
        designated_output: cli.designated_output,
        pattern: cli.pattern,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    })
}
