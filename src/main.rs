use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;

use tablemine::logging::{init_logging, PerformanceTimer};
use tablemine::{MineConfig, MineOptions, TableMiner};

#[derive(Parser)]
#[command(name = "tablemine")]
#[command(about = "Mine tables from layout-preserving extracted text")]
struct Cli {
    /// Input text file (output of a layout-preserving extractor)
    input: PathBuf,

    /// Output file for delimited formats (defaults to input_tables.{format})
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: csv, tsv, or text
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Minimum run of spaces counted as a column separator
    #[arg(long)]
    space: Option<usize>,

    /// Non-matching interior lines tolerated before a block closes
    #[arg(long)]
    patience: Option<usize>,

    /// Force the first column to start at offset 0
    #[arg(long)]
    start_0: bool,

    /// TOML config file with mining thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => MineConfig::load_from_file(path)?,
        None => MineConfig::load_from_env(),
    };
    if let Some(space) = cli.space {
        config.space = space;
    }
    if let Some(patience) = cli.patience {
        config.patience = patience;
    }
    if cli.start_0 {
        config.start_0 = true;
    }
    config.validate()?;
    let options: MineOptions = config.options();

    let text = std::fs::read_to_string(&cli.input)
        .map_err(|e| anyhow!("Failed to read {:?}: {}", cli.input, e))?;
    info!("Read {} characters from {:?}", text.len(), cli.input);

    let timer = PerformanceTimer::start("mining");
    let miner = TableMiner::new(text);
    let (tables, stats) = miner.mine_with_stats(&options)?;
    timer.checkpoint("detection and splitting");
    drop(timer);

    info!("{}", stats.summary());

    match cli.format.as_str() {
        "csv" => export_delimited(&cli, &tables, b',', "csv")?,
        "tsv" => export_delimited(&cli, &tables, b'\t', "tsv")?,
        "text" => {
            for (i, table) in tables.iter().enumerate() {
                println!("Table {} [{}x{}]", i + 1, table.nrow(), table.ncol());
                println!("{}\n", table);
            }
            if tables.is_empty() {
                println!("No tables found in {:?}", cli.input);
            }
        }
        other => return Err(anyhow!("Unsupported format: {}. Use csv, tsv, or text", other)),
    }

    Ok(())
}

/// Write each mined table to its own delimited file. A single table goes to
/// the requested output path; several tables get a numbered suffix.
fn export_delimited(
    cli: &Cli,
    tables: &tablemine::Tables,
    delimiter: u8,
    extension: &str,
) -> Result<()> {
    if tables.is_empty() {
        println!("No tables found in {:?}", cli.input);
        return Ok(());
    }

    let base = cli.output.clone().unwrap_or_else(|| {
        let mut path = cli.input.clone();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        path.set_file_name(format!("{}_tables.{}", stem, extension));
        path
    });

    for (i, table) in tables.iter().enumerate() {
        let path = if tables.len() == 1 {
            base.clone()
        } else {
            let stem = base
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "output".to_string());
            base.with_file_name(format!("{}_{}.{}", stem, i + 1, extension))
        };
        table.to_csv(&path, delimiter)?;
        println!(
            "Wrote table {} ({}x{}) to {:?}",
            i + 1,
            table.nrow(),
            table.ncol(),
            path
        );
    }

    Ok(())
}
