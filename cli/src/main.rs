//! sizechart CLI - sizing chart extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use sizechart::{
    detect_input, render, Batch, DiagnosticKind, JsonFormat, RenderOptions, Sizechart,
};

#[derive(Parser)]
#[command(name = "sizechart")]
#[command(version)]
#[command(about = "Turn OCR table output into Markdown tables and sizing charts", long_about = None)]
struct Cli {
    /// Input JSON file (upload response, OCR document or block list)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Process tables and images one at a time
    #[arg(long, global = true, env = "SIZECHART_SEQUENTIAL")]
    sequential: bool,

    /// Keep tables in their detected orientation
    #[arg(long, global = true)]
    keep_orientation: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write Markdown tables, tables JSON and charts JSON
    Convert {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Render the assembled tables as Markdown
    #[command(alias = "md")]
    Tables {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave out the table titles
        #[arg(long)]
        no_titles: bool,
    },

    /// Map the tables to sizing charts and print them as JSON
    Charts {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Unit recorded on every measurement
        #[arg(long, default_value = "cm", env = "SIZECHART_UNIT")]
        unit: String,
    },

    /// Print the assembled tables and titles as JSON
    Json {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Flatten tables and titles across all images
        #[arg(long)]
        flat: bool,
    },

    /// Show extraction statistics and diagnostics
    Info {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut builder = Sizechart::new();
    if cli.sequential {
        builder = builder.sequential();
    }
    if cli.keep_orientation {
        builder = builder.without_orientation();
    }

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => {
            cmd_convert(&builder, &input, output.as_deref())
        }
        Some(Commands::Tables {
            input,
            output,
            no_titles,
        }) => cmd_tables(&builder, &input, output.as_deref(), no_titles),
        Some(Commands::Charts {
            input,
            output,
            compact,
            unit,
        }) => cmd_charts(builder.with_unit(unit), &input, output.as_deref(), compact),
        Some(Commands::Json {
            input,
            output,
            compact,
            flat,
        }) => cmd_json(&builder, &input, output.as_deref(), compact, flat),
        Some(Commands::Info { input }) => cmd_info(&builder, &input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&builder, &input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: sizechart <FILE> [OUTPUT]".yellow());
                println!("       sizechart --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}_output", stem))
}

fn cmd_convert(
    builder: &Sizechart,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_dir(input));

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Processing blocks...");
    let batch = builder.process_file(input)?;
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    let markdown = render::to_markdown(&batch.images, &RenderOptions::default());
    fs::write(output_dir.join("tables.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating tables JSON...");
    let tables = render::to_json(&batch.images, JsonFormat::Pretty)?;
    fs::write(output_dir.join("tables.json"), &tables)?;
    pb.inc(1);

    pb.set_message("Generating charts JSON...");
    let charts = render::to_json(&batch.charts, JsonFormat::Pretty)?;
    fs::write(output_dir.join("charts.json"), &charts)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} tables.md", "├─".dimmed());
    println!("  {} tables.json", "├─".dimmed());
    println!("  {} charts.json", "└─".dimmed());

    if !batch.diagnostics.is_empty() {
        println!(
            "\n{} {} issues found, run `sizechart info` for details",
            "Note:".yellow().bold(),
            batch.diagnostics.len()
        );
    }

    Ok(())
}

fn cmd_tables(
    builder: &Sizechart,
    input: &Path,
    output: Option<&Path>,
    no_titles: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = builder.process_file(input)?;

    let options = RenderOptions::new().with_titles(!no_titles);
    let markdown = render::to_markdown(&batch.images, &options);

    write_or_print(output, &markdown)
}

fn cmd_charts(
    builder: Sizechart,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = builder.process_file(input)?;
    let json = render::to_json(&batch.charts, json_format(compact))?;

    write_or_print(output, &json)
}

fn cmd_json(
    builder: &Sizechart,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    flat: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = builder.process_file(input)?;
    let format = json_format(compact);

    let json = if flat {
        let value = serde_json::json!({
            "tables": batch.all_tables().collect::<Vec<_>>(),
            "titles": batch.all_titles().collect::<Vec<_>>(),
        });
        render::to_json(&value, format)?
    } else {
        render::to_json(&batch.images, format)?
    };

    write_or_print(output, &json)
}

fn cmd_info(builder: &Sizechart, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let value: serde_json::Value = serde_json::from_slice(&data)?;
    let kind = detect_input(&value)?;
    log::debug!("Detected {} in {}", kind, input.display());

    let batch = builder.process_value(value)?;
    let stats = batch.stats();

    println!("{}", "Input Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), kind);
    println!("{}: {}", "Images".bold(), stats.image_count);

    println!();
    println!("{}", "Extraction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Titles".bold(), stats.title_count);
    println!("{}: {}", "Sizes".bold(), stats.size_count);
    println!("{}: {}", "Measurements".bold(), stats.measurement_count);

    print_diagnostics(&batch);

    Ok(())
}

fn print_diagnostics(batch: &Batch) {
    if batch.diagnostics.is_empty() {
        println!("\n{}", "No issues found".green());
        return;
    }

    println!();
    println!("{}", "Issues".yellow().bold());
    println!("{}", "─".repeat(40).dimmed());

    let kinds = [
        (DiagnosticKind::MalformedInput, "Malformed inputs"),
        (DiagnosticKind::MalformedBlock, "Malformed blocks"),
        (DiagnosticKind::MissingCells, "Tables without cells"),
        (DiagnosticKind::InvalidDimensions, "Tables with bad dimensions"),
        (DiagnosticKind::OversizedGrid, "Tables too large to assemble"),
        (DiagnosticKind::OutOfBoundsCell, "Skipped cells"),
        (DiagnosticKind::InsufficientTableShape, "Tables too small to map"),
        (DiagnosticKind::UnparseableMeasurement, "Skipped measurements"),
    ];
    for (kind, label) in kinds {
        let count = batch.diagnostics.count_of(kind);
        if count > 0 {
            println!("{}: {}", label.bold(), count);
        }
    }

    println!();
    for diagnostic in &batch.diagnostics {
        println!("  {} {}", "•".dimmed(), diagnostic);
    }
}

fn cmd_version() {
    println!("{} {}", "sizechart".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Sizing chart extraction from OCR table output");
    println!();
    println!("License: MIT");
}
