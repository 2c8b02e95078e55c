use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use virfeat_rs::name_match::{compare_metadata_with_directory, DEFAULT_NAME_COLUMN};
use virfeat_rs::{featurize_directory, ScanConfig};

#[derive(Parser)]
#[command(author, version, about = "Nucleotide composition features for viral genome FASTA files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Featurize every FASTA record in a directory into a CSV table
    Features {
        /// Directory containing the FASTA files
        fasta_dir: PathBuf,

        /// Output CSV file
        #[arg(short = 'o', long = "output", default_value = "virus_features.csv")]
        output_file: PathBuf,

        /// Recognised file extensions (repeatable)
        #[arg(long = "ext", default_values_t = [String::from("fa"), String::from("fasta")])]
        extensions: Vec<String>,

        /// Ignore gzip-compressed files
        #[arg(long)]
        no_gzip: bool,

        /// Also write a per-virus summary report (TSV)
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Report virus names that differ between scraped metadata and FASTA file names
    CompareNames {
        /// Directory containing the FASTA files
        fasta_dir: PathBuf,

        /// Scraped metadata CSV
        #[arg(short = 'm', long = "metadata", default_value = "scraped_virus_data.csv")]
        metadata_csv: PathBuf,

        /// Metadata column holding the virus name
        #[arg(long, default_value = DEFAULT_NAME_COLUMN)]
        column: String,

        /// Recognised file extensions (repeatable)
        #[arg(long = "ext", default_values_t = [String::from("fa"), String::from("fasta")])]
        extensions: Vec<String>,
    },
}

fn spinner(color: &str, message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let template = format!("{{spinner:.{color}}} {{msg}}");
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template(&template)
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner
}

fn run_features(
    fasta_dir: PathBuf,
    output_file: PathBuf,
    extensions: Vec<String>,
    no_gzip: bool,
    summary: Option<PathBuf>,
) -> virfeat_rs::Result<()> {
    let config = ScanConfig::new(fasta_dir)
        .with_extensions(extensions)
        .with_gzip(!no_gzip);

    // 1. Featurize
    let spin = spinner("green", &format!("Featurizing FASTA files under {}...", config.input_dir.display()));
    let results = featurize_directory(&config, summary.is_some())?;
    spin.finish_with_message(format!("Featurized {} record(s).", results.table.len()));

    // 2. Write outputs
    let spin = spinner("yellow", "Writing output files...");
    results.table.write_csv_file(&output_file)?;
    if let (Some(path), Some(report)) = (summary, results.get_summary_report()) {
        fs::write(&path, report).map_err(|e| virfeat_rs::VirfeatError::Io { path, source: e })?;
    }
    spin.finish_with_message(format!("Wrote {}.", output_file.display()));

    Ok(())
}

fn run_compare_names(
    fasta_dir: PathBuf,
    metadata_csv: PathBuf,
    column: String,
    extensions: Vec<String>,
) -> virfeat_rs::Result<()> {
    let config = ScanConfig::new(fasta_dir).with_extensions(extensions);

    let spin = spinner("blue", "Comparing virus names...");
    let report = compare_metadata_with_directory(&metadata_csv, &column, &config)?;
    spin.finish_and_clear();

    print!("{}", report);
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Features {
            fasta_dir,
            output_file,
            extensions,
            no_gzip,
            summary,
        } => run_features(fasta_dir, output_file, extensions, no_gzip, summary),
        Commands::CompareNames {
            fasta_dir,
            metadata_csv,
            column,
            extensions,
        } => run_compare_names(fasta_dir, metadata_csv, column, extensions),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
