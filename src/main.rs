use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use docquiz::{
    export::{save_to_json, to_json_string},
    import_document,
    persist::build_rows,
    ImageCorrelation, ImportConfig,
};

#[derive(Parser)]
#[command(name = "docquiz")]
#[command(version)]
#[command(about = "Import quiz questions, options, answers and images from .docx files", long_about = None)]
struct Cli {
    /// Input .docx file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output JSON file (defaults to the configured output path)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory extracted images are written to
    #[arg(long, value_name = "DIR")]
    images_dir: Option<PathBuf>,

    /// How image placeholders are matched to extracted images
    #[arg(long, value_enum)]
    correlation: Option<ImageCorrelation>,

    /// Print the result set to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Print the question/answer rows that would be stored for this test id
    #[arg(long, value_name = "TEST_ID")]
    rows: Option<i64>,

    /// Write the default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.init_config {
        ImportConfig::init_default()?;
        if let Some(path) = ImportConfig::get_config_path() {
            println!("Wrote default configuration to {}", path.display());
        }
        return Ok(());
    }

    let Some(file) = cli.file else {
        bail!("No input file given. Usage: docquiz <FILE> [--output FILE]");
    };

    let mut config = ImportConfig::load()?;
    if let Some(dir) = cli.images_dir {
        config.image_dir = dir;
    }
    if let Some(correlation) = cli.correlation {
        config.correlation = correlation;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    let output_path = config.output_path.clone();

    let result = import_document(file, config).await?;

    if let Some(test_id) = cli.rows {
        let rows = build_rows(test_id, &result.questions);
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if cli.stdout {
        println!("{}", to_json_string(&result)?);
    } else {
        save_to_json(&result, &output_path)?;
    }

    log::info!("Processed {} questions", result.total_questions);
    Ok(())
}
