//! Intelli Extract CLI - submit document images and compare extractions
//!
//! # Main Commands
//!
//! ```bash
//! intelli-extract extract scan.jpg --category passport   # Submit and show the comparison table
//! intelli-extract categories                             # List document categories
//! intelli-extract inspect response.json                  # Normalize a saved response offline
//! intelli-extract mock-server --port 8080                # Run the mock extraction service
//! ```

use clap::{Parser, Subcommand};
use intelli_extract::{
    load_staged_file, logger, mock, render, resolve_cli_endpoint, run_extraction, CliError,
    ExtractionClient, MockFlavor, MockResponse, MockService, OutputFormat,
};
use intelli_extract_core::{find_category, parse_response, SchemaProfile, ScoreScale, CATEGORIES};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "intelli-extract")]
#[command(about = "Submit document images for extraction and compare methods", long_about = None)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SchemaArgs {
    /// Backend schema preset: auto, m-series, legacy
    #[arg(long, default_value = "auto")]
    schema: String,

    /// Custom schema profile (JSON); overrides --schema
    #[arg(long)]
    schema_file: Option<PathBuf>,

    /// How numeric scores map onto 0-1
    #[arg(long)]
    score_scale: Option<ScoreScale>,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append the raw OCR text to table output
    #[arg(long)]
    raw_text: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an image and show the per-method comparison
    Extract {
        /// Image file to upload
        file: PathBuf,

        /// Document category id (see `categories`)
        #[arg(short, long)]
        category: String,

        /// Extraction service URL (default: $API_BASE_URL)
        #[arg(long)]
        api_url: Option<String>,

        #[command(flatten)]
        schema: SchemaArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List document categories
    Categories,

    /// Normalize a saved service response
    Inspect {
        /// Response JSON file
        input: PathBuf,

        #[command(flatten)]
        schema: SchemaArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the mock extraction service
    MockServer {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Envelope flavor for canned responses
        #[arg(long, value_enum, default_value = "m-series")]
        flavor: MockFlavor,

        /// Serve this JSON file for every request instead
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Answer every request with this HTTP status instead
        #[arg(long)]
        status: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.verbose) {
        eprintln!("⚠️  Logger unavailable: {}", e);
    }

    let result = match cli.command {
        Commands::Extract {
            file,
            category,
            api_url,
            schema,
            output,
        } => cmd_extract(&file, &category, api_url.as_deref(), &schema, &output).await,

        Commands::Categories => cmd_categories(),

        Commands::Inspect { input, schema, output } => cmd_inspect(&input, &schema, &output),

        Commands::MockServer {
            port,
            flavor,
            fixture,
            status,
        } => cmd_mock_server(port, flavor, fixture.as_deref(), status).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_profile(args: &SchemaArgs) -> Result<SchemaProfile, CliError> {
    let profile = match &args.schema_file {
        Some(path) => SchemaProfile::from_json(&fs::read_to_string(path)?)?,
        None => args.schema.parse::<SchemaProfile>()?,
    };
    Ok(match args.score_scale {
        Some(scale) => profile.with_score_scale(scale),
        None => profile,
    })
}

async fn cmd_extract(
    file: &Path,
    category: &str,
    api_url: Option<&str>,
    schema: &SchemaArgs,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = find_category(category).ok_or_else(|| CliError::UnknownCategory(category.to_string()))?;
    let profile = load_profile(schema)?;
    let endpoint = resolve_cli_endpoint(api_url);

    eprintln!("📄 Processing: {} as {}", file.display(), category.display_name);

    let staged = load_staged_file(file)?;
    let client = ExtractionClient::new(endpoint, profile.clone());
    let session = run_extraction(&client, category.id, staged).await;

    if let Some(message) = session.last_error() {
        return Err(CliError::SubmissionFailed(message.to_string()).into());
    }

    eprintln!("✅ {} attributes extracted", session.rows().len());

    let rendered = render(session.result_set(), &profile, output.format, output.raw_text)?;
    write_output(&rendered, output.output.as_deref())?;
    Ok(())
}

fn cmd_categories() -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📋 Document categories ({}):\n", CATEGORIES.len());
    for category in CATEGORIES {
        println!("  {:<10} {}", category.id, category.display_name);
    }
    Ok(())
}

fn cmd_inspect(input: &Path, schema: &SchemaArgs, output: &OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🔍 Inspecting: {}", input.display());

    let profile = load_profile(schema)?;
    let body = fs::read_to_string(input)?;
    let result = parse_response(&body, &profile).map_err(CliError::from)?;

    eprintln!("   {} rows, {} bytes raw text", result.rows.len(), result.raw_text.len());

    let rendered = render(&result, &profile, output.format, output.raw_text)?;
    write_output(&rendered, output.output.as_deref())?;
    Ok(())
}

async fn cmd_mock_server(
    port: u16,
    flavor: MockFlavor,
    fixture: Option<&Path>,
    status: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = match (status, fixture) {
        (Some(code), _) => MockResponse::status(code)?,
        (None, Some(path)) => MockResponse::fixture_file(path)?,
        (None, None) => MockResponse::Canned(flavor),
    };

    mock::start_server(port, MockService::new(response)).await?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
