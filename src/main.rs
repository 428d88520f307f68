//! Command-line entry point.

use anyhow::Context;
use clap::{Parser, Subcommand};
use datadeck::constants::DEFAULT_SERVE_PORT;
use datadeck::dashboard::build_dashboard;
use datadeck::data::{format_row_count, profile_columns, Dataset};
use datadeck::sample::{self, Pattern, SampleSpec};
use datadeck::server::PreviewServer;
use datadeck::settings::BuildSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "datadeck")]
#[command(about = "Bake CSV/Arrow/JSON data into self-contained interactive HTML dashboards")]
struct Cli {
    /// Settings file (JSON); defaults to the user config location
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a standalone dashboard HTML file
    Build {
        /// Input data file (CSV, TSV, JSON, or Arrow IPC)
        input: PathBuf,

        /// Output HTML file (default: <input stem>_explorer.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dashboard title
        #[arg(short, long)]
        title: Option<String>,

        /// Custom HTML template
        #[arg(long)]
        template: Option<PathBuf>,

        /// Directory with vega/vega-lite/vega-embed bundles to inline
        #[arg(long)]
        vendor: Option<PathBuf>,

        /// Also write the explorer configuration to this JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Serve a dashboard locally, rebuilding when the data file changes
    Serve {
        /// Input data file (CSV, TSV, JSON, or Arrow IPC)
        input: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_SERVE_PORT)]
        port: u16,

        /// Dashboard title
        #[arg(short, long)]
        title: Option<String>,

        /// Custom HTML template
        #[arg(long)]
        template: Option<PathBuf>,

        /// Open the dashboard in the system browser
        #[arg(long)]
        open: bool,
    },

    /// Print the schema and column profiles of a data file
    Inspect {
        input: PathBuf,

        /// Also export the loaded data as CSV to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Generate a test CSV file
    Sample {
        /// Output CSV file
        #[arg(short, long, default_value = "test_data.csv")]
        output: PathBuf,

        #[arg(long, default_value_t = 100_000)]
        rows: usize,

        #[arg(long, value_enum, default_value_t = Pattern::Mixed)]
        pattern: Pattern,

        /// Distinct labels in the category column
        #[arg(long, default_value_t = 4)]
        categories: usize,

        /// RNG seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = BuildSettings::load_or_default(cli.settings.as_deref());

    match cli.command {
        Command::Build {
            input,
            output,
            title,
            template,
            vendor,
            config,
        } => {
            let mut settings = settings;
            if title.is_some() {
                settings.title = title;
            }
            if vendor.is_some() {
                settings.vendor_dir = vendor;
            }

            let dataset = Dataset::from_path(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let build = build_dashboard(&dataset, &settings, template.as_deref())?;

            if let Some(config_path) = config {
                std::fs::write(&config_path, serde_json::to_string_pretty(&build.config)?)?;
                tracing::info!("Wrote configuration to {}", config_path.display());
            }

            let output = output.unwrap_or_else(|| default_output(&input));
            std::fs::write(&output, &build.html)
                .with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(
                "Wrote dashboard to {} ({:.2} MB)",
                output.display(),
                build.html.len() as f64 / 1024.0 / 1024.0
            );
        }

        Command::Serve {
            input,
            port,
            title,
            template,
            open,
        } => {
            let mut settings = settings;
            if title.is_some() {
                settings.title = title;
            }

            let server = PreviewServer::start(input, settings, template, port)?;
            println!("Serving dashboard at {}", server.url());

            if open {
                if let Err(e) = open::that(server.url()) {
                    tracing::warn!("Could not open browser: {}", e);
                }
            }

            server.join();
        }

        Command::Inspect { input, export } => {
            let dataset = Dataset::from_path(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let profiles = profile_columns(&dataset)?;

            println!(
                "{}: {} x {} columns",
                dataset.name,
                format_row_count(dataset.height()),
                dataset.width()
            );
            for p in &profiles {
                let range = match (p.min, p.max) {
                    (Some(min), Some(max)) => format!(", range {min:.2}..{max:.2}"),
                    _ => String::new(),
                };
                println!(
                    "  {}: {:?} (nulls: {}, unique: {}{})",
                    p.name, p.column_type, p.null_count, p.unique_count, range
                );
            }

            if let Some(path) = export {
                dataset
                    .write_csv(&path)
                    .with_context(|| format!("exporting {}", path.display()))?;
            }
        }

        Command::Sample {
            output,
            rows,
            pattern,
            categories,
            seed,
        } => {
            let spec = SampleSpec {
                rows,
                pattern,
                categories,
                seed,
            };
            sample::write_csv(&output, &spec)?;
            println!("Generated {} rows at {}", rows, output.display());
        }
    }

    Ok(())
}

fn default_output(input: &PathBuf) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dashboard");
    input.with_file_name(format!("{stem}_explorer.html"))
}
