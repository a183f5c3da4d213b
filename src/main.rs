use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use carbonlens::api::{self, ClimatiqClient};
use carbonlens::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use carbonlens::models::{AppState, ResultSet, REGIONS};
use carbonlens::presentation::{terminal, Column};
use carbonlens::routes::build_router;
use carbonlens::services::{self, Dashboard, Estimate, FetchStrategy};

fn build_client(env_file: Option<&str>) -> ClimatiqClient {
    config::load_env_file(env_file);
    match ClimatiqClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    }
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting carbonlens server");
    println!("{} {}", Paint::new("Dashboard running on").green(), Paint::new(format!("http://{}", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", Paint::new(format!("Failed to bind to {}", addr)).red(), e, Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} Fetching emissions [{bar:30}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("{}: {}", Paint::red("Failed to encode JSON"), e);
            process::exit(1);
        }
    }
}

fn results_json(results: &ResultSet, dashboard: &Dashboard) -> serde_json::Value {
    let table = dashboard.table();
    // Visible rows in display order, keyed by column slug
    let rows: Vec<serde_json::Value> = table
        .visible_rows()
        .map(|row| {
            Column::ALL
                .iter()
                .map(|c| (c.slug().to_string(), serde_json::Value::from(row.cell(*c))))
                .collect::<serde_json::Map<_, _>>()
                .into()
        })
        .collect();
    serde_json::json!({
        "energy_kwh": results.energy_kwh,
        "calculated_at": results.calculated_at,
        "results": results.rows,
        "stats": dashboard.stats(),
        "table": {
            "sort": table
                .last_sorted()
                .map(|(column, direction)| serde_json::json!({ "column": column, "direction": direction })),
            "query": table.query(),
            "rows": rows,
        },
    })
}

#[derive(Parser)]
#[command(
    name = "carbonlens",
    author,
    version,
    about = "Compare grid-electricity carbon emissions across regions",
    long_about = r#"carbonlens estimates the CO2e emitted by a given amount of grid electricity in ten regions.

Each region is looked up through the Climatiq estimate API; when the API is unreachable or returns unusable data, a static regional average is used instead. Results are shown as a table, four summary figures and a bar chart, either in the terminal or on a local web dashboard.

Set CLIMATIQ_API_KEY in the environment or in a .env file.

Examples:
  1) Compare regions for 250 kWh:
      carbonlens estimate 250
  2) Sort by region and keep only fallback rows:
      carbonlens estimate 250 --sort region --filter fallback
  3) Run the dashboard:
      carbonlens serve --port 8080
"#,
    after_help = "Use `carbonlens <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web dashboard
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
        /// Send all region requests at once instead of one at a time
        #[arg(long)]
        concurrent: bool,
    },
    /// Estimate emissions for every region
    #[command(about = "Estimate emissions for every region", long_about = "Estimate the emissions of ENERGY kWh in each of the ten regions and print a table, summary figures and a bar chart. `--sort` may be repeated; sorting the same column twice reverses it.")]
    Estimate {
        /// Energy amount in kWh
        #[arg(allow_negative_numbers = true)]
        energy: String,
        /// Sort by column (country, region, total, co2, ch4, n2o, year, source)
        #[arg(long, short = 's')]
        sort: Vec<Column>,
        /// Only show rows containing this text (case-insensitive)
        #[arg(long, short = 'f')]
        filter: Option<String>,
        /// Send all region requests at once instead of one at a time
        #[arg(long)]
        concurrent: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Estimate emissions for a single region code
    #[command(about = "Estimate a single region", long_about = "Estimate ENERGY kWh for one region code (for example DE or US-MI). Codes outside the built-in list are still sent to the API and use the default factor on fallback.")]
    Region {
        code: String,
        #[arg(allow_negative_numbers = true)]
        energy: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// List the built-in regions and their fallback factors
    Regions,
    /// Validate configuration (env vars / API credentials)
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Check that CLIMATIQ_API_KEY is set, then send one probe estimate to the configured endpoint and report whether the API answered or the fallback table was used.")]
    CheckConfig { env_file: Option<String> },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // CLI parsing
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    // With no subcommand, serve the dashboard
    let Some(command) = cli.command else {
        let client = build_client(None);
        let state = AppState::new(client, FetchStrategy::from_flag(config::get_concurrent_requests()));
        start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };

    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
            concurrent,
        } => {
            let client = build_client(env_file.as_deref());
            // Request logs would interleave with the server's own tracing output
            api::set_silent(true);
            let strategy = FetchStrategy::from_flag(concurrent || config::get_concurrent_requests());
            start_server(AppState::new(client, strategy), &host, port, stylesheet).await;
        }
        Commands::Estimate {
            energy,
            sort,
            filter,
            concurrent,
            json,
            env_file,
        } => {
            let energy = match services::parse_energy(&energy) {
                Ok(e) => e,
                Err(e) => {
                    eprintln!("{}: {}", Paint::red("Please enter a valid energy value (kWh)"), e);
                    process::exit(1);
                }
            };
            let client = build_client(env_file.as_deref());
            let strategy = FetchStrategy::from_flag(concurrent || config::get_concurrent_requests());

            let pb = progress_bar(REGIONS.len());
            if json {
                // Stdout carries only the JSON document
                api::set_silent(true);
                pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
            }
            let outcome = services::calculate_for_all(&client, energy, strategy, |row| {
                pb.set_message(row.region.region_code.to_string());
                pb.inc(1);
            })
            .await;
            pb.finish_and_clear();

            let results = match outcome {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{}: {}", Paint::red("Calculation failed"), e);
                    process::exit(1);
                }
            };

            let mut dashboard = match Dashboard::from_results(results) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("{}: {}", Paint::red("Calculation failed"), e);
                    process::exit(1);
                }
            };
            for column in sort {
                dashboard.sort_by(column);
            }
            if let Some(q) = filter.as_deref() {
                dashboard.filter(q);
            }

            let (Some(results), Some(stats), Some(chart)) = (dashboard.results(), dashboard.stats(), dashboard.chart()) else {
                process::exit(1);
            };
            if json {
                print_json(&results_json(results, &dashboard));
            } else {
                terminal::print_report(results, dashboard.table(), stats, chart);
            }
        }
        Commands::Region {
            code,
            energy,
            json,
            env_file,
        } => {
            let energy = match services::parse_energy(&energy) {
                Ok(e) => e,
                Err(e) => {
                    eprintln!("{}: {}", Paint::red("Please enter a valid energy value (kWh)"), e);
                    process::exit(1);
                }
            };
            let client = build_client(env_file.as_deref());
            if json {
                api::set_silent(true);
            }
            let code = code.trim().to_uppercase();
            let est = services::estimate(&client, &code, energy).await;
            if json {
                print_json(&serde_json::json!({ "source": est.provenance(), "data": est.result() }));
                return;
            }

            let r = est.result();
            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL);
            table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_width(terminal::terminal_width() as u16);
            table.set_header(vec!["Field", "Value"]);
            table.add_row(vec!["Region".to_string(), r.region_code.clone()]);
            table.add_row(vec!["Total CO2e (kg)".to_string(), format!("{:.3}", r.total_kg_co2e)]);
            table.add_row(vec!["CO2 (kg)".to_string(), format!("{:.3}", r.co2_kg)]);
            table.add_row(vec!["CH4 (kg)".to_string(), format!("{:.5}", r.ch4_kg)]);
            table.add_row(vec!["N2O (kg)".to_string(), format!("{:.5}", r.n2o_kg)]);
            table.add_row(vec!["Year".to_string(), r.year.clone()]);
            table.add_row(vec!["Source".to_string(), r.source.clone()]);
            println!("\n{table}");
            if let Estimate::Fallback { reason, .. } = &est {
                println!("{}", Paint::new(format!("API unavailable ({}); regional average used", reason)).yellow());
            }
        }
        Commands::Regions => {
            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL);
            table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_width(terminal::terminal_width() as u16);
            table.set_header(vec!["Country", "Region", "Fallback factor (kg CO2e/kWh)"]);
            for r in REGIONS.iter() {
                table.add_row(vec![
                    format!("{} {}", r.flag_label, r.name),
                    r.region_code.to_string(),
                    format!("{:.2}", services::fallback_factor(r.region_code)),
                ]);
            }
            println!("\n{table}\n");
        }
        Commands::CheckConfig { env_file } => {
            let client = build_client(env_file.as_deref());
            if !client.has_api_key() {
                eprintln!("{}", Paint::new("CLIMATIQ_API_KEY is not configured").red());
                process::exit(1);
            }
            let probe = REGIONS[0];
            match services::estimate(&client, probe.region_code, 1.0).await {
                Estimate::Api(result) => {
                    println!(
                        "{} ({} kg CO2e/kWh for {}, source {})",
                        Paint::new("Configuration looks valid").green(),
                        result.total_kg_co2e,
                        probe.region_code,
                        result.source
                    );
                }
                Estimate::Fallback { reason, .. } => {
                    eprintln!(
                        "{}: {}",
                        Paint::new("Configuration appears invalid; the API did not answer").red(),
                        reason
                    );
                    process::exit(1);
                }
            }
        }
    }
}
