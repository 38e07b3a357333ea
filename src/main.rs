use analytics::{AnalyticsEngine, AnalyticsError, DashboardReport};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::{FilterSpec, Granularity, RankMetric, RankingConfig};
use std::collections::HashSet;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Meridian sales reporting application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (RUST_LOG etc.) from an optional .env file
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => handle_serve().await,
        Commands::Report(args) => handle_report(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// An interactive reporting engine over a tabular sales dataset.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard HTTP API.
    Serve,
    /// Render a one-shot dashboard report to the console.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Start of the reporting window (format: YYYY-MM-DD).
    /// Defaults to the dataset's first sale date.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the reporting window (format: YYYY-MM-DD).
    /// Defaults to the dataset's last sale date.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Products to keep, comma-separated. All products when omitted.
    #[arg(long, value_delimiter = ',')]
    products: Option<Vec<String>>,

    /// Segments to keep, comma-separated. All segments when omitted.
    #[arg(long, value_delimiter = ',')]
    segments: Option<Vec<String>>,

    /// Ranking metric: "revenue" or "quantity".
    #[arg(long)]
    metric: Option<RankMetric>,

    /// Number of rows in the top-N ranking.
    #[arg(long)]
    top_n: Option<usize>,

    /// Series bucket size: "daily" or "monthly".
    #[arg(long)]
    granularity: Option<Granularity>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the configuration and hands control to the web server.
async fn handle_serve() -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid [server] host/port in config.toml")?;
    web_server::run_server(addr, config).await
}

/// Runs the pipeline once and renders the report as console tables.
fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let records = ingestion::load_sales_file(&config.dataset.path)?;
    let engine = AnalyticsEngine::new();

    let domain = engine.filter_domain(&records)?;
    let spec = FilterSpec {
        date_start: args
            .from
            .or(config.report.date_start)
            .unwrap_or(domain.date_min),
        date_end: args.to.or(config.report.date_end).unwrap_or(domain.date_max),
        allowed_products: args.products.map(|p| p.into_iter().collect::<HashSet<_>>()),
        allowed_segments: args.segments.map(|s| s.into_iter().collect()),
    };
    let ranking = RankingConfig {
        metric: args.metric.unwrap_or(config.report.metric),
        top_n: args.top_n.unwrap_or(config.report.top_n),
    };
    let granularity = args.granularity.unwrap_or(config.report.granularity);

    let report = match engine.build_dashboard(&records, &spec, &ranking, granularity) {
        Ok(report) => report,
        Err(AnalyticsError::EmptyResult(_)) => {
            println!("No data for the selected filters.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    render_report(&report);
    Ok(())
}

/// Prints the summary row, the tables and the share metric.
fn render_report(report: &DashboardReport) {
    println!(
        "Total revenue: {}   Units sold: {}   Products: {}",
        report.summary.total_revenue, report.summary.total_units, report.summary.product_count
    );

    let mut kpi_table = Table::new();
    kpi_table.set_header(vec!["Product", "Total quantity", "Total revenue"]);
    for kpi in &report.kpis {
        kpi_table.add_row(vec![
            kpi.product.clone(),
            kpi.total_quantity.to_string(),
            kpi.total_revenue.to_string(),
        ]);
    }
    println!("\nKPI per product\n{kpi_table}");

    let mut series_table = Table::new();
    series_table.set_header(vec!["Period", "Revenue"]);
    for point in &report.revenue_series {
        series_table.add_row(vec![point.period.clone(), point.revenue.to_string()]);
    }
    println!("\nRevenue over time\n{series_table}");

    let mut ranking_table = Table::new();
    ranking_table.set_header(vec!["Product", "Total quantity", "Total revenue"]);
    for kpi in &report.ranking {
        ranking_table.add_row(vec![
            kpi.product.clone(),
            kpi.total_quantity.to_string(),
            kpi.total_revenue.to_string(),
        ]);
    }
    println!("\nTop products\n{ranking_table}");

    // Display rounding happens here, at the presentation edge.
    println!(
        "\nLeader share of revenue: {}%",
        report.leader_share_pct.round_dp(1)
    );
}
