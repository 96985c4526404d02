use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use energo_reports::output::{write_csv, write_csv_path};
use energo_reports::{
    AtsPortal, AtsReportKind, PortalConfig, RegionReference, RegionTotalReport, SoPortal,
    SoReportKind, Table,
};

const REGION_TOTAL: &str = "region_total";

#[derive(Parser)]
#[command(name = "energo-reports")]
#[command(about = "Download ATS and SO UPS market reports as normalized CSV", long_about = None)]
struct Cli {
    /// Report identifier (TS_PART_REP_LINE, big_nodes_prices_pub, carana_sell_units,
    /// curve_demand_offer, overflow_sechen_all_pub, trade_region_spub,
    /// overflow_region_spub, fact_region, GenConsum, ForecastConsumSubRf,
    /// PowerESPPByRegions, region_total)
    report: String,

    /// First date (YYYY-MM-DD)
    start: NaiveDate,

    /// Last date, inclusive (YYYY-MM-DD); defaults to a single period
    end: Option<NaiveDate>,

    /// Output CSV file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Region reference file (overrides the configuration)
    #[arg(short, long)]
    regions: Option<PathBuf>,

    /// Attempts per URL (overrides the configuration)
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Seconds between attempts (overrides the configuration)
    #[arg(long)]
    backoff_secs: Option<u64>,
}

enum Command {
    Ats(AtsReportKind),
    So(SoReportKind),
    RegionTotal,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        if name == REGION_TOTAL {
            return Some(Command::RegionTotal);
        }
        AtsReportKind::from_name(name)
            .map(Command::Ats)
            .or_else(|| SoReportKind::from_name(name).map(Command::So))
    }
}

fn load_config(cli: &Cli) -> Result<PortalConfig> {
    let mut config = match &cli.config {
        Some(path) => PortalConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => PortalConfig::default(),
    };

    if let Some(path) = &cli.regions {
        config.regions_path = path.clone();
    }
    if let Some(attempts) = cli.max_attempts {
        config.max_attempts = attempts;
    }
    if let Some(secs) = cli.backoff_secs {
        config.backoff_secs = secs;
    }
    config.validate()?;
    Ok(config)
}

fn load_regions(config: &PortalConfig) -> Result<RegionReference> {
    RegionReference::from_path(&config.regions_path).with_context(|| {
        format!(
            "Failed to load region reference from {}",
            config.regions_path.display()
        )
    })
}

fn run(cli: &Cli) -> Result<Table> {
    let Some(command) = Command::from_name(&cli.report) else {
        bail!("Unknown report '{}'", cli.report);
    };
    let config = load_config(cli)?;

    let table = match command {
        Command::Ats(kind) => {
            let portal = AtsPortal::from_config(&config, load_regions(&config)?)?;
            kind.download_table(&portal, cli.start, cli.end)?
        }
        Command::So(kind) => {
            let portal = SoPortal::from_config(&config)?;
            kind.download_table(&portal, cli.start, cli.end)?
        }
        Command::RegionTotal => {
            let ats = AtsPortal::from_config(&config, load_regions(&config)?)?;
            let so = SoPortal::from_config(&config)?;
            RegionTotalReport
                .download(&ats, &so, cli.start, cli.end)?
                .to_table()
        }
    };

    Ok(table)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let table = run(&cli).with_context(|| format!("Report '{}' failed", cli.report))?;

    match &cli.output {
        Some(path) => {
            write_csv_path(&table, path)?;
            info!(path = %path.display(), rows = table.len(), "Report written");
        }
        None => write_csv(&table, io::stdout().lock())?,
    }

    Ok(())
}
