use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use roi_core::{InputField, InputMode};
use roi_ui::config::AppConfig;
use roi_ui::{App, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Channel partner ROI calculator.
///
/// Prints the projected commission and revenue report for the given
/// inputs, or opens an interactive session with `--interactive`. Numeric
/// flags accept formatted text such as `$55,000` or `25%`.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV file holding the book of business (`label,amount,pct`).
    #[arg(long)]
    book: Option<PathBuf>,

    /// Read commands from stdin after applying the flags.
    #[arg(short, long)]
    interactive: bool,

    /// Write the results document when done.
    #[arg(long)]
    export: bool,

    /// Directory for exported documents.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log level or filter directive. `RUST_LOG` takes precedence.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// WSE sizing mode: `byClients` or `byWSE`.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<InputMode>,

    #[arg(long, allow_hyphen_values = true)]
    clients: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    avg_wse_per_client: Option<String>,

    /// Total WSE, used in `byWSE` mode.
    #[arg(long, allow_hyphen_values = true)]
    total_wse: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    avg_annual_wage: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    mgmt_fee_per_wse: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    conversion_rate: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    master_plan_pct: Option<String>,

    /// Only accepted when the configuration makes the rate adjustable.
    #[arg(long, allow_hyphen_values = true)]
    commission_pct: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    book_portion_pct: Option<String>,
}

fn parse_mode(s: &str) -> Result<InputMode, String> {
    InputMode::parse(s).ok_or_else(|| format!("expected byClients or byWSE, got '{s}'"))
}

impl Cli {
    /// Flags override values from the config file.
    fn merge_into(
        &self,
        config: &mut AppConfig,
    ) {
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }

    fn overrides(&self) -> Vec<(InputField, String)> {
        [
            (InputField::Clients, &self.clients),
            (InputField::AvgWsePerClient, &self.avg_wse_per_client),
            (InputField::TotalWseDirect, &self.total_wse),
            (InputField::AvgAnnualWage, &self.avg_annual_wage),
            (InputField::MgmtFeePerWse, &self.mgmt_fee_per_wse),
            (InputField::ConversionRate, &self.conversion_rate),
            (InputField::MasterPlanPct, &self.master_plan_pct),
            (InputField::CommissionPct, &self.commission_pct),
            (InputField::BookPortionPct, &self.book_portion_pct),
        ]
        .into_iter()
        .filter_map(|(field, raw)| raw.clone().map(|raw| (field, raw)))
        .collect()
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path).context("failed to load configuration")?,
        None => AppConfig::default(),
    };
    cli.merge_into(&mut config);

    logging::init_logging(&config.logging.level);
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "configuration resolved");

    let mut app = App::new(&config);
    if let Some(path) = &cli.book {
        app.load_book(path)?;
    }
    if let Some(mode) = cli.mode {
        app.state_mut().set_input_mode(mode);
    }
    app.apply_overrides(&cli.overrides())
        .context("invalid command-line input")?;

    if cli.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        app.run_interactive(stdin, &mut io::stdout()).await?;
    } else {
        print!("{}", app.report());
    }

    if cli.export {
        let path = app
            .export()
            .await
            .context("export failed; see log for details")?;
        println!("exported to {}", path.display());
    }

    Ok(())
}
