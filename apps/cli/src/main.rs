use clap::{Args, Parser, Subcommand};
use safecap_cli::commands::{run_convert, run_table, ConvertRequest};
use safecap_cli::config::{build_config, ConfigOverrides};
use safecap_cli::init_tracing;
use std::path::PathBuf;

/// SAFE conversion calculator
#[derive(Parser, Debug)]
#[command(name = "safecap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (JSON format)
    #[arg(short, long, value_name = "FILE", env = "SAFECAP_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SAFECAP_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, env = "SAFECAP_LOG_FORMAT", global = true)]
    log_format: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, env = "SAFECAP_OUTPUT", global = true)]
    output: Option<String>,

    /// Unit of discount rates (fraction, percent)
    #[arg(long, env = "SAFECAP_DISCOUNT_RATE_UNIT", global = true)]
    discount_rate_unit: Option<String>,

    /// MFN conversion (face-value, best-terms)
    #[arg(long, env = "SAFECAP_MFN_TREATMENT", global = true)]
    mfn_treatment: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the post-conversion capitalization table
    Table {
        /// Scenario file (JSON); the default company structure when omitted
        #[arg(short, long, value_name = "FILE")]
        scenario: Option<PathBuf>,
    },
    /// Project the ownership of a single SAFE
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// valuation-cap, discount or mfn
    #[arg(long)]
    kind: String,
    #[arg(long)]
    investor: Option<String>,
    #[arg(long, default_value = "100000")]
    investment: String,
    #[arg(long)]
    cap: Option<String>,
    #[arg(long)]
    discount: Option<String>,
    #[arg(long, default_value = "10000000")]
    post_money: String,
    #[arg(long)]
    new_money: Option<String>,
    #[arg(long)]
    total_shares: Option<String>,
}

impl From<ConvertArgs> for ConvertRequest {
    fn from(args: ConvertArgs) -> Self {
        ConvertRequest {
            kind: args.kind,
            investor_name: args.investor,
            investment: args.investment,
            valuation_cap: args.cap,
            discount_rate: args.discount,
            post_money: args.post_money,
            new_money: args.new_money,
            total_shares: args.total_shares,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        config_file: cli.config,
        log_level: cli.log_level,
        log_format: cli.log_format,
        output: cli.output,
        discount_rate_unit: cli.discount_rate_unit,
        mfn_treatment: cli.mfn_treatment,
    };
    let config = build_config(&overrides)?;
    init_tracing(config.log_level, config.log_format);
    tracing::debug!(?config, version = safecap_cli::VERSION, "Configuration loaded");

    let output = match cli.command {
        Command::Table { scenario } => run_table(&config, scenario.as_deref())?,
        Command::Convert(args) => run_convert(&config, &args.into())?,
    };
    println!("{}", output);
    Ok(())
}
