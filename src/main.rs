#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use holder_lottery::audit_file::{read_audit, write_audit};
use holder_lottery::config::{LotteryParams, Settings, DEFAULT_TIMEOUT_SECS};
use holder_lottery::display::{draw_summary, verify_summary};
use holder_lottery::exclusions::load_exclusions;
use holder_lottery::pipeline::{execute_draw, resolve_seed, DrawInputs};
use holder_lottery::predict::{next_occurrence, parse_hhmm, project_slot, SLOT_DURATION_MS};
use holder_lottery::rpc::RpcClient;
use holder_lottery::{verify_audit, CliError};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "holder-lottery",
    version,
    about = "Verifiable Solana token-holder lottery tool",
    disable_help_subcommand = true
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,
    /// Override RPC URL (else RPC_URL / HELIUS_API_KEY from env)
    #[arg(long, global = true)]
    rpc_url: Option<String>,
    /// RPC timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: f64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the draw and write an audit JSON
    Draw(DrawArgs),
    /// Verify an existing audit JSON deterministically
    Verify(VerifyArgs),
    /// Project the slot that will be produced at a given local time
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
struct DrawArgs {
    /// Finalized target slot whose blockhash seeds the draw
    #[arg(long)]
    slot: u64,
    /// Block feed file to source the blockhash (raw string or JSON)
    #[arg(long)]
    block_feed_file: Option<PathBuf>,
    /// Audit output path
    #[arg(long, default_value = "audit.json")]
    out: PathBuf,
    /// Token mint (default: the announced mint)
    #[arg(long)]
    mint: Option<String>,
    /// Exclusion list path (default: the committed list)
    #[arg(long)]
    exclusions: Option<PathBuf>,
    /// Minimum eligible balance in raw units
    #[arg(long)]
    min_balance: Option<u128>,
}

#[derive(Debug, Args)]
struct VerifyArgs {
    /// Path to audit.json
    #[arg(long)]
    audit: PathBuf,
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Target local time, 24h (e.g. 22:00)
    #[arg(long)]
    time: String,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn cmd_draw(cli: &Cli, args: &DrawArgs) -> Result<(), CliError> {
    let settings = Settings::from_env(cli.rpc_url.clone(), cli.timeout)?;
    debug!(rpc = settings.redacted_url(), "rpc endpoint");

    let mut params = LotteryParams::default();
    if let Some(mint) = &args.mint {
        params.mint.clone_from(mint);
    }
    if let Some(path) = &args.exclusions {
        params.excluded_wallets_file = Some(path.clone());
    }
    if let Some(min) = args.min_balance {
        params.min_raw_balance = min;
    }
    let excluded = load_exclusions(params.excluded_wallets_file.as_deref())?;

    let rpc = RpcClient::new(&settings)?;
    let (seed, seed_source) = resolve_seed(&rpc, args.block_feed_file.as_deref(), args.slot).await?;
    let account_blobs = rpc.get_token_accounts(&params.mint).await?;

    let inputs = DrawInputs {
        target_slot: args.slot,
        seed,
        seed_source,
        account_blobs,
        excluded,
    };
    let result = execute_draw(&inputs, &params, Utc::now())?;
    write_audit(&args.out, &result.record)?;
    println!("{}", draw_summary(&result.record, params.token_decimals, &args.out));
    Ok(())
}

fn cmd_verify(args: &VerifyArgs) -> Result<(), CliError> {
    let record = read_audit(&args.audit)?;
    let report = verify_audit(&record)?;
    info!(winner = %report.winner, ticket = report.winning_ticket, "audit verified");
    println!("{}", verify_summary(&report, LotteryParams::default().token_decimals));
    Ok(())
}

async fn cmd_predict(cli: &Cli, args: &PredictArgs) -> Result<(), CliError> {
    let at = parse_hhmm(&args.time)?;
    let settings = Settings::from_env(cli.rpc_url.clone(), cli.timeout)?;
    let rpc = RpcClient::new(&settings)?;

    let current_slot = rpc.get_slot().await?;
    let block_time = rpc.get_block_time(current_slot).await?;
    let target = next_occurrence(&Local::now(), at)
        .ok_or_else(|| CliError::InvalidTime(args.time.clone()))?;
    let target_slot = project_slot(current_slot, block_time, target.timestamp());

    println!("--- SLOT PREDICTION ---");
    println!("Target time        : {} local", target.format("%Y-%m-%d %H:%M:%S"));
    println!("Target time (UTC)  : {}", target.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S"));
    println!("Current slot       : {current_slot}");
    println!("Projected slot     : {target_slot}");
    println!("Assumed slot time  : {SLOT_DURATION_MS} ms (heuristic)");
    println!("-----------------------");
    println!("PUBLIC ANNOUNCEMENT:\n\"Draw slot is {target_slot}\"");
    Ok(())
}

/// `--help` and `--version` succeed; every usage error exits 1.
fn parse_exit_code(e: &clap::Error) -> ExitCode {
    if e.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Failure text always reaches `out`, whatever the log filter.
fn report<W: Write>(res: Result<(), CliError>, out: &mut W) -> ExitCode {
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let _ = writeln!(out, "error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return parse_exit_code(&e);
        }
    };
    init_tracing(cli.verbose);

    let res = match &cli.command {
        Command::Draw(args) => cmd_draw(&cli, args).await,
        Command::Verify(args) => cmd_verify(args),
        Command::Predict(args) => cmd_predict(&cli, args).await,
    };
    report(res, &mut std::io::stderr())
}
