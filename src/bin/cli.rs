use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inprofile::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ipcli")]
#[command(about = "Credit report CLI - extract and inspect Experian INProfileResponse XML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a human-readable summary of a credit report
    Show(ShowArgs),
    /// Export the normalized report as JSON
    Export(ExportArgs),
}

#[derive(Args)]
struct ShowArgs {
    /// Path to the credit report XML file
    file: PathBuf,
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the credit report XML file
    file: PathBuf,
    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
    /// Keep the PAN exactly as it appears in the source
    #[arg(long)]
    raw_pan: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Show(args) => cmd_show(args),
        Commands::Export(args) => cmd_export(args),
    }
}

fn load_report(file: &PathBuf, raw_pan: bool) -> anyhow::Result<CreditReport> {
    ReportParser::new()
        .with_uppercase_pan(!raw_pan)
        .parse_file(file)
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .with_context(|| format!("failed to extract credit report from {}", file.display()))
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let report = load_report(&args.file, false)?;

    println!("Credit Report Summary");
    println!("=====================");
    if !report.report_number.is_empty() {
        println!("Report number: {}", report.report_number);
    }
    if !report.report_date.is_empty() {
        println!("Report date:   {}", report.report_date);
    }

    println!();
    println!("Subject");
    println!("  Name:   {}", report.basic_details.full_name);
    println!("  Mobile: {}", report.basic_details.mobile_phone);
    println!("  PAN:    {}", report.basic_details.pan);
    println!("  DOB:    {}", report.basic_details.date_of_birth);

    println!();
    println!("Score");
    if report.credit_score.is_available() {
        println!(
            "  {} (confidence: {}, range {})",
            report.credit_score.score,
            report.credit_score.confidence_level,
            report.credit_score.range
        );
    } else {
        println!("  unavailable");
    }

    println!();
    println!("Accounts ({} total, {} active)",
        report.report_summary.total_accounts,
        report.report_summary.active_accounts
    );
    println!("  Current balance:  {}", report.report_summary.current_balance);
    println!("  Secured amount:   {}", report.report_summary.secured_accounts_amount);
    println!("  Unsecured amount: {}", report.report_summary.unsecured_accounts_amount);
    println!("  Total overdue:    {}", report.total_overdue());

    for (i, account) in report.credit_accounts.iter().enumerate() {
        println!();
        println!("  Account {}: {} ({})", i + 1, account.bank, account.account_type);
        println!("    Number:    {}", account.account_number);
        println!("    Status:    {}", account.account_status);
        println!("    Balance:   {}", account.current_balance);
        println!("    Overdue:   {}", account.amount_overdue);
        if !account.open_date.is_empty() {
            println!("    Opened:    {}", account.open_date);
        }
        if !account.closed_date.is_empty() {
            println!("    Closed:    {}", account.closed_date);
        }
    }

    println!();
    println!("Addresses ({})", report.addresses.len());
    for address in &report.addresses {
        println!("  {}", address.format_single_line());
    }

    println!();
    println!(
        "Enquiries: {} / {} / {} / {} (7 / 30 / 90 / 180 days)",
        report.enquiries.last_7_days,
        report.enquiries.last_30_days,
        report.enquiries.last_90_days,
        report.enquiries.last_180_days
    );

    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let report = load_report(&args.file, args.raw_pan)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
