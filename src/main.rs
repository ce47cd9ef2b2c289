use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use defi_risk_assessor::{
    config::Settings,
    models::OpportunityRecord,
    services::RiskAssessmentService,
    utils::logging::init_tracing,
    AppError,
};
use tracing::info;

// --- CLI Definition ---

/// Score a DeFi yield opportunity read as JSON from FILE or stdin.
#[derive(Parser, Debug)]
#[command(name = "defi-risk-assessor", author, version, about, long_about = None)]
struct Args {
    /// Chain the opportunity lives on (e.g., "ethereum", "arbitrum").
    #[arg(long)]
    chain: Option<String>,

    /// Protocol offering the opportunity (e.g., "aave", "curve").
    #[arg(long)]
    protocol: Option<String>,

    /// Date audit ages are measured against, YYYY-MM-DD. Defaults to today (UTC).
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Opportunity JSON file. Reads stdin when omitted.
    input: Option<PathBuf>,
}

fn read_input(path: Option<&PathBuf>) -> Result<String, AppError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let settings = Settings::new()?;
    settings.validate()?;
    init_tracing(&settings.logging)?;

    let raw = read_input(args.input.as_ref())?;
    let record = OpportunityRecord::from_json(&raw)?.with_context(args.chain, args.protocol);

    let service = RiskAssessmentService::from_settings(&settings.cache);
    let result = match args.as_of {
        Some(as_of) => service.assess_at(&record, as_of)?,
        None => service.assess(&record)?,
    };

    info!(risk_tier = %result.risk_tier, "Assessment complete");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_all_options() {
        let args = Args::try_parse_from([
            "defi-risk-assessor",
            "--chain",
            "ethereum",
            "--protocol",
            "aave",
            "--as-of",
            "2024-06-01",
            "pool.json",
        ])
        .unwrap();

        assert_eq!(args.chain.as_deref(), Some("ethereum"));
        assert_eq!(args.protocol.as_deref(), Some("aave"));
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(args.input, Some(PathBuf::from("pool.json")));
    }

    #[test]
    fn test_no_args_reads_stdin() {
        let args = Args::try_parse_from(["defi-risk-assessor"]).unwrap();
        assert!(args.input.is_none());
        assert!(args.as_of.is_none());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Args::try_parse_from(["defi-risk-assessor", "--as-of", "June 1st"]).is_err());
        assert!(Args::try_parse_from(["defi-risk-assessor", "--chain"]).is_err());
        assert!(Args::try_parse_from(["defi-risk-assessor", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["defi-risk-assessor", "a.json", "b.json"]).is_err());
    }
}
