use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mono::{Environment, Failure, MonoClient, MonoConfig, VerificationMethod, VerificationResult};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

/// Drives the Mono BVN lookup one step at a time.
///
/// Reads `MONO_SECRET_KEY` (and optionally `MONO_BASE_URL`, `MONO_REQUEST_TIMEOUT_SECS`,
/// `APP_ENV`) from the environment or a `.env` file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a verification and list the channels the one-time password can use
    Initiate {
        /// Bank Verification Number
        #[arg(long)]
        bvn: String,
    },
    /// Choose the channel the one-time password is sent through
    Verify {
        /// Session identifier returned by `initiate`
        #[arg(long)]
        session_id: String,
        /// email, phone, phone_1 or alternate_phone
        #[arg(long)]
        method: VerificationMethod,
        /// Required with alternate_phone
        #[arg(long)]
        phone_number: Option<String>,
    },
    /// Exchange the one-time password for the verified details
    Details {
        /// Session identifier returned by `initiate`
        #[arg(long)]
        session_id: String,
        /// One-time password received through the chosen channel
        #[arg(long)]
        otp: String,
    },
}

fn init_tracing(environment: Environment) {
    // Logs go to stderr, stdout carries the result document
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn render(result: &VerificationResult) -> Value {
    let failure = result.failure().map(|failure| match failure {
        Failure::Remote => "remote",
        Failure::Request(_) => "request",
        Failure::Validation => "validation",
    });
    let methods: Vec<Value> = result
        .methods()
        .iter()
        .map(|channel| json!({ "method": channel.method, "hint": channel.hint }))
        .collect();

    json!({
        "success": result.is_successful(),
        "message": result.message(),
        "state": result.state().as_str(),
        "failure": failure,
        "session_id": result.session_id(),
        "methods": methods,
        "data": result.data(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = MonoConfig::from_env()?;
    init_tracing(config.environment);
    info!(base_url = %config.base_url, "Mono client configured");

    let client = MonoClient::from_config(&config).context("Failed to create HTTP client")?;
    let bvn = client.lookup().bvn;

    let result = match cli.command {
        Command::Initiate { bvn: number } => bvn.initiate(&number).await?,
        Command::Verify {
            session_id,
            method,
            phone_number,
        } => {
            bvn.verify(method, &session_id, phone_number.as_deref())
                .await?
        }
        Command::Details { session_id, otp } => bvn.fetch_details(&otp, &session_id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&render(&result))?);

    if !result.is_successful() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_verify() {
        let cli = Cli::try_parse_from([
            "mono-cli",
            "verify",
            "--session-id",
            "S1",
            "--method",
            "alternate_phone",
            "--phone-number",
            "08001234567",
        ])
        .unwrap();

        match cli.command {
            Command::Verify {
                session_id,
                method,
                phone_number,
            } => {
                assert_eq!(session_id, "S1");
                assert_eq!(method, VerificationMethod::AlternatePhone);
                assert_eq!(phone_number.as_deref(), Some("08001234567"));
            }
            _ => panic!("Expected the verify command"),
        }
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let result = Cli::try_parse_from([
            "mono-cli",
            "verify",
            "--session-id",
            "S1",
            "--method",
            "alternative_phone",
        ]);

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_render_local_failure() {
        let result = MonoClient::new("test_sk")
            .lookup()
            .bvn
            .verify(VerificationMethod::AlternatePhone, "S1", None)
            .await
            .unwrap();

        assert_eq!(
            render(&result),
            json!({
                "success": false,
                "message": mono::lookup::PHONE_NUMBER_REQUIRED,
                "state": "failed",
                "failure": "validation",
                "session_id": "",
                "methods": [],
                "data": null,
            })
        );
    }
}
