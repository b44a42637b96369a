//! Claims Portal - command-line client
//!
//! # Usage
//!
//! ```bash
//! # Log in against a local claims service
//! claims-portal login --email insurer@example.com --password password
//!
//! # Review and decide
//! claims-portal claims list --status manual_review
//! claims-portal claims decide C-1002 approve --note "bill verified"
//!
//! # Try everything offline
//! CLAIMS_PROVIDER=mock claims-portal login --email insurer@example.com --password password
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_API_BASE` - Claims service base URL (default: http://localhost:5001)
//! * `CLAIMS_PROVIDER` - Service adapter: http, mock (default: http)
//! * `CLAIMS_SESSION_PATH` - Session file (default: <config dir>/claims-portal/session.json)
//! * `CLAIMS_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! * `CLAIMS_CURRENCY` - Display currency (default: USD)
//! * `CLAIMS_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{Currency, Money};
use domain_claims::{Claim, ClaimForm, SupportingDocument};
use domain_session::{GateDecision, Role, Route};
use interface_client::cli::{ClaimsCommand, Cli, Commands, SubmitArgs};
use interface_client::views::{ClaimView, DashboardView, LoginView, Notice, Outcome, SubmitClaimView};
use interface_client::{flows, ClaimsPortal, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.log_level);
    tracing::debug!(?config, "Loaded configuration");

    let portal = ClaimsPortal::from_config(&config).context("Failed to start the claims portal")?;
    run(&portal, cli.command).await
}

/// Environment configuration with command-line flags on top
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load().context("Invalid CLAIMS_* configuration")?;
    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(provider) = &cli.provider {
        config.provider = provider.clone();
    }
    if let Some(path) = &cli.session_path {
        config.session_path = Some(path.clone());
    }
    Ok(config)
}

/// Initializes the tracing subscriber, writing to stderr
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(portal: &ClaimsPortal, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let mut view = LoginView::new(email, password);
            let outcome = view.submit(portal).await;
            match outcome {
                Outcome::Navigate(route) if portal.session().is_authenticated() => {
                    let role = portal.session().role().map(|r| r.to_string()).unwrap_or_default();
                    println!("Logged in as {}. Continue at {}", role, route);
                    Ok(())
                }
                outcome => finish(&outcome, view.notice.as_ref()),
            }
        }

        Commands::Logout => {
            flows::sign_out(portal)?;
            println!("Logged out.");
            Ok(())
        }

        Commands::Whoami => {
            match portal.session().current() {
                Some(session) => {
                    println!("role:  {}", session.role);
                    println!("email: {}", session.email.as_deref().unwrap_or("-"));
                    if let Some(exp) = session.expires_at {
                        println!("token expires: {}", exp.to_rfc3339());
                    }
                }
                None => println!("Not logged in."),
            }
            Ok(())
        }

        Commands::Open { path } => {
            let route = Route::parse(&path);
            match portal.navigate(&route) {
                GateDecision::Render => println!("{} renders.", route),
                GateDecision::RedirectToLogin { from } => {
                    println!("Log in first; you will be returned to {}.", from)
                }
                GateDecision::Redirect(home) => println!("Redirected to {}.", home),
            }
            Ok(())
        }

        Commands::Claims(command) => run_claims(portal, command).await,
    }
}

async fn run_claims(portal: &ClaimsPortal, command: ClaimsCommand) -> Result<()> {
    let role = portal.session().role();
    let currency = portal.currency();

    match command {
        ClaimsCommand::List { query, status } => {
            let mut view = DashboardView::new(role.unwrap_or(Role::Policyholder));
            let outcome = view.load(portal).await;
            finish(&outcome, view.notice.as_ref())?;

            view.set_query(query);
            view.set_status(status);
            if let Some(text) = view.empty_state() {
                println!("{}", text);
                return Ok(());
            }

            for claim in view.visible() {
                println!(
                    "{:<14} {:<14} {:>12}  {:<28} {}",
                    claim.id,
                    claim.status,
                    claim.amount_in(currency).to_string(),
                    claim.procedure_label(),
                    claim.risk_score.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
                );
            }

            let summary = view.summary(portal);
            println!(
                "\n{} claims, {} open, {} high risk, {} claimed",
                summary.total,
                summary.open(),
                summary.high_risk,
                summary.claimed
            );
            Ok(())
        }

        ClaimsCommand::Show { id } => {
            let mut view = ClaimView::new(role.unwrap_or(Role::Policyholder), id);
            let outcome = view.load(portal).await;
            finish(&outcome, view.notice.as_ref())?;
            if let Some(claim) = &view.claim {
                print_claim(claim, currency);
            }
            Ok(())
        }

        ClaimsCommand::Decide { id, decision, note } => {
            let mut view = ClaimView::new(Role::Insurer, id);
            view.note = note;
            let outcome = view.decide(portal, decision).await;
            finish(&outcome, view.notice.as_ref())?;
            if let Some(claim) = &view.claim {
                print_claim(claim, currency);
            }
            Ok(())
        }

        ClaimsCommand::Submit(args) => submit(portal, args).await,
    }
}

async fn submit(portal: &ClaimsPortal, args: SubmitArgs) -> Result<()> {
    let content = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut view = SubmitClaimView::new();
    view.form = ClaimForm {
        full_name: args.name,
        email: args.email,
        phone: args.phone,
        description: args.description,
        amount: args.amount,
    };
    view.attach(SupportingDocument::new(file_name, content));

    let outcome = view.submit(portal).await;
    if let Some(receipt) = &view.receipt {
        println!("Claim ID:   {}", receipt.claim_id);
        println!("Prediction: {}", receipt.prediction);
        if let Some(score) = receipt.risk_score {
            println!("Risk score: {} ({})", score, score.band());
        }
        if let Some(reason) = &receipt.reason {
            println!("Reason:     {}", reason);
        }
    }
    finish(&outcome, view.notice.as_ref())
}

fn print_claim(claim: &Claim, currency: Currency) {
    println!("Claim {}", claim.id);
    println!("  Procedure:  {}", claim.procedure_label());
    println!("  Amount:     {}", claim.amount_in(currency));
    if let Some(extracted) = claim.nlp_extracted_amount {
        println!("  Extracted:  {}", Money::new(extracted, currency));
    }
    println!("  Status:     {}", claim.status);
    println!("  Prediction: {}", claim.prediction());
    if let Some(score) = claim.risk_score {
        println!("  Risk:       {} ({})", score, score.band());
    }
    for reason in claim.reasons() {
        println!("  - {}", reason);
    }
    if let Some(eob) = &claim.eob {
        println!(
            "  EOB:        allowed {} / plan pays {} / member pays {}",
            Money::new(eob.allowed_amount, currency),
            Money::new(eob.plan_payable, currency),
            Money::new(eob.member_liability, currency),
        );
    }
}

/// Turns a view outcome into the process result
fn finish(outcome: &Outcome, notice: Option<&Notice>) -> Result<()> {
    if let Outcome::Navigate(route) = outcome {
        if *route == Route::Login {
            let text = notice
                .map(|n| n.text.clone())
                .unwrap_or_else(|| "Not logged in.".to_string());
            bail!("{} Run `claims-portal login` first.", text);
        }
        bail!("Not available for your account. Your home is {}.", route);
    }
    if let Some(notice) = notice.filter(|n| n.is_error()) {
        bail!("{}", notice);
    }
    if let Some(notice) = notice {
        println!("{}", notice);
    }
    Ok(())
}
