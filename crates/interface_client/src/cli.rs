//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use core_kernel::ClaimId;
use domain_claims::{Decision, StatusFilter};

/// Claims portal - log in, review, decide, and submit health-insurance claims
#[derive(Parser, Debug)]
#[command(name = "claims-portal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Claims service base URL (overrides CLAIMS_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Service adapter: http or mock (overrides CLAIMS_PROVIDER)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Session file (overrides CLAIMS_SESSION_PATH)
    #[arg(long, global = true)]
    pub session_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        /// Password; read from CLAIMS_PASSWORD when omitted
        #[arg(long, env = "CLAIMS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Check whether a portal path is reachable with the current session
    Open {
        /// Portal path, e.g. /insurer/dashboard
        path: String,
    },

    /// Work with claims
    #[command(subcommand)]
    Claims(ClaimsCommand),
}

#[derive(Subcommand, Debug)]
pub enum ClaimsCommand {
    /// List claims on your dashboard
    List {
        /// Match against claim id or procedure
        #[arg(short, long, default_value = "")]
        query: String,

        /// all, processing, approved, rejected, manual_review
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },

    /// Show one claim
    Show { id: ClaimId },

    /// Approve, reject, or send a claim to manual review (insurers)
    Decide {
        id: ClaimId,

        /// approve, reject, manual_review
        decision: Decision,

        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Submit a new claim (policyholders)
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Procedure or treatment description
    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub amount: String,

    /// Bill to attach (PDF, PNG, JPG)
    #[arg(long)]
    pub file: PathBuf,
}
