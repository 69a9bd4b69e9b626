//! # HRM Authorization CLI
//!
//! Inspects permission decisions for a role or a persisted session.
//!
//! ## Commands
//!
//! - `check <resource> <action> [scope]` - Evaluate one request (exit 1 on deny)
//! - `permissions` - List the grants of a role
//! - `whoami` - Show the session actor and the named checks
//!
//! ## Configuration
//!
//! - `HRM_AUTHZ_CONFIG` - TOML config file (see `hrm_authz::config`)
//! - `RUST_LOG` - Log filter (default: warn, debug with `--verbose`)

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use hrm_authz::{AuthzConfig, Authorizer, Scope};
use hrm_core::{role_display_name, Actor, ActorProvider, Role, SessionStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// HRM authorization inspector
#[derive(Parser)]
#[command(name = "hrm-authz")]
#[command(about = "Inspect HRM role-based permission decisions")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "HRM_AUTHZ_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a single permission check
    Check {
        /// Resource identifier (employees, absences, ...)
        resource: String,

        /// Action (create, read, update, delete, approve)
        action: String,

        /// Scope (own, department, company)
        #[arg(default_value = "own")]
        scope: String,

        #[command(flatten)]
        actor: ActorArgs,
    },

    /// List the permissions granted to an actor's role
    Permissions {
        #[command(flatten)]
        actor: ActorArgs,
    },

    /// Show the session actor and the named checks
    Whoami {
        /// Persisted session record (JSON)
        #[arg(long)]
        session: PathBuf,
    },
}

#[derive(Args)]
struct ActorArgs {
    /// Evaluate as an anonymous actor with this role
    #[arg(long, conflicts_with = "session")]
    role: Option<Role>,

    /// Evaluate as the actor stored in this session record (JSON)
    #[arg(long)]
    session: Option<PathBuf>,
}

impl ActorArgs {
    fn provider(&self) -> Result<Arc<dyn ActorProvider>> {
        match (&self.role, &self.session) {
            (Some(role), None) => Ok(Arc::new(Some(Actor::new("cli", *role)))),
            (None, Some(path)) => Ok(Arc::new(load_session(path)?)),
            _ => bail!("either --role or --session is required"),
        }
    }
}

fn load_session(path: &Path) -> Result<SessionStore> {
    SessionStore::load_file(path)
        .with_context(|| format!("failed to load session {}", path.display()))
}

fn build_authorizer(config: &AuthzConfig, provider: Arc<dyn ActorProvider>) -> Result<Authorizer> {
    let table = config
        .permission_table()
        .context("failed to load permission table")?;
    Ok(Authorizer::new(config.engine_config(), table, provider))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => AuthzConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AuthzConfig::default(),
    };
    debug!("Using configuration: {:?}", config);

    match cli.command {
        Command::Check {
            resource,
            action,
            scope,
            actor,
        } => {
            let authz = build_authorizer(&config, actor.provider()?)?;
            let decision = authz.decide_str(&resource, &action, &scope);

            println!(
                "{} {}:{}@{}",
                if decision.allowed { "ALLOW" } else { "DENY" },
                resource,
                action,
                scope
            );
            println!("  {}", decision.reason);

            Ok(if decision.allowed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }

        Command::Permissions { actor } => {
            let authz = build_authorizer(&config, actor.provider()?)?;
            let Some(current) = authz.current_actor() else {
                bail!("no readable actor in session");
            };

            println!("{} ({})", current.role.display_name(), current.role);
            for permission in authz.current_permissions() {
                println!("  {}", permission);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Whoami { session } => {
            let store = Arc::new(load_session(&session)?);
            let authz = build_authorizer(&config, store.clone())?;

            let Some(current) = authz.current_actor() else {
                let raw_role = store
                    .raw_record()
                    .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
                    .and_then(|value| value.get("role").and_then(|r| r.as_str()).map(str::to_owned))
                    .unwrap_or_default();
                println!("unauthenticated (stored role: {})", role_display_name(&raw_role));
                return Ok(ExitCode::from(1));
            };

            println!("id:            {}", current.id);
            if !current.name.is_empty() {
                println!("name:          {}", current.name);
            }
            println!("role:          {}", current.role.display_name());
            if let Some(department) = &current.department_name {
                println!("department:    {}", department);
            }
            println!("authenticated: {}", store.is_authenticated());
            println!();
            println!("can_manage_users:               {}", authz.can_manage_users());
            println!("can_approve_leave:              {}", authz.can_approve_leave());
            println!("can_view_company_analytics:     {}", authz.can_view_company_analytics());
            println!(
                "can_create_announcements:       department={} company={}",
                authz.can_create_announcements(Scope::Department),
                authz.can_create_announcements(Scope::Company)
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
