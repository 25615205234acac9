// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tome authorization CLI.
//!
//! Evaluates role guards and capability queries against JSON fact files, using
//! the same engine the server runs per request.

mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tome_server_auth::{
	audit_can, check_roles, define_abilities, generate_lte_team_roles, ActorContext, ActorSnapshot,
	OrgRole, RoleSet, TeamRole,
};
use tome_server_config::{load_config, load_config_with_file, LogFormat, LoggingConfig};

use crate::scenario::{read_json, seed_admin_controls, Scenario};

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OrgRoleArg {
	Member,
	Moderator,
	Owner,
}

impl From<OrgRoleArg> for OrgRole {
	fn from(v: OrgRoleArg) -> Self {
		match v {
			OrgRoleArg::Member => OrgRole::Member,
			OrgRoleArg::Moderator => OrgRole::Moderator,
			OrgRoleArg::Owner => OrgRole::Owner,
		}
	}
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum TeamRoleArg {
	Member,
	Moderator,
	Owner,
}

impl From<TeamRoleArg> for TeamRole {
	fn from(v: TeamRoleArg) -> Self {
		match v {
			TeamRoleArg::Member => TeamRole::Member,
			TeamRoleArg::Moderator => TeamRole::Moderator,
			TeamRoleArg::Owner => TeamRole::Owner,
		}
	}
}

#[derive(Parser, Debug)]
#[command(name = "tome-authz", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long, env = "TOME_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Decide whether an actor may perform an action on a resource
	Check {
		/// JSON file with `snapshot`, `action` and `resource`
		scenario: PathBuf,

		/// Also print the audit record of the decision
		#[arg(long)]
		audit: bool,
	},
	/// Print every grant the actor holds
	Rules {
		/// JSON file with the actor snapshot
		snapshot: PathBuf,
	},
	/// Check an actor context against a set of required roles
	Roles {
		/// JSON array of required roles
		required: PathBuf,
		/// JSON file with the actor context
		context: PathBuf,
	},
	/// List the team roles an actor may assign
	Assignable {
		#[arg(long, value_enum)]
		org_role: OrgRoleArg,

		#[arg(long, value_enum)]
		team_role: Option<TeamRoleArg>,
	},
}

fn main() -> Result<ExitCode> {
	let args = Args::parse();

	let mut config = match &args.config {
		Some(path) => load_config_with_file(path),
		None => load_config(),
	}
	.context("failed to load configuration")?;

	if let Some(level) = &args.log_level {
		config.logging.level = level.clone();
	}
	if args.json_logs {
		config.logging.format = LogFormat::Json;
	}

	init_tracing(&config.logging);
	debug!(?config, "configuration resolved");

	match args.command {
		Command::Check { scenario, audit } => {
			let Scenario {
				mut snapshot,
				action,
				resource,
			} = read_json(&scenario)?;
			seed_admin_controls(&mut snapshot, &config.registration);

			let registry = define_abilities(&snapshot);
			let (allowed, entry) = audit_can(&registry, snapshot.user_id(), action, &resource);
			println!("{}", if allowed { "allowed" } else { "denied" });
			if audit {
				println!(
					"{}",
					serde_json::to_string_pretty(&entry).context("failed to encode audit entry")?
				);
			}
			Ok(verdict(allowed))
		}
		Command::Rules { snapshot } => {
			let mut snapshot: ActorSnapshot = read_json(&snapshot)?;
			seed_admin_controls(&mut snapshot, &config.registration);

			let registry = define_abilities(&snapshot);
			info!(grants = registry.grants().len(), "listing grants");
			println!(
				"{}",
				serde_json::to_string_pretty(registry.grants()).context("failed to encode grants")?
			);
			Ok(ExitCode::SUCCESS)
		}
		Command::Roles { required, context } => {
			let required: RoleSet = read_json(&required)?;
			let context: ActorContext = read_json(&context)?;
			let allowed = check_roles(&required, &context);
			println!("{}", if allowed { "allowed" } else { "denied" });
			Ok(verdict(allowed))
		}
		Command::Assignable {
			org_role,
			team_role,
		} => {
			let roles = generate_lte_team_roles(org_role.into(), team_role.map(TeamRole::from));
			println!(
				"{}",
				serde_json::to_string(roles).context("failed to encode team roles")?
			);
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn verdict(allowed: bool) -> ExitCode {
	if allowed {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}
