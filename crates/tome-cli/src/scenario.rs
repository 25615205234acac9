// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON inputs accepted by the subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tome_server_auth::{Action, ActorSnapshot, AdminControls, ResourceAttrs};
use tome_server_config::RegistrationConfig;

/// A single capability question: may `snapshot` perform `action` on `resource`?
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
	#[serde(default)]
	pub snapshot: ActorSnapshot,
	pub action: Action,
	pub resource: ResourceAttrs,
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read {}", path.display()))?;
	serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Fills in the admin controls from configuration when the snapshot carries none.
pub fn seed_admin_controls(snapshot: &mut ActorSnapshot, registration: &RegistrationConfig) {
	if snapshot.admin_controls.is_none() {
		snapshot.admin_controls = Some(AdminControls {
			allow_registration: registration.allow_registration,
			allow_waitlist: registration.allow_waitlist,
		});
	}
}
