// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capability registry construction.
//!
//! [`define_abilities`] is the single entry point that turns an
//! [`ActorSnapshot`] into a locked [`CapabilityRegistry`]. It is a pure
//! function: the request layer resolves every fact beforehand, builds the
//! registry once per request and may query it any number of times.
//!
//! Grants compose additively; there is no revocation, so the order in which the
//! policy modules contribute is irrelevant to the verdicts.

use tracing::{debug, instrument};

use super::policies::{account, org, team};
use super::registry::CapabilityRegistry;
use super::types::ActorSnapshot;
use crate::ordering::generate_lte_team_roles;
use crate::types::TeamRole;

/// Builds the locked capability registry for `snapshot`.
#[instrument(
    level = "debug",
    skip(snapshot),
    fields(
        user_id = ?snapshot.user_id(),
        org_role = ?snapshot.org_member.map(|m| m.role),
        team_role = ?snapshot.team_member.map(|t| t.role),
    )
)]
pub fn define_abilities(snapshot: &ActorSnapshot) -> CapabilityRegistry {
	let mut registry = CapabilityRegistry::with_default_aliases();

	if let Some(controls) = &snapshot.admin_controls {
		account::grant_registration(&mut registry, controls);
	}

	if let Some(user) = &snapshot.user {
		account::grant_user(&mut registry, user);
	}

	if let Some(member) = &snapshot.org_member {
		org::grant_org_member(&mut registry, member);
	}

	team::grant_team_scoped(
		&mut registry,
		snapshot.org_member.as_ref(),
		snapshot.team_member.as_ref(),
	);

	registry.lock();
	debug!(grants = registry.grants().len(), "capability registry built");
	registry
}

/// Team roles the actor may assign to others. Empty without an org membership.
pub fn assignable_team_roles(snapshot: &ActorSnapshot) -> &'static [TeamRole] {
	match snapshot.org_member {
		Some(member) => generate_lte_team_roles(member.role, snapshot.team_member.map(|t| t.role)),
		None => &[],
	}
}
