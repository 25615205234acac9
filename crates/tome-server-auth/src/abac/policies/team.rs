// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Team and post grants that combine org and team membership.
//!
//! Each rule is satisfied by org moderation of the resource's organization or
//! by the relevant team rank, whichever facts are present.

use crate::abac::{
	Action, CapabilityRegistry, Condition, OrgMembershipFact, ResourceType,
	TeamMembershipFact,
};
use crate::ordering::generate_lte;
use crate::types::TeamRole;

/// Adds the team, team-member and post-deletion grants.
pub fn grant_team_scoped(
	registry: &mut CapabilityRegistry,
	org_member: Option<&OrgMembershipFact>,
	team_member: Option<&TeamMembershipFact>,
) {
	let org_moderated = org_member
		.filter(|m| m.is_moderator())
		.map(|m| Condition::InOrg { org_id: m.org_id });
	let team_with = |min: TeamRole| {
		team_member
			.filter(|t| t.role >= min)
			.map(|t| Condition::InTeam { team_id: t.team_id })
	};

	allow_any(
		registry,
		[Action::Update],
		ResourceType::Team,
		[org_moderated.clone(), team_with(TeamRole::Moderator)],
	);

	allow_any(
		registry,
		[Action::Delete],
		ResourceType::Team,
		[org_moderated.clone(), team_with(TeamRole::Owner)],
	);

	allow_any(
		registry,
		[Action::Create],
		ResourceType::TeamMember,
		[org_moderated.clone(), team_with(TeamRole::Member)],
	);

	let team_outranked = team_member
		.filter(|t| t.role >= TeamRole::Moderator)
		.map(|t| Condition::InTeamWithTeamRoleIn {
			team_id: t.team_id,
			roles: generate_lte(t.role).to_vec(),
		});
	allow_any(
		registry,
		[Action::Update, Action::Delete],
		ResourceType::TeamMember,
		[org_moderated.clone(), team_outranked],
	);

	let maintainer = org_member.map(|m| Condition::MaintainedBy { member_id: m.id });
	allow_any(
		registry,
		[Action::Delete],
		ResourceType::Post,
		[org_moderated, maintainer, team_with(TeamRole::Moderator)],
	);
}

/// Adds a grant whose condition is the disjunction of the present alternatives.
/// Nothing is added when no alternative is present.
fn allow_any<const A: usize, const N: usize>(
	registry: &mut CapabilityRegistry,
	actions: [Action; A],
	resource_type: ResourceType,
	alternatives: [Option<Condition>; N],
) {
	let present: Vec<Condition> = alternatives.into_iter().flatten().collect();
	if let Some(condition) = Condition::any_of(present) {
		registry.allow(actions, [resource_type], Some(condition));
	}
}
