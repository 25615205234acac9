// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-grant predicates over a candidate resource.
//!
//! Conditions are plain data so a built registry can be inspected, compared and
//! serialized. Every variant fails closed when the resource lacks the field it
//! tests.

use serde::{Deserialize, Serialize};

use super::types::ResourceAttrs;
use crate::types::{OrgId, OrgMemberId, OrgRole, TeamId, TeamRole, UserId};

/// A predicate a resource must satisfy for a grant to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
	/// The resource is owned by this account.
	OwnedBy { user_id: UserId },
	/// The resource belongs to this organization.
	InOrg { org_id: OrgId },
	/// The resource belongs to this organization and its subject org rank is one of `roles`.
	InOrgWithOrgRoleIn { org_id: OrgId, roles: Vec<OrgRole> },
	/// The resource belongs to this team.
	InTeam { team_id: TeamId },
	/// The resource belongs to this team and its subject team rank is one of `roles`.
	InTeamWithTeamRoleIn { team_id: TeamId, roles: Vec<TeamRole> },
	/// The post is maintained by this org member.
	MaintainedBy { member_id: OrgMemberId },
	/// At least one of the inner conditions holds. Empty never holds.
	Any { conditions: Vec<Condition> },
}

impl Condition {
	/// Evaluates the predicate against `resource`.
	pub fn matches(&self, resource: &ResourceAttrs) -> bool {
		match self {
			Condition::OwnedBy { user_id } => resource.owner_user_id == Some(*user_id),
			Condition::InOrg { org_id } => resource.org_id == Some(*org_id),
			Condition::InOrgWithOrgRoleIn { org_id, roles } => {
				resource.org_id == Some(*org_id)
					&& resource
						.subject_org_role
						.is_some_and(|role| roles.contains(&role))
			}
			Condition::InTeam { team_id } => resource.team_id == Some(*team_id),
			Condition::InTeamWithTeamRoleIn { team_id, roles } => {
				resource.team_id == Some(*team_id)
					&& resource
						.subject_team_role
						.is_some_and(|role| roles.contains(&role))
			}
			Condition::MaintainedBy { member_id } => resource.maintainer_id == Some(*member_id),
			Condition::Any { conditions } => conditions.iter().any(|c| c.matches(resource)),
		}
	}

	/// Collapses an alternative list: `None` when empty, the sole element when
	/// there is one, otherwise [`Condition::Any`].
	pub fn any_of(mut conditions: Vec<Condition>) -> Option<Condition> {
		match conditions.len() {
			0 => None,
			1 => conditions.pop(),
			_ => Some(Condition::Any { conditions }),
		}
	}
}
