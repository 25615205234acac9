// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role checking for guarded endpoints.
//!
//! A guard names the roles it accepts as a [`RoleSet`] and the request layer
//! resolves an [`ActorContext`]. [`check_roles`] answers whether any of the
//! actor's roles satisfies the set. Besides plain roles a set may contain
//! [`ConditionalRole`] markers that add a relational constraint, e.g. that the
//! actor must outrank the member they are acting on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::ordering::Ranked;
use crate::types::{InstanceRole, OrgMemberId, OrgRole, TeamRole};

/// Identity roles on a post. Satisfied only when the actor's org membership is
/// the post's creator or maintainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostRole {
	Creator,
	Maintainer,
}

/// Markers requesting a constraint beyond plain membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionalRole {
	/// Any org member qualifies when no team is relevant to the request.
	OrgMemberIfNoTeam,
	/// The actor's org role must be at least the subject's.
	OrgRoleGteSubject,
	/// The actor's team role must be at least the subject's.
	TeamRoleGteSubject,
}

/// Any role that can appear in a required-role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "role", rename_all = "snake_case")]
pub enum RoleType {
	Instance(InstanceRole),
	Org(OrgRole),
	Team(TeamRole),
	Post(PostRole),
	Conditional(ConditionalRole),
}

impl From<InstanceRole> for RoleType {
	fn from(role: InstanceRole) -> Self {
		RoleType::Instance(role)
	}
}

impl From<OrgRole> for RoleType {
	fn from(role: OrgRole) -> Self {
		RoleType::Org(role)
	}
}

impl From<TeamRole> for RoleType {
	fn from(role: TeamRole) -> Self {
		RoleType::Team(role)
	}
}

impl From<PostRole> for RoleType {
	fn from(role: PostRole) -> Self {
		RoleType::Post(role)
	}
}

impl From<ConditionalRole> for RoleType {
	fn from(role: ConditionalRole) -> Self {
		RoleType::Conditional(role)
	}
}

/// The roles a guard accepts.
pub type RoleSet = BTreeSet<RoleType>;

/// Flattens "org role at least `min`" into required roles.
pub fn org_roles_at_least(min: OrgRole) -> impl Iterator<Item = RoleType> {
	min.at_least().iter().copied().map(RoleType::from)
}

/// Flattens "team role at least `min`" into required roles.
pub fn team_roles_at_least(min: TeamRole) -> impl Iterator<Item = RoleType> {
	min.at_least().iter().copied().map(RoleType::from)
}

/// The actor's org membership: rank and identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMemberRef {
	pub id: OrgMemberId,
	pub role: OrgRole,
}

/// Facts about the acting principal and, where relevant, the target.
///
/// Built per check by the request layer. Every field is optional; a branch
/// that needs an absent field is simply not satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorContext {
	pub instance_role: Option<InstanceRole>,
	pub org_member: Option<OrgMemberRef>,
	pub team_role: Option<TeamRole>,
	/// Whether the request is scoped to a team.
	pub team_relevant: bool,
	pub subject_org_role: Option<OrgRole>,
	pub subject_team_role: Option<TeamRole>,
	pub post_creator: Option<OrgMemberId>,
	pub post_maintainer: Option<OrgMemberId>,
}

impl ActorContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_instance_role(mut self, role: InstanceRole) -> Self {
		self.instance_role = Some(role);
		self
	}

	pub fn with_org_member(mut self, id: OrgMemberId, role: OrgRole) -> Self {
		self.org_member = Some(OrgMemberRef { id, role });
		self
	}

	/// Sets the actor's team rank. Whether a team is relevant to the request
	/// is a separate fact, set with [`ActorContext::with_team_relevant`].
	pub fn with_team_role(mut self, role: TeamRole) -> Self {
		self.team_role = Some(role);
		self
	}

	pub fn with_team_relevant(mut self, relevant: bool) -> Self {
		self.team_relevant = relevant;
		self
	}

	pub fn with_subject_org_role(mut self, role: OrgRole) -> Self {
		self.subject_org_role = Some(role);
		self
	}

	pub fn with_subject_team_role(mut self, role: TeamRole) -> Self {
		self.subject_team_role = Some(role);
		self
	}

	pub fn with_post_creator(mut self, id: OrgMemberId) -> Self {
		self.post_creator = Some(id);
		self
	}

	pub fn with_post_maintainer(mut self, id: OrgMemberId) -> Self {
		self.post_maintainer = Some(id);
		self
	}
}

/// Returns true if any of the actor's roles satisfies `required`.
///
/// Never fails: an empty set or missing context denies.
#[instrument(level = "trace", skip_all, fields(required = required.len()), ret)]
pub fn check_roles(required: &RoleSet, ctx: &ActorContext) -> bool {
	if required.is_empty() {
		return false;
	}

	instance_branch(required, ctx)
		|| org_branch(required, ctx)
		|| team_branch(required, ctx)
		|| post_branch(required, ctx)
}

fn instance_branch(required: &RoleSet, ctx: &ActorContext) -> bool {
	ctx
		.instance_role
		.is_some_and(|role| required.contains(&RoleType::Instance(role)))
}

fn org_branch(required: &RoleSet, ctx: &ActorContext) -> bool {
	let Some(member) = ctx.org_member else {
		return false;
	};

	let member_if_no_team =
		required.contains(&RoleType::Conditional(ConditionalRole::OrgMemberIfNoTeam));
	let role_matches = required.contains(&RoleType::Org(member.role))
		|| (member_if_no_team && !ctx.team_relevant);

	role_matches
		&& (!required.contains(&RoleType::Conditional(ConditionalRole::OrgRoleGteSubject))
			|| ctx
				.subject_org_role
				.is_some_and(|subject| member.role >= subject))
}

fn team_branch(required: &RoleSet, ctx: &ActorContext) -> bool {
	let Some(role) = ctx.team_role else {
		return false;
	};

	required.contains(&RoleType::Team(role))
		&& (!required.contains(&RoleType::Conditional(ConditionalRole::TeamRoleGteSubject))
			|| ctx.subject_team_role.is_some_and(|subject| role >= subject))
}

fn post_branch(required: &RoleSet, ctx: &ActorContext) -> bool {
	let Some(member) = ctx.org_member else {
		return false;
	};

	let is_creator = required.contains(&RoleType::Post(PostRole::Creator))
		&& ctx.post_creator.is_some_and(|id| id == member.id);
	let is_maintainer = required.contains(&RoleType::Post(PostRole::Maintainer))
		&& ctx.post_maintainer.is_some_and(|id| id == member.id);

	is_creator || is_maintainer
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn roles<I, R>(items: I) -> RoleSet
	where
		I: IntoIterator<Item = R>,
		R: Into<RoleType>,
	{
		items.into_iter().map(Into::into).collect()
	}

	fn org_ctx(role: OrgRole) -> ActorContext {
		ActorContext::new().with_org_member(OrgMemberId::generate(), role)
	}

	mod empty_set {
		use super::*;

		#[test]
		fn denies_fully_privileged_actor() {
			let ctx = org_ctx(OrgRole::Owner)
				.with_instance_role(InstanceRole::Admin)
				.with_team_role(TeamRole::Owner);
			assert!(!check_roles(&RoleSet::new(), &ctx));
		}

		#[test]
		fn denies_empty_context() {
			assert!(!check_roles(&RoleSet::new(), &ActorContext::new()));
		}
	}

	mod instance_branch {
		use super::*;

		#[test]
		fn admin_matches_admin() {
			let ctx = ActorContext::new().with_instance_role(InstanceRole::Admin);
			assert!(check_roles(&roles([InstanceRole::Admin]), &ctx));
		}

		#[test]
		fn user_does_not_match_admin() {
			let ctx = ActorContext::new().with_instance_role(InstanceRole::User);
			assert!(!check_roles(&roles([InstanceRole::Admin]), &ctx));
		}
	}

	mod org_branch {
		use super::*;

		#[test]
		fn exact_role_required() {
			assert!(!check_roles(&roles([OrgRole::Owner]), &org_ctx(OrgRole::Moderator)));
			assert!(check_roles(&roles([OrgRole::Owner]), &org_ctx(OrgRole::Owner)));
		}

		#[test]
		fn at_least_moderator_group() {
			let required: RoleSet = org_roles_at_least(OrgRole::Moderator).collect();
			assert!(check_roles(&required, &org_ctx(OrgRole::Moderator)));
			assert!(check_roles(&required, &org_ctx(OrgRole::Owner)));
			assert!(!check_roles(&required, &org_ctx(OrgRole::Member)));
		}

		#[test]
		fn gte_subject_rejects_higher_subject() {
			let mut required: RoleSet = org_roles_at_least(OrgRole::Moderator).collect();
			required.insert(ConditionalRole::OrgRoleGteSubject.into());

			let ctx = org_ctx(OrgRole::Moderator).with_subject_org_role(OrgRole::Owner);
			assert!(!check_roles(&required, &ctx));

			let ctx = org_ctx(OrgRole::Moderator).with_subject_org_role(OrgRole::Moderator);
			assert!(check_roles(&required, &ctx));
		}

		#[test]
		fn gte_subject_fails_closed_without_subject() {
			let mut required: RoleSet = org_roles_at_least(OrgRole::Moderator).collect();
			required.insert(ConditionalRole::OrgRoleGteSubject.into());
			assert!(!check_roles(&required, &org_ctx(OrgRole::Owner)));
		}

		#[test]
		fn member_if_no_team_without_team() {
			let required = roles([ConditionalRole::OrgMemberIfNoTeam]);
			assert!(check_roles(&required, &org_ctx(OrgRole::Member)));
		}

		#[test]
		fn member_if_no_team_with_team_relevant() {
			let required = roles([ConditionalRole::OrgMemberIfNoTeam]);
			let ctx = org_ctx(OrgRole::Member).with_team_relevant(true);
			assert!(!check_roles(&required, &ctx));
		}

		#[test]
		fn builder_and_json_agree_on_team_relevance() {
			let id = OrgMemberId::generate();
			let built = ActorContext::new()
				.with_org_member(id, OrgRole::Member)
				.with_team_role(TeamRole::Member);
			let parsed: ActorContext = serde_json::from_value(serde_json::json!({
				"org_member": { "id": id, "role": "member" },
				"team_role": "member",
			}))
			.unwrap();
			assert_eq!(built, parsed);

			let required = roles([ConditionalRole::OrgMemberIfNoTeam]);
			assert!(check_roles(&required, &built));
			assert!(!check_roles(&required, &built.with_team_relevant(true)));
		}

		#[test]
		fn member_if_no_team_needs_membership() {
			let required = roles([ConditionalRole::OrgMemberIfNoTeam]);
			assert!(!check_roles(&required, &ActorContext::new()));
		}
	}

	mod team_branch {
		use super::*;

		#[test]
		fn team_role_matches() {
			let ctx = ActorContext::new().with_team_role(TeamRole::Moderator);
			assert!(check_roles(&roles([TeamRole::Moderator]), &ctx));
			assert!(!check_roles(&roles([TeamRole::Owner]), &ctx));
		}

		#[test]
		fn gte_subject_compares_team_ranks() {
			let mut required: RoleSet = team_roles_at_least(TeamRole::Moderator).collect();
			required.insert(ConditionalRole::TeamRoleGteSubject.into());

			let ctx = ActorContext::new()
				.with_team_role(TeamRole::Moderator)
				.with_subject_team_role(TeamRole::Member);
			assert!(check_roles(&required, &ctx));

			let ctx = ActorContext::new()
				.with_team_role(TeamRole::Moderator)
				.with_subject_team_role(TeamRole::Owner);
			assert!(!check_roles(&required, &ctx));

			let ctx = ActorContext::new().with_team_role(TeamRole::Owner);
			assert!(!check_roles(&required, &ctx));
		}

		#[test]
		fn org_gte_marker_does_not_gate_team_branch() {
			let required = roles([
				RoleType::Team(TeamRole::Member),
				ConditionalRole::OrgRoleGteSubject.into(),
			]);
			let ctx = ActorContext::new().with_team_role(TeamRole::Member);
			assert!(check_roles(&required, &ctx));
		}
	}

	mod post_branch {
		use super::*;

		#[test]
		fn creator_identity_matches() {
			let me = OrgMemberId::generate();
			let ctx = ActorContext::new()
				.with_org_member(me, OrgRole::Member)
				.with_post_creator(me);
			assert!(check_roles(&roles([PostRole::Creator]), &ctx));
		}

		#[test]
		fn creator_identity_mismatch() {
			let ctx = ActorContext::new()
				.with_org_member(OrgMemberId::generate(), OrgRole::Member)
				.with_post_creator(OrgMemberId::generate());
			assert!(!check_roles(&roles([PostRole::Creator]), &ctx));
		}

		#[test]
		fn maintainer_requires_maintainer_role_in_set() {
			let me = OrgMemberId::generate();
			let ctx = ActorContext::new()
				.with_org_member(me, OrgRole::Member)
				.with_post_maintainer(me);
			assert!(check_roles(&roles([PostRole::Maintainer]), &ctx));
			assert!(!check_roles(&roles([PostRole::Creator]), &ctx));
		}

		#[test]
		fn identity_without_membership_denies() {
			let id = OrgMemberId::generate();
			let ctx = ActorContext::new().with_post_creator(id);
			assert!(!check_roles(&roles([PostRole::Creator]), &ctx));
		}
	}

	#[test]
	fn role_type_serializes_tagged() {
		let json = serde_json::to_string(&RoleType::Org(OrgRole::Owner)).unwrap();
		assert_eq!(json, r#"{"scope":"org","role":"owner"}"#);
	}

	fn arb_role_type() -> impl Strategy<Value = RoleType> {
		prop_oneof![
			Just(RoleType::Instance(InstanceRole::User)),
			Just(RoleType::Instance(InstanceRole::Admin)),
			Just(RoleType::Org(OrgRole::Member)),
			Just(RoleType::Org(OrgRole::Moderator)),
			Just(RoleType::Org(OrgRole::Owner)),
			Just(RoleType::Team(TeamRole::Member)),
			Just(RoleType::Team(TeamRole::Moderator)),
			Just(RoleType::Team(TeamRole::Owner)),
			Just(RoleType::Post(PostRole::Creator)),
			Just(RoleType::Post(PostRole::Maintainer)),
			Just(RoleType::Conditional(ConditionalRole::OrgMemberIfNoTeam)),
			Just(RoleType::Conditional(ConditionalRole::OrgRoleGteSubject)),
			Just(RoleType::Conditional(ConditionalRole::TeamRoleGteSubject)),
		]
	}

	proptest! {
			#[test]
			fn empty_context_is_always_denied(
					required in proptest::collection::btree_set(arb_role_type(), 0..8),
			) {
					prop_assert!(!check_roles(&required, &ActorContext::new()));
			}
	}
}
