// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for capability evaluation.
//!
//! This module defines the data the capability registry works with:
//!
//! - [`ActorSnapshot`]: The facts resolved for the acting principal (admin
//!   controls, account, org membership, team membership)
//! - [`ResourceAttrs`]: Describes one candidate resource instance
//! - [`Action`] and [`ResourceType`]: What is being done, and to what kind of thing
//!
//! # Design Principles
//!
//! 1. **No database access**: every fact is resolved before the registry is built
//! 2. **Explicit attributes**: every relevant fact is an explicit field, not derived
//! 3. **Serializable**: all types can be logged/audited as JSON

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{
	InstanceRole, OrgId, OrgMemberId, OrgRole, PostKind, TeamId, TeamRole, UserId,
};

// =============================================================================
// Actor facts
// =============================================================================

/// Instance-wide switches controlled by administrators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminControls {
	pub allow_registration: bool,
	pub allow_waitlist: bool,
}

/// The authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFact {
	pub user_id: UserId,
	pub role: InstanceRole,
}

impl UserFact {
	pub fn is_admin(&self) -> bool {
		self.role == InstanceRole::Admin
	}
}

/// The actor's membership in the organization the request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMembershipFact {
	pub id: OrgMemberId,
	pub org_id: OrgId,
	pub user_id: UserId,
	pub role: OrgRole,
}

impl OrgMembershipFact {
	/// Moderators and owners administer their organization.
	pub fn is_moderator(&self) -> bool {
		self.role >= OrgRole::Moderator
	}
}

/// The actor's membership in the team the request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembershipFact {
	pub team_id: TeamId,
	pub org_id: OrgId,
	pub role: TeamRole,
}

/// Everything known about the actor for one request. Any fact may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorSnapshot {
	pub admin_controls: Option<AdminControls>,
	pub user: Option<UserFact>,
	pub org_member: Option<OrgMembershipFact>,
	pub team_member: Option<TeamMembershipFact>,
}

impl ActorSnapshot {
	/// A snapshot for an unauthenticated request.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// A snapshot for an authenticated account with no memberships.
	pub fn user(user_id: UserId, role: InstanceRole) -> Self {
		Self {
			user: Some(UserFact { user_id, role }),
			..Self::default()
		}
	}

	/// Builder: set admin controls.
	pub fn with_admin_controls(mut self, controls: AdminControls) -> Self {
		self.admin_controls = Some(controls);
		self
	}

	/// Builder: set the org membership.
	pub fn with_org_member(mut self, member: OrgMembershipFact) -> Self {
		self.org_member = Some(member);
		self
	}

	/// Builder: set the team membership.
	pub fn with_team_member(mut self, member: TeamMembershipFact) -> Self {
		self.team_member = Some(member);
		self
	}

	/// The acting user, if authenticated.
	pub fn user_id(&self) -> Option<UserId> {
		self.user.map(|u| u.user_id)
	}
}

// =============================================================================
// Resources
// =============================================================================

/// Types of resources guarded by the capability registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
	AdminControls,
	UserAccount,
	WaitlistMember,
	DeviceCredential,
	PendingInvites,
	Organization,
	OrgMember,
	OrgMemberInvite,
	Team,
	TeamMember,
	Post,
}

impl fmt::Display for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			ResourceType::AdminControls => "admin_controls",
			ResourceType::UserAccount => "user_account",
			ResourceType::WaitlistMember => "waitlist_member",
			ResourceType::DeviceCredential => "device_credential",
			ResourceType::PendingInvites => "pending_invites",
			ResourceType::Organization => "organization",
			ResourceType::OrgMember => "org_member",
			ResourceType::OrgMemberInvite => "org_member_invite",
			ResourceType::Team => "team",
			ResourceType::TeamMember => "team_member",
			ResourceType::Post => "post",
		};
		write!(f, "{s}")
	}
}

/// Actions that can be performed on resources.
///
/// [`Action::Manage`] is an alias; see
/// [`CapabilityRegistry::with_default_aliases`](super::CapabilityRegistry::with_default_aliases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	Create,
	Read,
	Update,
	Delete,
	Manage,
}

impl Action {
	/// The concrete CRUD actions.
	pub const CRUD: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Action::Create => "create",
			Action::Read => "read",
			Action::Update => "update",
			Action::Delete => "delete",
			Action::Manage => "manage",
		};
		write!(f, "{s}")
	}
}

/// Attributes describing one candidate resource instance.
///
/// Fields a resource type does not have stay `None`. For `create` checks the
/// attributes describe the record about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAttrs {
	pub resource_type: ResourceType,
	/// Account owning the record (device credentials, the account itself, pending invites).
	#[serde(default)]
	pub owner_user_id: Option<UserId>,
	#[serde(default)]
	pub org_id: Option<OrgId>,
	#[serde(default)]
	pub team_id: Option<TeamId>,
	/// Org rank of the member or invite being acted on.
	#[serde(default)]
	pub subject_org_role: Option<OrgRole>,
	/// Team rank of the team member being acted on.
	#[serde(default)]
	pub subject_team_role: Option<TeamRole>,
	#[serde(default)]
	pub post_kind: Option<PostKind>,
	#[serde(default)]
	pub maintainer_id: Option<OrgMemberId>,
}

impl ResourceAttrs {
	/// Bare attributes of the given type.
	pub fn of_type(resource_type: ResourceType) -> Self {
		Self {
			resource_type,
			owner_user_id: None,
			org_id: None,
			team_id: None,
			subject_org_role: None,
			subject_team_role: None,
			post_kind: None,
			maintainer_id: None,
		}
	}

	pub fn admin_controls() -> Self {
		Self::of_type(ResourceType::AdminControls)
	}

	pub fn user_account(user_id: UserId) -> Self {
		Self::of_type(ResourceType::UserAccount).with_owner(user_id)
	}

	pub fn waitlist_member() -> Self {
		Self::of_type(ResourceType::WaitlistMember)
	}

	pub fn device_credential(owner_user_id: UserId) -> Self {
		Self::of_type(ResourceType::DeviceCredential).with_owner(owner_user_id)
	}

	pub fn pending_invites(user_id: UserId) -> Self {
		Self::of_type(ResourceType::PendingInvites).with_owner(user_id)
	}

	pub fn organization(org_id: OrgId) -> Self {
		Self::of_type(ResourceType::Organization).with_org(org_id)
	}

	pub fn org_member(org_id: OrgId, role: OrgRole) -> Self {
		let mut attrs = Self::of_type(ResourceType::OrgMember).with_org(org_id);
		attrs.subject_org_role = Some(role);
		attrs
	}

	/// An invite into `org_id` granting `role` on acceptance.
	pub fn org_member_invite(org_id: OrgId, role: OrgRole) -> Self {
		let mut attrs = Self::of_type(ResourceType::OrgMemberInvite).with_org(org_id);
		attrs.subject_org_role = Some(role);
		attrs
	}

	pub fn team(team_id: TeamId, org_id: OrgId) -> Self {
		Self::of_type(ResourceType::Team)
			.with_org(org_id)
			.with_team(team_id)
	}

	pub fn team_member(team_id: TeamId, org_id: OrgId, role: TeamRole) -> Self {
		let mut attrs = Self::team(team_id, org_id);
		attrs.resource_type = ResourceType::TeamMember;
		attrs.subject_team_role = Some(role);
		attrs
	}

	pub fn post(kind: PostKind, org_id: OrgId) -> Self {
		let mut attrs = Self::of_type(ResourceType::Post).with_org(org_id);
		attrs.post_kind = Some(kind);
		attrs
	}

	/// Builder: set owner_user_id.
	pub fn with_owner(mut self, user_id: UserId) -> Self {
		self.owner_user_id = Some(user_id);
		self
	}

	/// Builder: set org_id.
	pub fn with_org(mut self, org_id: OrgId) -> Self {
		self.org_id = Some(org_id);
		self
	}

	/// Builder: set team_id.
	pub fn with_team(mut self, team_id: TeamId) -> Self {
		self.team_id = Some(team_id);
		self
	}

	/// Builder: set the post maintainer.
	pub fn with_maintainer(mut self, member_id: OrgMemberId) -> Self {
		self.maintainer_id = Some(member_id);
		self
	}
}
