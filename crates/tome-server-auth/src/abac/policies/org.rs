// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization access policies.

use crate::abac::{Action, CapabilityRegistry, Condition, OrgMembershipFact, ResourceType};
use crate::ordering::generate_lte;
use crate::types::OrgRole;

/// Grants an org member rights inside their own organization, widened by rank.
pub fn grant_org_member(registry: &mut CapabilityRegistry, member: &OrgMembershipFact) {
	let org_id = member.org_id;
	let in_org = Some(Condition::InOrg { org_id });
	let outranked = Some(Condition::InOrgWithOrgRoleIn {
		org_id,
		roles: generate_lte(member.role).to_vec(),
	});

	registry
		.allow([Action::Read], [ResourceType::Organization], in_org.clone())
		.allow([Action::Read], [ResourceType::OrgMember], in_org.clone())
		.allow([Action::Create], [ResourceType::OrgMemberInvite], outranked.clone())
		.allow([Action::Read], [ResourceType::OrgMemberInvite], in_org.clone())
		.allow(
			[Action::Create, Action::Read],
			[ResourceType::Team],
			in_org.clone(),
		)
		.allow([Action::Read], [ResourceType::TeamMember], in_org.clone())
		.allow(
			[Action::Create, Action::Read, Action::Update],
			[ResourceType::Post],
			in_org.clone(),
		);

	if member.is_moderator() {
		// Invite updates carry no rank bound, unlike invite creation.
		registry
			.allow([Action::Update], [ResourceType::Organization], in_org.clone())
			.allow(
				[Action::Update, Action::Delete],
				[ResourceType::OrgMember],
				outranked,
			)
			.allow(
				[Action::Update, Action::Delete],
				[ResourceType::OrgMemberInvite],
				in_org.clone(),
			);
	}

	if member.role == OrgRole::Owner {
		registry.allow([Action::Delete], [ResourceType::Organization], in_org);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::abac::ResourceAttrs;
	use crate::types::{OrgId, OrgMemberId, PostKind, TeamId, TeamRole, UserId};

	fn member(org_id: OrgId, role: OrgRole) -> OrgMembershipFact {
		OrgMembershipFact {
			id: OrgMemberId::generate(),
			org_id,
			user_id: UserId::generate(),
			role,
		}
	}

	fn registry_for(member: OrgMembershipFact) -> CapabilityRegistry {
		let mut registry = CapabilityRegistry::with_default_aliases();
		grant_org_member(&mut registry, &member);
		registry
	}

	mod member_rights {
		use super::*;

		#[test]
		fn reads_own_org_only() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Member));
			assert!(registry.can(Action::Read, &ResourceAttrs::organization(org_id)));
			assert!(!registry.can(
				Action::Read,
				&ResourceAttrs::organization(OrgId::generate())
			));
			assert!(!registry.can(Action::Update, &ResourceAttrs::organization(org_id)));
		}

		#[test]
		fn works_with_posts_in_own_org() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Member));
			for kind in [PostKind::Doc, PostKind::Qna] {
				let post = ResourceAttrs::post(kind, org_id);
				assert!(registry.can(Action::Create, &post));
				assert!(registry.can(Action::Read, &post));
				assert!(registry.can(Action::Update, &post));
				assert!(!registry.can(Action::Delete, &post));
			}
		}

		#[test]
		fn creates_teams_but_cannot_update_them() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Member));
			let team = ResourceAttrs::team(TeamId::generate(), org_id);
			assert!(registry.can(Action::Create, &team));
			assert!(registry.can(Action::Read, &team));
			assert!(!registry.can(Action::Update, &team));
		}

		#[test]
		fn invites_only_at_or_below_own_rank() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Member));
			assert!(registry.can(
				Action::Create,
				&ResourceAttrs::org_member_invite(org_id, OrgRole::Member)
			));
			assert!(!registry.can(
				Action::Create,
				&ResourceAttrs::org_member_invite(org_id, OrgRole::Moderator)
			));
			assert!(registry.can(
				Action::Read,
				&ResourceAttrs::org_member_invite(org_id, OrgRole::Owner)
			));
		}

		#[test]
		fn reads_team_members_in_own_org_only() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Member));
			let own = ResourceAttrs::team_member(TeamId::generate(), org_id, TeamRole::Owner);
			let foreign =
				ResourceAttrs::team_member(TeamId::generate(), OrgId::generate(), TeamRole::Member);
			assert!(registry.can(Action::Read, &own));
			assert!(!registry.can(Action::Read, &foreign));
			assert!(!registry.can(Action::Update, &own));
		}

		#[test]
		fn cannot_manage_members() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Member));
			let target = ResourceAttrs::org_member(org_id, OrgRole::Member);
			assert!(registry.can(Action::Read, &target));
			assert!(!registry.can(Action::Update, &target));
			assert!(!registry.can(Action::Delete, &target));
		}
	}

	mod moderator_rights {
		use super::*;

		#[test]
		fn updates_but_cannot_delete_org() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Moderator));
			let org = ResourceAttrs::organization(org_id);
			assert!(registry.can(Action::Update, &org));
			assert!(!registry.can(Action::Delete, &org));
		}

		#[test]
		fn manages_members_at_or_below_own_rank() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Moderator));

			let peer = ResourceAttrs::org_member(org_id, OrgRole::Moderator);
			let owner = ResourceAttrs::org_member(org_id, OrgRole::Owner);
			assert!(registry.can(Action::Update, &peer));
			assert!(registry.can(Action::Delete, &peer));
			assert!(!registry.can(Action::Update, &owner));
			assert!(!registry.can(Action::Delete, &owner));
		}

		#[test]
		fn updates_any_invite_in_org() {
			let org_id = OrgId::generate();
			let registry = registry_for(member(org_id, OrgRole::Moderator));
			let owner_invite = ResourceAttrs::org_member_invite(org_id, OrgRole::Owner);
			assert!(!registry.can(Action::Create, &owner_invite));
			assert!(registry.can(Action::Update, &owner_invite));
			assert!(registry.can(Action::Delete, &owner_invite));
		}

		#[test]
		fn member_management_scoped_to_own_org() {
			let registry = registry_for(member(OrgId::generate(), OrgRole::Owner));
			let foreign = ResourceAttrs::org_member(OrgId::generate(), OrgRole::Member);
			assert!(!registry.can(Action::Delete, &foreign));
		}
	}

	#[test]
	fn owner_deletes_own_org() {
		let org_id = OrgId::generate();
		let registry = registry_for(member(org_id, OrgRole::Owner));
		assert!(registry.can(Action::Delete, &ResourceAttrs::organization(org_id)));
		assert!(!registry.can(
			Action::Delete,
			&ResourceAttrs::organization(OrgId::generate())
		));
	}
}
