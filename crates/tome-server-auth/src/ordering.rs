// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Total orders over the ranked role families.
//!
//! [`OrgRole`] and [`TeamRole`] are each ranked by their position in a fixed
//! ascending sequence. Both families implement [`Ranked`] independently, so a
//! comparison between an org role and a team role does not type-check.
//!
//! The role-set generators ([`generate_lte`], [`generate_lte_team_roles`]) bound
//! which ranks an actor may hand out to others.

use std::cmp::Ordering;

use crate::types::{OrgRole, TeamRole};

/// A role family with a fixed ascending rank sequence.
pub trait Ranked: Copy + Eq + 'static {
	/// Every role of the family, lowest first.
	const ASCENDING: &'static [Self];

	/// Position of this role in [`Ranked::ASCENDING`].
	fn rank(&self) -> usize {
		Self::ASCENDING
			.iter()
			.position(|r| r == self)
			.unwrap_or_default()
	}

	/// Compares two roles of the same family by rank.
	fn compare(&self, other: &Self) -> Ordering {
		self.rank().cmp(&other.rank())
	}

	/// Ascending suffix of roles ranked `>= self`.
	fn at_least(self) -> &'static [Self] {
		&Self::ASCENDING[self.rank()..]
	}
}

impl Ranked for OrgRole {
	const ASCENDING: &'static [Self] = &[OrgRole::Member, OrgRole::Moderator, OrgRole::Owner];
}

impl Ranked for TeamRole {
	const ASCENDING: &'static [Self] = &[TeamRole::Member, TeamRole::Moderator, TeamRole::Owner];
}

macro_rules! impl_rank_ord {
	($name:ident) => {
		impl PartialOrd for $name {
			fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
				Some(self.cmp(other))
			}
		}

		impl Ord for $name {
			fn cmp(&self, other: &Self) -> Ordering {
				Ranked::compare(self, other)
			}
		}
	};
}

impl_rank_ord!(OrgRole);
impl_rank_ord!(TeamRole);

/// Returns the ascending prefix of `role`'s family up to and including `role`.
pub fn generate_lte<R: Ranked>(role: R) -> &'static [R] {
	&R::ASCENDING[..=role.rank()]
}

/// Returns the team roles an actor may assign.
///
/// Org moderators and owners may assign any team role. Otherwise the range is
/// bounded by the actor's own team rank, and is empty without one.
pub fn generate_lte_team_roles(org_role: OrgRole, team_role: Option<TeamRole>) -> &'static [TeamRole] {
	if org_role >= OrgRole::Moderator {
		return TeamRole::ASCENDING;
	}

	match team_role {
		Some(role) => generate_lte(role),
		None => &[],
	}
}
