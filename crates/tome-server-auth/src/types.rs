// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authorization.
//!
//! This module defines the foundational types shared by the role checker and the
//! capability registry:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for different entity types
//!   ([`UserId`], [`OrgId`], [`OrgMemberId`], etc.) preventing accidental mixing
//! - **Role enums**: the instance-wide account role ([`InstanceRole`]) and the two
//!   independently ranked families ([`OrgRole`], [`TeamRole`])
//! - **Post kinds**: the flavours of knowledge-base post ([`PostKind`])
//!
//! Ranking of [`OrgRole`] and [`TeamRole`] lives in [`crate::ordering`]; variant
//! declaration order carries no meaning.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user account.");
define_id_type!(OrgId, "Unique identifier for an organization.");
define_id_type!(
	OrgMemberId,
	"Unique identifier for a user's membership in an organization. Posts record their creator and maintainer by this id."
);
define_id_type!(TeamId, "Unique identifier for a team.");

// =============================================================================
// Instance Roles
// =============================================================================

/// Instance-wide role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceRole {
	/// Regular account.
	User,
	/// Instance administrator; controls registration and the waitlist.
	Admin,
}

impl fmt::Display for InstanceRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			InstanceRole::User => write!(f, "user"),
			InstanceRole::Admin => write!(f, "admin"),
		}
	}
}

// =============================================================================
// Organization Roles
// =============================================================================

/// Roles within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
	/// Standard member access.
	Member,
	/// Manage members, invites and settings; cannot delete the org.
	Moderator,
	/// Full org control, can delete the org.
	Owner,
}

impl fmt::Display for OrgRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrgRole::Member => write!(f, "member"),
			OrgRole::Moderator => write!(f, "moderator"),
			OrgRole::Owner => write!(f, "owner"),
		}
	}
}

// =============================================================================
// Team Roles
// =============================================================================

/// Roles within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
	/// Standard team member.
	Member,
	/// Can manage team members and settings.
	Moderator,
	/// Can additionally delete the team.
	Owner,
}

impl fmt::Display for TeamRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TeamRole::Member => write!(f, "member"),
			TeamRole::Moderator => write!(f, "moderator"),
			TeamRole::Owner => write!(f, "owner"),
		}
	}
}

// =============================================================================
// Posts
// =============================================================================

/// Flavour of a knowledge-base post. Both kinds share one authorization policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
	#[default]
	Doc,
	Qna,
}

impl fmt::Display for PostKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PostKind::Doc => write!(f, "doc"),
			PostKind::Qna => write!(f, "qna"),
		}
	}
}
