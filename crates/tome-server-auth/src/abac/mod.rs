// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capability-based authorization.
//!
//! For one request the caller resolves an [`ActorSnapshot`], builds a locked
//! [`CapabilityRegistry`] with [`define_abilities`], and asks
//! [`CapabilityRegistry::can`] about concrete resources:
//!
//! ```
//! use tome_server_auth::abac::{define_abilities, Action, ActorSnapshot, ResourceAttrs, ResourceType};
//! use tome_server_auth::{InstanceRole, UserId};
//!
//! let snapshot = ActorSnapshot::user(UserId::generate(), InstanceRole::User);
//! let registry = define_abilities(&snapshot);
//! assert!(registry.can(Action::Create, &ResourceAttrs::of_type(ResourceType::Organization)));
//! ```

pub mod condition;
pub mod engine;
pub mod policies;
pub mod registry;
pub mod types;

pub use condition::Condition;
pub use engine::{assignable_team_roles, define_abilities};
pub use registry::{CapabilityRegistry, Grant, RegistryError};
pub use types::{
	Action, ActorSnapshot, AdminControls, OrgMembershipFact, ResourceAttrs, ResourceType,
	TeamMembershipFact, UserFact,
};
