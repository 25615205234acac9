// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization engine for Tome.
//!
//! Two independent checks share one set of role orderings:
//!
//! - [`roles::check_roles`]: does the actor hold one of a guard's required roles,
//!   subject to relational markers such as "outranks the subject"
//! - [`abac::define_abilities`]: which `(action, resource type, condition)` grants
//!   does the actor hold, queried per resource instance
//!
//! Both are pure and synchronous. Facts are resolved by the caller; the engine
//! never performs lookups, and every missing fact denies.

pub mod abac;
pub mod audit;
pub mod ordering;
pub mod roles;
pub mod types;

pub use abac::{
	assignable_team_roles, define_abilities, Action, ActorSnapshot, AdminControls,
	CapabilityRegistry, Condition, Grant, RegistryError, ResourceAttrs, ResourceType,
};
pub use audit::{audit_can, AuditEventType, AuditLogEntry};
pub use ordering::{generate_lte, generate_lte_team_roles, Ranked};
pub use roles::{check_roles, ActorContext, ConditionalRole, PostRole, RoleSet, RoleType};
pub use types::{InstanceRole, OrgId, OrgMemberId, OrgRole, PostKind, TeamId, TeamRole, UserId};
