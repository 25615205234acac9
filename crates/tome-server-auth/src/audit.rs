// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit records for authorization decisions.
//!
//! [`audit_can`] evaluates a capability query and returns both the verdict and
//! an [`AuditLogEntry`] the caller may persist. Denials are also logged at
//! `info`, grants at `debug`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::abac::{Action, CapabilityRegistry, ResourceAttrs, ResourceType};
use crate::types::UserId;

/// Types of events recorded by the authorization layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
	/// Access to a resource was granted.
	AccessGranted,
	/// Access to a resource was denied.
	AccessDenied,
}

impl std::fmt::Display for AuditEventType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			AuditEventType::AccessGranted => "access_granted",
			AuditEventType::AccessDenied => "access_denied",
		};
		write!(f, "{s}")
	}
}

/// One authorization decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
	pub id: Uuid,
	pub timestamp: DateTime<Utc>,
	pub event_type: AuditEventType,
	/// The acting account, `None` for anonymous requests.
	pub actor_user_id: Option<UserId>,
	pub action: Action,
	pub resource_type: ResourceType,
	/// The resource attributes the decision was made on.
	pub details: serde_json::Value,
}

impl AuditLogEntry {
	pub fn allowed(&self) -> bool {
		self.event_type == AuditEventType::AccessGranted
	}
}

/// Evaluates `registry.can(action, resource)` and records the outcome.
pub fn audit_can(
	registry: &CapabilityRegistry,
	actor_user_id: Option<UserId>,
	action: Action,
	resource: &ResourceAttrs,
) -> (bool, AuditLogEntry) {
	let allowed = registry.can(action, resource);
	let event_type = if allowed {
		debug!(?actor_user_id, %action, resource_type = %resource.resource_type, "access granted");
		AuditEventType::AccessGranted
	} else {
		info!(?actor_user_id, %action, resource_type = %resource.resource_type, "access denied");
		AuditEventType::AccessDenied
	};

	let entry = AuditLogEntry {
		id: Uuid::new_v4(),
		timestamp: Utc::now(),
		event_type,
		actor_user_id,
		action,
		resource_type: resource.resource_type,
		details: serde_json::to_value(resource).unwrap_or(serde_json::Value::Null),
	};

	(allowed, entry)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::abac::{define_abilities, ActorSnapshot};
	use crate::types::{InstanceRole, OrgId};

	#[test]
	fn display_returns_snake_case() {
		assert_eq!(AuditEventType::AccessGranted.to_string(), "access_granted");
		assert_eq!(AuditEventType::AccessDenied.to_string(), "access_denied");
	}

	#[test]
	fn deserializes_snake_case() {
		let event: AuditEventType = serde_json::from_str("\"access_denied\"").unwrap();
		assert_eq!(event, AuditEventType::AccessDenied);
	}

	#[test]
	fn records_grant() {
		let user_id = UserId::generate();
		let registry = define_abilities(&ActorSnapshot::user(user_id, InstanceRole::User));
		let resource = ResourceAttrs::of_type(ResourceType::Organization);

		let (allowed, entry) = audit_can(&registry, Some(user_id), Action::Create, &resource);
		assert!(allowed);
		assert!(entry.allowed());
		assert_eq!(entry.actor_user_id, Some(user_id));
		assert_eq!(entry.resource_type, ResourceType::Organization);
		assert_eq!(entry.details["resource_type"], "organization");
	}

	#[test]
	fn records_denial() {
		let registry = define_abilities(&ActorSnapshot::anonymous());
		let org_id = OrgId::generate();
		let (allowed, entry) =
			audit_can(&registry, None, Action::Delete, &ResourceAttrs::organization(org_id));
		assert!(!allowed);
		assert_eq!(entry.event_type, AuditEventType::AccessDenied);
		assert_eq!(entry.details["org_id"], org_id.to_string());
	}

	#[test]
	fn entry_serializes_action_snake_case() {
		let registry = define_abilities(&ActorSnapshot::anonymous());
		let (_, entry) = audit_can(&registry, None, Action::Read, &ResourceAttrs::admin_controls());
		let json = serde_json::to_value(&entry).unwrap();
		assert_eq!(json["event_type"], "access_denied");
		assert_eq!(json["action"], "read");
		assert_eq!(json["resource_type"], "admin_controls");
	}
}
