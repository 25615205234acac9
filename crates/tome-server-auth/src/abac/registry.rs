// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The capability registry: an ordered list of grants plus an alias table.
//!
//! A registry is mutable while it is being built and frozen by [`CapabilityRegistry::lock`].
//! Mutating a locked registry is a construction-order bug in the caller, so
//! [`CapabilityRegistry::allow`] and [`CapabilityRegistry::add_alias`] panic on
//! it. The fallible `try_` variants exist for callers that build registries from
//! untrusted input.
//!
//! Grants keep the action they were registered with and aliases are expanded
//! when the registry is queried, so registration order of aliases and grants
//! does not matter. Locking computes every alias expansion once.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use super::condition::Condition;
use super::types::{Action, ResourceAttrs, ResourceType};

/// Errors raised while building a registry.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RegistryError {
	#[error("capability registry is locked: cannot {operation} after lock()")]
	Locked { operation: &'static str },
}

/// One rule: `action` on `resource_type`, optionally constrained by `condition`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
	pub action: Action,
	pub resource_type: ResourceType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub condition: Option<Condition>,
}

impl Grant {
	/// Returns true if the grant's condition accepts `resource`. Type is not checked.
	pub fn applies_to(&self, resource: &ResourceAttrs) -> bool {
		self
			.condition
			.as_ref()
			.map_or(true, |condition| condition.matches(resource))
	}
}

/// Grants available to one actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilityRegistry {
	grants: Vec<Grant>,
	aliases: BTreeMap<Action, BTreeSet<Action>>,
	/// Transitive alias expansions, filled by `lock`.
	#[serde(skip)]
	expanded: BTreeMap<Action, BTreeSet<Action>>,
	locked: bool,
}

impl CapabilityRegistry {
	/// Creates an empty registry with no aliases.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry where `manage` expands to create/read/update/delete.
	pub fn with_default_aliases() -> Self {
		let mut registry = Self::new();
		registry.add_alias(Action::Manage, Action::CRUD);
		registry
	}

	/// Registers `name` as shorthand for `actions`.
	///
	/// # Panics
	///
	/// Panics if the registry is locked.
	pub fn add_alias(
		&mut self,
		name: Action,
		actions: impl IntoIterator<Item = Action>,
	) -> &mut Self {
		if let Err(err) = self.try_add_alias(name, actions) {
			panic!("{err}");
		}
		self
	}

	/// Registers `name` as shorthand for `actions`, failing if locked.
	pub fn try_add_alias(
		&mut self,
		name: Action,
		actions: impl IntoIterator<Item = Action>,
	) -> Result<(), RegistryError> {
		self.ensure_unlocked("add an alias")?;
		self.aliases.entry(name).or_default().extend(actions);
		Ok(())
	}

	/// Adds one grant per `(action, resource_type)` pair, all sharing `condition`.
	///
	/// # Panics
	///
	/// Panics if the registry is locked.
	pub fn allow(
		&mut self,
		actions: impl IntoIterator<Item = Action>,
		resource_types: impl IntoIterator<Item = ResourceType>,
		condition: Option<Condition>,
	) -> &mut Self {
		if let Err(err) = self.try_allow(actions, resource_types, condition) {
			panic!("{err}");
		}
		self
	}

	/// Adds one grant per `(action, resource_type)` pair, failing if locked.
	pub fn try_allow(
		&mut self,
		actions: impl IntoIterator<Item = Action>,
		resource_types: impl IntoIterator<Item = ResourceType>,
		condition: Option<Condition>,
	) -> Result<(), RegistryError> {
		self.ensure_unlocked("add a grant")?;

		let actions: Vec<Action> = actions.into_iter().collect();
		for resource_type in resource_types {
			for &action in &actions {
				self.grants.push(Grant {
					action,
					resource_type,
					condition: condition.clone(),
				});
			}
		}
		Ok(())
	}

	/// Freezes the registry. Locking twice is a no-op.
	pub fn lock(&mut self) -> &mut Self {
		if !self.locked {
			self.expanded = self
				.aliases
				.keys()
				.map(|&name| (name, self.expand(name)))
				.collect();
			self.locked = true;
		}
		self
	}

	pub fn is_locked(&self) -> bool {
		self.locked
	}

	/// All grants in registration order.
	pub fn grants(&self) -> &[Grant] {
		&self.grants
	}

	/// Every action `action` stands for, including itself. Aliases of aliases
	/// are followed; cycles terminate.
	pub fn expand(&self, action: Action) -> BTreeSet<Action> {
		let mut expanded = BTreeSet::new();
		let mut pending = vec![action];
		while let Some(next) = pending.pop() {
			if !expanded.insert(next) {
				continue;
			}
			if let Some(targets) = self.aliases.get(&next) {
				pending.extend(targets.iter().copied());
			}
		}
		expanded
	}

	/// Returns true if `resource` may have `action` performed on it.
	///
	/// Stops at the first grant whose action, type and condition all match.
	#[instrument(
		level = "trace",
		skip(self, resource),
		fields(resource_type = %resource.resource_type),
		ret
	)]
	pub fn can(&self, action: Action, resource: &ResourceAttrs) -> bool {
		self.matching(action, resource.resource_type)
			.any(|grant| grant.applies_to(resource))
	}

	/// Returns true if any grant covers `action` on `resource_type`, ignoring
	/// conditions. Suits list endpoints that filter instances afterwards.
	pub fn can_on_type(&self, action: Action, resource_type: ResourceType) -> bool {
		self.matching(action, resource_type).next().is_some()
	}

	/// Grants covering `action` on `resource_type`.
	pub fn rules_for(&self, action: Action, resource_type: ResourceType) -> Vec<&Grant> {
		self.matching(action, resource_type).collect()
	}

	fn matching(
		&self,
		action: Action,
		resource_type: ResourceType,
	) -> impl Iterator<Item = &Grant> + '_ {
		self.grants.iter().filter(move |grant| {
			grant.resource_type == resource_type
				&& self.covers(grant.action, action)
		})
	}

	/// Returns true if a grant of `granted` permits `requested`.
	fn covers(&self, granted: Action, requested: Action) -> bool {
		if granted == requested {
			return true;
		}
		if self.locked {
			return self
				.expanded
				.get(&granted)
				.is_some_and(|actions| actions.contains(&requested));
		}
		self.expand(granted).contains(&requested)
	}

	fn ensure_unlocked(&self, operation: &'static str) -> Result<(), RegistryError> {
		if self.locked {
			return Err(RegistryError::Locked { operation });
		}
		Ok(())
	}
}
