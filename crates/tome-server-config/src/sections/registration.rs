// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Instance registration settings.
//!
//! These seed the admin controls consulted when anonymous visitors ask to sign
//! up or join the waitlist.

use serde::{Deserialize, Serialize};

/// Registration configuration layer (for merging).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistrationConfigLayer {
	#[serde(default)]
	pub allow_registration: Option<bool>,
	#[serde(default)]
	pub allow_waitlist: Option<bool>,
}

impl RegistrationConfigLayer {
	pub fn merge(&mut self, other: RegistrationConfigLayer) {
		if other.allow_registration.is_some() {
			self.allow_registration = other.allow_registration;
		}
		if other.allow_waitlist.is_some() {
			self.allow_waitlist = other.allow_waitlist;
		}
	}

	pub fn finalize(self) -> RegistrationConfig {
		RegistrationConfig {
			allow_registration: self.allow_registration.unwrap_or(false),
			allow_waitlist: self.allow_waitlist.unwrap_or(true),
		}
	}
}

/// Runtime registration configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationConfig {
	/// Anonymous visitors may create accounts.
	pub allow_registration: bool,
	/// Anonymous visitors may join the waitlist when registration is closed.
	pub allow_waitlist: bool,
}

impl Default for RegistrationConfig {
	fn default() -> Self {
		RegistrationConfigLayer::default().finalize()
	}
}
