// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registration and account-level grants.

use crate::abac::{
	Action, AdminControls, CapabilityRegistry, Condition, ResourceType, UserFact,
};

/// Grants sign-up paths. Open registration takes priority over the waitlist.
pub fn grant_registration(registry: &mut CapabilityRegistry, controls: &AdminControls) {
	if controls.allow_registration {
		registry.allow([Action::Create], [ResourceType::UserAccount], None);
	} else if controls.allow_waitlist {
		registry.allow([Action::Create], [ResourceType::WaitlistMember], None);
	}
}

/// Grants every authenticated account rights over its own records, plus the
/// instance-administration grants for admins.
pub fn grant_user(registry: &mut CapabilityRegistry, user: &UserFact) {
	let owned = Some(Condition::OwnedBy {
		user_id: user.user_id,
	});

	registry
		.allow([Action::Manage], [ResourceType::DeviceCredential], owned.clone())
		.allow(
			[Action::Read, Action::Update, Action::Delete],
			[ResourceType::UserAccount],
			owned.clone(),
		)
		.allow([Action::Read], [ResourceType::PendingInvites], owned)
		.allow([Action::Create], [ResourceType::Organization], None);

	if user.is_admin() {
		registry
			.allow(
				[Action::Read, Action::Update],
				[ResourceType::AdminControls],
				None,
			)
			.allow([Action::Manage], [ResourceType::WaitlistMember], None);
	}
}
