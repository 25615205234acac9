// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod logging;
mod registration;

pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use registration::{RegistrationConfig, RegistrationConfigLayer};
