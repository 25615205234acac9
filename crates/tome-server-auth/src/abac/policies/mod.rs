// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Grant builders, one module per area of the product.

pub mod account;
pub mod org;
pub mod team;
