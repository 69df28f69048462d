// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod events;
pub mod exceptions;
pub mod schedule;
pub mod balances;
pub mod config_cmd;
pub mod doctor;
