// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod app;
pub mod cli;
pub mod db;
pub mod derive;
pub mod errors;
pub mod export;
pub mod filters;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod store;
pub mod utils;
pub mod commands;
