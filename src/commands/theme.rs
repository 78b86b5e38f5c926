// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::models::Theme;
use crate::persistence::StateStorage;
use anyhow::Result;

pub fn handle<S: StateStorage>(budget: &mut Budget<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => println!("{}", budget.theme()),
        Some(("toggle", _)) => {
            let title = match budget.toggle_theme() {
                Theme::Light => "Light",
                Theme::Dark => "Dark",
            };
            println!("{} theme applied", title);
        }
        _ => {}
    }
    Ok(())
}
