// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::YearMonth;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `all` or an empty value means no month constraint.
pub fn parse_month_filter(s: &str) -> Result<Option<YearMonth>> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    Ok(Some(s.parse()?))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    crate::export::format_amount(*d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Asks a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str, input: &mut impl BufRead) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read answer")?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// `--yes` skips the prompt.
pub fn confirmed(sub: &clap::ArgMatches, prompt: &str) -> Result<bool> {
    if sub.get_flag("yes") {
        return Ok(true);
    }
    confirm(prompt, &mut std::io::stdin().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_filter_accepts_all_and_blank() {
        assert_eq!(parse_month_filter("all").unwrap(), None);
        assert_eq!(parse_month_filter("  ").unwrap(), None);
        assert_eq!(
            parse_month_filter(" 2024-06 ").unwrap().unwrap().to_string(),
            "2024-06"
        );
        assert!(parse_month_filter("June").is_err());
    }

    #[test]
    fn confirm_reads_yes_variants() {
        assert!(confirm("Delete?", &mut "YES\n".as_bytes()).unwrap());
        assert!(confirm("Delete?", &mut "y\n".as_bytes()).unwrap());
        assert!(!confirm("Delete?", &mut "\n".as_bytes()).unwrap());
        assert!(!confirm("Delete?", &mut "nope\n".as_bytes()).unwrap());
    }
}
