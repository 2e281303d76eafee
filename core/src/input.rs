use std::ops::RangeInclusive;

use anyhow::{anyhow, Result};

use crate::model::day_state::DayState;

/// One `DAY[:STATE]` or `FROM-TO[:STATE]` token. `state == None` clears the days.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub days: RangeInclusive<u32>,
    pub state: Option<DayState>,
}

pub fn parse_assignments(args: &[String]) -> Result<Vec<Assignment>> {
    args.iter().map(|arg| parse_assignment(arg)).collect()
}

fn parse_assignment(arg: &str) -> Result<Assignment> {
    let (days_part, state_part) = match arg.split_once(':') {
        Some((days, state)) => (days, Some(state)),
        None => (arg, None),
    };

    let state = match state_part.map(|s| s.trim().to_lowercase()) {
        None => None,
        Some(s) if s.is_empty() || s == "none" || s == "clear" => None,
        Some(s) => Some(s.parse::<DayState>()?),
    };

    let days = match days_part.split_once('-') {
        Some((from, to)) => parse_day(from)?..=parse_day(to)?,
        None => {
            let day = parse_day(days_part)?;
            day..=day
        }
    };
    if days.is_empty() {
        return Err(anyhow!("Empty day range: '{}'", days_part));
    }

    Ok(Assignment { days, state })
}

fn parse_day(s: &str) -> Result<u32> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid day number: '{}'", s))
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}
