
use anyhow::{Context, Result};
use serde_json::Value;

use crate::ParseError;
use crate::entry::RosterEntry;

/// Parse a roster payload into validated entries
///
/// Accepts either a bare array of entries (the player's team listing) or an
/// object wrapping them in a `pokemons` array (the opponent group listing).
pub fn parse_roster(payload: &str) -> Result<Vec<RosterEntry>> {
    let value: Value = serde_json::from_str(payload).context("Failed to parse roster JSON")?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("pokemons") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                let reason = "pokemons must be an array".to_string();
                return Err(ParseError::InvalidFormat(reason).into());
            }
            None => return Err(ParseError::MissingField("pokemons".to_string()).into()),
        },
        _ => {
            return Err(
                ParseError::InvalidFormat("expected an array or an object".to_string()).into(),
            );
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| -> Result<RosterEntry> {
            let entry: RosterEntry = serde_json::from_value(item)
                .with_context(|| format!("Failed to decode roster entry {}", idx))?;
            validate(&entry).with_context(|| format!("Roster entry {} is invalid", idx))?;
            Ok(entry)
        })
        .collect()
}

/// Parse a single roster entry object
pub fn parse_roster_entry(payload: &str) -> Result<RosterEntry> {
    let entry: RosterEntry =
        serde_json::from_str(payload).context("Failed to parse roster entry JSON")?;
    validate(&entry)?;
    Ok(entry)
}

fn validate(entry: &RosterEntry) -> Result<()> {
    if entry.name.trim().is_empty() {
        return Err(ParseError::MissingField("name".to_string()).into());
    }

    if entry.hp == 0 {
        return Err(ParseError::InvalidValue {
            field: "hp".to_string(),
            reason: "must be greater than zero".to_string(),
        }
        .into());
    }

    if entry.types.is_empty() {
        return Err(ParseError::MissingField("types".to_string()).into());
    }

    for (field, value) in [
        ("special1_power", entry.special1_power),
        ("special1_multiplier", entry.special1_multiplier),
        ("special2_power", entry.special2_power),
        ("special2_multiplier", entry.special2_multiplier),
    ] {
        if let Some(v) = value
            && (!v.is_finite() || v < 0.0)
        {
            return Err(ParseError::InvalidValue {
                field: field.to_string(),
                reason: format!("{} is not a non-negative number", v),
            }
            .into());
        }
    }

    Ok(())
}
