//! Effect code parser
//!
//! Effect codes look like
//! `end_combat|get_item|1-3|50:10^50:20-22&end_combat|recover_hp|all|5-10|sings.`
//! Descriptors are separated by `&`, fields by `|`.

use crate::effect::ast::{Effect, EffectDescriptor, ItemChance, ItemTable, RecoverTarget, Trigger};
use crate::error::{GuestEffectError, Result};
use crate::range::WeightedRangeSet;
use tracing::warn;

const DESCRIPTOR_SEPARATOR: char = '&';
const FIELD_SEPARATOR: char = '|';
const TABLE_SEPARATOR: char = '^';
const CHANCE_SEPARATOR: char = ':';

/// Parse a full effect code, skipping descriptors that fail to parse.
///
/// Each failure is logged; the surviving descriptors keep their order.
pub fn parse_descriptors(code: &str) -> Vec<EffectDescriptor> {
    let mut descriptors = Vec::new();

    for raw in split_descriptors(code) {
        match parse_descriptor(raw) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(err) => warn!(descriptor = raw, error = %err, "skipping malformed guest effect"),
        }
    }

    descriptors
}

/// Parse a full effect code, failing on the first malformed descriptor
pub fn try_parse_descriptors(code: &str) -> Result<Vec<EffectDescriptor>> {
    split_descriptors(code).map(parse_descriptor).collect()
}

fn split_descriptors(code: &str) -> impl Iterator<Item = &str> {
    code.split(DESCRIPTOR_SEPARATOR)
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
}

/// Parse a single descriptor like "end_combat|recover_hp|lowest|10|hums."
pub fn parse_descriptor(descriptor: &str) -> Result<EffectDescriptor> {
    let fields: Vec<&str> = descriptor.trim().split(FIELD_SEPARATOR).collect();

    if fields.len() < 2 || fields[0].trim().is_empty() || fields[1].trim().is_empty() {
        return Err(GuestEffectError::MalformedDescriptor(format!(
            "expected 'trigger|kind|...', got '{}'",
            descriptor
        )));
    }

    let trigger = Trigger::from_keyword(fields[0].trim());
    let kind = fields[1].trim();

    let effect = match kind.to_ascii_lowercase().as_str() {
        "get_item" => parse_grant_item(descriptor, &fields[2..])?,
        "recover_hp" => parse_recover_hp(descriptor, &fields[2..])?,
        _ => Effect::Unknown {
            kind: kind.to_string(),
        },
    };

    Ok(EffectDescriptor { trigger, effect })
}

fn parse_grant_item(descriptor: &str, params: &[&str]) -> Result<Effect> {
    let [quantity, table, ..] = params else {
        return Err(GuestEffectError::MalformedDescriptor(format!(
            "get_item needs a quantity and an item table: '{}'",
            descriptor
        )));
    };

    let quantity = WeightedRangeSet::parse(quantity)?;
    let item_table = parse_item_table(table)?;

    Ok(Effect::GrantItem {
        quantity,
        item_table,
    })
}

fn parse_item_table(table: &str) -> Result<ItemTable> {
    let table = table.trim();
    let mut entries = ItemTable::new();
    if table.is_empty() {
        return Ok(entries);
    }

    for pair in table.split(TABLE_SEPARATOR) {
        let (chance, item_id) = pair.split_once(CHANCE_SEPARATOR).ok_or_else(|| {
            GuestEffectError::MalformedDescriptor(format!(
                "item table entry '{}' is not 'chance:items'",
                pair.trim()
            ))
        })?;

        let chance = chance
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|c| *c <= 100)
            .ok_or_else(|| GuestEffectError::InvalidChance(chance.trim().to_string()))?;

        entries.push(ItemChance {
            chance,
            item_id: WeightedRangeSet::parse(item_id)?,
        });
    }

    Ok(entries)
}

fn parse_recover_hp(descriptor: &str, params: &[&str]) -> Result<Effect> {
    if params.len() < 2 {
        return Err(GuestEffectError::MalformedDescriptor(format!(
            "recover_hp needs a target and a percent range: '{}'",
            descriptor
        )));
    }

    let target = RecoverTarget::from_keyword(params[0].trim())
        .ok_or_else(|| GuestEffectError::UnknownTarget(params[0].trim().to_string()))?;
    let percent_hp = WeightedRangeSet::parse(params[1])?;
    // Messages may contain the field separator themselves
    let message = params[2..].join("|").trim().to_string();

    Ok(Effect::RecoverHp {
        target,
        percent_hp,
        message,
    })
}
