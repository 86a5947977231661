//! Precondition checks. Everything here runs before any row is touched, so a
//! failed check leaves no partial result behind.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tether_core::{JoinInstruction, Record, TableCache};
use tether_error::InvalidInputError;

use crate::association::Association;
use crate::config::MissingTablePolicy;

/// A complete integration request as it arrives over JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrateRequest {
    pub cache: TableCache,
    #[serde(rename = "joinInstructions")]
    pub join_instructions: Vec<JoinInstruction>,
}

/// The table the result set is built from, taken from the first instruction.
#[derive(Debug, Clone, Copy)]
pub struct Anchor<'a> {
    pub table: &'a str,
    pub key: &'a str,
    pub rows: &'a [Record],
}

/// Shape-check a raw JSON request, then decode it.
///
/// The checks run in a fixed order and the first failure is reported:
/// `cache` is an object, `joinInstructions` is a non-empty array whose first
/// element is an object with a string `parent`, and `cache[parent]` is an
/// array. Remaining decoding problems surface as `Malformed`.
pub fn request_from_json(request: &Json) -> Result<IntegrateRequest, InvalidInputError> {
    if !request.is_object() {
        return Err(not_an_object("request"));
    }
    let cache = request
        .get("cache")
        .filter(|c| c.is_object())
        .ok_or_else(|| not_an_object("cache"))?;
    let joins = request
        .get("joinInstructions")
        .and_then(Json::as_array)
        .ok_or_else(|| InvalidInputError::NotAnArray {
            argument: "joinInstructions".into(),
        })?;
    let first = joins.first().ok_or(InvalidInputError::EmptyInstructions)?;
    if !first.is_object() {
        return Err(not_an_object("joinInstructions[0]"));
    }
    let parent = first
        .get("parent")
        .and_then(Json::as_str)
        .ok_or_else(|| InvalidInputError::NotAString {
            argument: "joinInstructions[0].parent".into(),
        })?;
    match cache.get(parent) {
        Some(rows) if rows.is_array() => {}
        Some(_) => {
            return Err(InvalidInputError::NotAnArray {
                argument: format!("cache.{parent}"),
            })
        }
        None => {
            return Err(InvalidInputError::UnknownParentTable {
                table: parent.to_string(),
            })
        }
    }

    let cache: TableCache = decode(cache, "cache")?;
    let join_instructions: Vec<JoinInstruction> = decode(
        request.get("joinInstructions").unwrap_or(&Json::Null),
        "joinInstructions",
    )?;
    Ok(IntegrateRequest {
        cache,
        join_instructions,
    })
}

/// Check the instruction list and resolve the anchor table.
pub fn check_instructions<'a>(
    cache: &'a TableCache,
    instructions: &'a [JoinInstruction],
) -> Result<Anchor<'a>, InvalidInputError> {
    let first = instructions
        .first()
        .ok_or(InvalidInputError::EmptyInstructions)?;
    for (index, join) in instructions.iter().enumerate() {
        if let Some(field) = join.first_missing_field() {
            return Err(InvalidInputError::MissingField { index, field });
        }
    }
    let rows = cache
        .table(&first.parent)
        .ok_or_else(|| InvalidInputError::UnknownParentTable {
            table: first.parent.clone(),
        })?;
    Ok(Anchor {
        table: &first.parent,
        key: &first.parent_key,
        rows,
    })
}

/// Check that every table an association reads is cached, unless missing
/// tables are configured to read as empty.
pub fn check_tables(
    cache: &TableCache,
    associations: &[Association<'_>],
    policy: MissingTablePolicy,
) -> Result<(), InvalidInputError> {
    if policy == MissingTablePolicy::Empty {
        return Ok(());
    }
    for association in associations {
        if let Some(table) = association
            .child_tables()
            .into_iter()
            .find(|table| !cache.contains_table(table))
        {
            return Err(InvalidInputError::UnknownTable {
                table: table.to_string(),
                alias: association.alias().to_string(),
            });
        }
    }
    Ok(())
}

fn not_an_object(argument: &str) -> InvalidInputError {
    InvalidInputError::NotAnObject {
        argument: argument.to_string(),
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: &Json, argument: &str) -> Result<T, InvalidInputError> {
    T::deserialize(value).map_err(|e| InvalidInputError::Malformed {
        argument: argument.to_string(),
        message: e.to_string(),
    })
}
