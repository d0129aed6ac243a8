// KVStore — CLI Command Handlers
//
// Each function handles one CLI subcommand. The CLI receives the value type
// as text, so it validates it once and dispatches to the matching typed
// store method.

use std::fmt::Display;

use serde::Serialize;

use crate::codec::{self, ScalarType, ScalarValue};
use crate::config::open_store;
use crate::error::{AppError, Result};
use crate::store::{KvResult, KvStore};

use super::{Cli, Commands};

/// Execute the parsed CLI command.
pub fn execute(cli: Cli) -> Result<()> {
    let config = cli.config();
    let json = cli.json;
    match cli.command {
        Commands::Get { key, ty } => {
            let store = open_store(&config)?;
            cmd_get(store.as_ref(), &key, ty.into(), json)
        }
        Commands::Set { key, value, ty } => {
            let value = parse_value(ty.into(), &value)?;
            let store = open_store(&config)?;
            cmd_set(store.as_ref(), &key, value, json)
        }
        Commands::Remove { key } => {
            let store = open_store(&config)?;
            cmd_remove(store.as_ref(), &key, json)
        }
        Commands::Encode { value, ty } => cmd_encode(&value, ty.into(), json),
        Commands::Decode { record, ty } => cmd_decode(&record, ty.into(), json),
    }
}

// ─── Store Commands ──────────────────────────────────────────────────────────

fn cmd_get(store: &dyn KvStore, key: &str, ty: ScalarType, json: bool) -> Result<()> {
    report(get_value(store, key, ty), json, |value| match value {
        Some(value) => println!("{}", value),
        None => println!("(absent)"),
    })
}

fn cmd_set(store: &dyn KvStore, key: &str, value: ScalarValue, json: bool) -> Result<()> {
    let ty = value.scalar_type();
    report(set_value(store, key, value), json, |()| {
        println!("✓ Stored {} as {}", key, ty)
    })
}

fn cmd_remove(store: &dyn KvStore, key: &str, json: bool) -> Result<()> {
    report(store.remove(key), json, |()| println!("✓ Removed {}", key))
}

/// Print a store result. Failures become an `AppError` so the process exits
/// non-zero; with `--json` the failure is printed first.
fn report<T: Serialize>(result: KvResult<T>, json: bool, render: impl FnOnce(T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    let value = result.into_result()?;
    if !json {
        render(value);
    }
    Ok(())
}

fn get_value(store: &dyn KvStore, key: &str, ty: ScalarType) -> KvResult<Option<ScalarValue>> {
    match ty {
        ScalarType::Bool => store.get_bool(key).map(|v| v.map(ScalarValue::Bool)),
        ScalarType::Int64 => store.get_int64(key).map(|v| v.map(ScalarValue::Int64)),
        ScalarType::UInt64 => store.get_uint64(key).map(|v| v.map(ScalarValue::UInt64)),
        ScalarType::Double => store.get_double(key).map(|v| v.map(ScalarValue::Double)),
        ScalarType::Float => store.get_float(key).map(|v| v.map(ScalarValue::Float)),
        ScalarType::String => store.get_string(key).map(|v| v.map(ScalarValue::String)),
        ScalarType::Bytes => store.get_bytes(key).map(|v| v.map(ScalarValue::Bytes)),
    }
}

fn set_value(store: &dyn KvStore, key: &str, value: ScalarValue) -> KvResult<()> {
    match value {
        ScalarValue::Bool(v) => store.set_bool(key, v),
        ScalarValue::Int64(v) => store.set_int64(key, v),
        ScalarValue::UInt64(v) => store.set_uint64(key, v),
        ScalarValue::Double(v) => store.set_double(key, v),
        ScalarValue::Float(v) => store.set_float(key, v),
        ScalarValue::String(v) => store.set_string(key, &v),
        ScalarValue::Bytes(v) => store.set_bytes(key, &v),
    }
}

// ─── Codec Commands ──────────────────────────────────────────────────────────

fn cmd_encode(value: &str, ty: ScalarType, json: bool) -> Result<()> {
    let record = hex::encode(codec::encode(&parse_value(ty, value)?));
    if json {
        let output = serde_json::json!({ "type": ty, "record": record });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", record);
    }
    Ok(())
}

fn cmd_decode(record: &str, ty: ScalarType, json: bool) -> Result<()> {
    let bytes = from_hex(record)?;
    let value = decode_record(&bytes, ty)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn decode_record(bytes: &[u8], ty: ScalarType) -> Result<ScalarValue> {
    codec::decode(bytes, ty).ok_or_else(|| {
        let reason = match codec::peek_type(bytes) {
            Some(stored) if stored != ty => format!("record is tagged {}, not {}", stored, ty),
            _ => format!("record is not a valid {}", ty),
        };
        AppError::InvalidArgument(reason)
    })
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

fn invalid(text: &str, ty: ScalarType, err: impl Display) -> AppError {
    AppError::InvalidArgument(format!("\"{}\" is not a valid {}: {}", text, ty, err))
}

/// Parse command-line text as a value of `ty`.
fn parse_value(ty: ScalarType, text: &str) -> Result<ScalarValue> {
    match ty {
        ScalarType::Bool => text.parse().map(ScalarValue::Bool).map_err(|e| invalid(text, ty, e)),
        ScalarType::Int64 => text.parse().map(ScalarValue::Int64).map_err(|e| invalid(text, ty, e)),
        ScalarType::UInt64 => text
            .parse()
            .map(ScalarValue::UInt64)
            .map_err(|e| invalid(text, ty, e)),
        ScalarType::Double => text
            .parse()
            .map(ScalarValue::Double)
            .map_err(|e| invalid(text, ty, e)),
        ScalarType::Float => text.parse().map(ScalarValue::Float).map_err(|e| invalid(text, ty, e)),
        ScalarType::String => Ok(ScalarValue::String(text.to_string())),
        ScalarType::Bytes => from_hex(text).map(ScalarValue::Bytes),
    }
}

/// Parse a hex string, with or without a `0x` prefix.
fn from_hex(text: &str) -> Result<Vec<u8>> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|e| invalid(text, ScalarType::Bytes, e))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
