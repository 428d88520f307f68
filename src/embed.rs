//! Typed-array payload encoding for HTML embedding.
//!
//! Each column is downcast to the smallest safe typed-array width and
//! base64-encoded, so the browser can reconstruct it with a single
//! `Float32Array(buffer)`-style view instead of parsing JSON rows.
//!
//! Downcast rules:
//! - `f64`/`f32` -> `float32`
//! - `i64`/`i32`/`u64`/`u32` -> `uint32` (clamped to the target range)
//! - `i16`/`u16` -> `uint16`
//! - `i8`/`u8`/bool -> `uint8`
//! - date/datetime -> `float32` seconds since epoch
//! - time-of-day strings -> `float32` seconds since midnight
//! - other strings -> `uint16` category codes plus a label table
//!
//! Nulls encode as zero. Byte order is little-endian, which is what the
//! client-side typed-array views assume.

use crate::constants::{SCHEMA_INFER_ROWS, TIME_MATCH_FRACTION};
use crate::data::{parse_time_of_day, DataError, DataResult, Dataset};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use polars::prelude::{DataType as PlDataType, TimeUnit};
use serde::{Deserialize, Serialize};

/// Typed-array element type, named after the JS constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadDtype {
    Float32,
    Uint32,
    Uint16,
    Uint8,
}

/// A base64-encoded typed array ready for embedding: `{dtype, shape, data}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypedPayload {
    pub dtype: PayloadDtype,
    pub shape: Vec<usize>,
    pub data: String,
    /// Label table for categorical columns, index == code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// Embedded payload bundle: metadata plus one typed array per column.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbeddedData {
    pub metadata: EmbedMetadata,
    /// Column name -> payload, in source column order
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbedMetadata {
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub version: String,
}

/// Encode the named columns of a dataset into an embeddable bundle.
pub fn encode_dataset(dataset: &Dataset, columns: &[String]) -> DataResult<EmbeddedData> {
    let mut data = serde_json::Map::new();

    for name in columns {
        let payload = encode_column(dataset, name)?;
        data.insert(name.clone(), serde_json::to_value(payload)?);
    }

    Ok(EmbeddedData {
        metadata: EmbedMetadata {
            total_rows: dataset.height(),
            columns: columns.to_vec(),
            version: "1.0".to_string(),
        },
        data,
    })
}

/// Encode a single column, picking the payload width from its dtype.
pub fn encode_column(dataset: &Dataset, name: &str) -> DataResult<TypedPayload> {
    let dtype = dataset.column(name)?.dtype().clone();

    match dtype {
        PlDataType::Float32 | PlDataType::Float64 => {
            let values = dataset.column_f64(name)?;
            Ok(encode_f32(&to_f32(&values)))
        }
        PlDataType::Int32 | PlDataType::Int64 | PlDataType::UInt32 | PlDataType::UInt64 => {
            let values = dataset.column_f64(name)?;
            let ints: Vec<u32> = values
                .iter()
                .map(|v| clamp_to_u32(v.unwrap_or(0.0)))
                .collect();
            Ok(encode_u32(&ints))
        }
        PlDataType::Int16 | PlDataType::UInt16 => {
            let values = dataset.column_f64(name)?;
            let ints: Vec<u16> = values
                .iter()
                .map(|v| v.unwrap_or(0.0).clamp(0.0, f64::from(u16::MAX)) as u16)
                .collect();
            Ok(encode_u16(&ints))
        }
        PlDataType::Int8 | PlDataType::UInt8 => {
            let values = dataset.column_f64(name)?;
            let ints: Vec<u8> = values
                .iter()
                .map(|v| v.unwrap_or(0.0).clamp(0.0, f64::from(u8::MAX)) as u8)
                .collect();
            Ok(encode_u8(&ints))
        }
        PlDataType::Boolean => {
            let series = dataset.column(name)?.as_materialized_series();
            let flags: Vec<u8> = series
                .bool()?
                .into_iter()
                .map(|v| u8::from(v.unwrap_or(false)))
                .collect();
            Ok(encode_u8(&flags))
        }
        PlDataType::Date => {
            // Physical representation is days since epoch
            let values = dataset.column_f64(name)?;
            let secs: Vec<f32> = values
                .iter()
                .map(|v| (v.unwrap_or(0.0) * 86_400.0) as f32)
                .collect();
            Ok(encode_f32(&secs))
        }
        PlDataType::Datetime(unit, _) => {
            let values = dataset.column_f64(name)?;
            let divisor = match unit {
                TimeUnit::Nanoseconds => 1e9,
                TimeUnit::Microseconds => 1e6,
                TimeUnit::Milliseconds => 1e3,
            };
            let secs: Vec<f32> = values
                .iter()
                .map(|v| (v.unwrap_or(0.0) / divisor) as f32)
                .collect();
            Ok(encode_f32(&secs))
        }
        PlDataType::String => {
            let values = dataset.column_str(name)?;
            Ok(encode_strings(&values))
        }
        other => Err(DataError::InvalidData(format!(
            "cannot embed column '{name}' of type {other}"
        ))),
    }
}

/// Encode a string column. Time-of-day strings become float32 seconds
/// since midnight; everything else becomes uint16 category codes with a
/// first-seen-order label table.
///
/// The time-like check uses the same sample window and match fraction as
/// the profiler, so a column charted as `Time` always embeds as float32
/// seconds. Entries that fail to parse encode as 0, like nulls.
fn encode_strings(values: &[Option<String>]) -> TypedPayload {
    let sample: Vec<&str> = values
        .iter()
        .filter_map(|v| v.as_deref())
        .filter(|s| !s.trim().is_empty())
        .take(SCHEMA_INFER_ROWS)
        .collect();
    let time_matches = sample
        .iter()
        .filter(|s| parse_time_of_day(s).is_some())
        .count();
    let time_like = !sample.is_empty()
        && (time_matches as f64) >= (sample.len() as f64) * TIME_MATCH_FRACTION;

    if time_like {
        let secs: Vec<f32> = values
            .iter()
            .map(|v| {
                v.as_deref()
                    .and_then(parse_time_of_day)
                    .unwrap_or(0.0) as f32
            })
            .collect();
        return encode_f32(&secs);
    }

    let mut labels: Vec<String> = Vec::new();
    let mut index: std::collections::HashMap<String, u16> = std::collections::HashMap::new();
    let mut codes: Vec<u16> = Vec::with_capacity(values.len());

    for v in values {
        match v {
            None => codes.push(0),
            Some(label) => {
                let code = match index.get(label) {
                    Some(code) => *code,
                    None => {
                        if labels.len() >= usize::from(u16::MAX) {
                            0
                        } else {
                            let code = labels.len() as u16;
                            labels.push(label.clone());
                            index.insert(label.clone(), code);
                            code
                        }
                    }
                };
                codes.push(code);
            }
        }
    }

    let mut payload = encode_u16(&codes);
    payload.labels = Some(labels);
    payload
}

fn to_f32(values: &[Option<f64>]) -> Vec<f32> {
    values
        .iter()
        .map(|v| {
            let v = v.unwrap_or(0.0);
            if v.is_finite() {
                v as f32
            } else {
                0.0
            }
        })
        .collect()
}

fn clamp_to_u32(v: f64) -> u32 {
    if !v.is_finite() {
        return 0;
    }
    v.clamp(0.0, f64::from(u32::MAX)) as u32
}

// ============================================================================
// Raw encoders/decoders (little-endian)
// ============================================================================

pub fn encode_f32(values: &[f32]) -> TypedPayload {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    payload(PayloadDtype::Float32, values.len(), &bytes)
}

pub fn encode_u32(values: &[u32]) -> TypedPayload {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    payload(PayloadDtype::Uint32, values.len(), &bytes)
}

pub fn encode_u16(values: &[u16]) -> TypedPayload {
    let mut bytes = Vec::with_capacity(values.len() * 2);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    payload(PayloadDtype::Uint16, values.len(), &bytes)
}

pub fn encode_u8(values: &[u8]) -> TypedPayload {
    payload(PayloadDtype::Uint8, values.len(), values)
}

fn payload(dtype: PayloadDtype, len: usize, bytes: &[u8]) -> TypedPayload {
    TypedPayload {
        dtype,
        shape: vec![len],
        data: BASE64.encode(bytes),
        labels: None,
    }
}

/// Decode a float32 payload back into values. Used by tests and the
/// inspect path; the browser does the equivalent with typed-array views.
pub fn decode_f32(payload: &TypedPayload) -> DataResult<Vec<f32>> {
    let bytes = decode_bytes(payload)?;
    if bytes.len() % 4 != 0 {
        return Err(DataError::InvalidData("float32 payload length".into()));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Decode a uint16 payload back into values.
pub fn decode_u16(payload: &TypedPayload) -> DataResult<Vec<u16>> {
    let bytes = decode_bytes(payload)?;
    if bytes.len() % 2 != 0 {
        return Err(DataError::InvalidData("uint16 payload length".into()));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect())
}

fn decode_bytes(payload: &TypedPayload) -> DataResult<Vec<u8>> {
    BASE64
        .decode(&payload.data)
        .map_err(|e| DataError::InvalidData(format!("base64: {e}")))
}
