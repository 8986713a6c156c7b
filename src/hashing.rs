//! Hashing System - SHA-256 for Reproducibility
//!
//! Two hashes anchor the determinism contract: the job hash identifies a
//! request (canonical parameters + engine version), and the pixel hash
//! fingerprints the finished bitmap. Equal job hashes with a fixed seed
//! must yield equal pixel hashes.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::raster::Canvas;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    let sorted = sort_value(&v);
    to_string(&sorted)
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let sorted_map: serde_json::Map<String, Value> = sorted
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_value(v)))
                .collect();
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Compute the job hash of a painting request.
/// job_hash = sha256(canonical_params + engine_version)
pub fn compute_job_hash(
    params: &impl Serialize,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let canonical_params = canonical_json(params)?;
    let combined = format!("{}:{}", canonical_params, engine_version);
    Ok(sha256_hex(combined.as_bytes()))
}

/// Fingerprint a finished canvas: SHA-256 over its raw row-major RGB bytes.
/// Byte-identical bitmaps, and only those, share a pixel hash.
pub fn compute_pixel_hash(canvas: &Canvas) -> String {
    sha256_hex(&canvas.to_rgb_bytes())
}

// We need hex encoding
mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
