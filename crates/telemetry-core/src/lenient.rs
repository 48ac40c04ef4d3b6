//! Tolerant decoding for loosely typed backend fields.
//!
//! The backend serializer is not strict about scalar types: flags arrive as
//! booleans or integers, lap times as integers or floats, counters as floats.
//! A value of an unusable shape decodes to the field's default so that one odd
//! field never costs the whole player list.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Any JSON value, with the scalars kept.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Loose {
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            Loose::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Loose::Int(value) => Some(*value as f64),
            Loose::Float(value) => Some(*value).filter(|v| v.is_finite()),
            Loose::Text(text) => text
                .trim()
                .trim_end_matches('%')
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
            Loose::Other(_) => None,
        }
    }

    /// Integral value; fractions are truncated toward zero.
    pub(crate) fn as_i64(&self) -> Option<i64> {
        if let Loose::Int(value) = self {
            return Some(*value);
        }
        if let Loose::Text(text) = self
            && let Ok(value) = text.trim().parse::<i64>()
        {
            return Some(value);
        }
        self.as_f64().map(|value| value.trunc() as i64)
    }

    pub(crate) fn as_text(&self) -> Option<String> {
        match self {
            Loose::Text(text) => Some(text.clone()),
            Loose::Int(value) => Some(value.to_string()),
            Loose::Float(value) => Some(value.to_string()),
            Loose::Bool(_) | Loose::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseSeq {
    Items(Vec<Loose>),
    Other(IgnoredAny),
}

fn loose<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Loose, D::Error> {
    Loose::deserialize(deserializer)
}

fn loose_seq<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Loose>, D::Error> {
    Ok(match LooseSeq::deserialize(deserializer)? {
        LooseSeq::Items(items) => items,
        LooseSeq::Other(_) => Vec::new(),
    })
}

pub(crate) fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(loose(d)?.as_i64().and_then(|v| u32::try_from(v).ok()))
}

pub(crate) fn opt_i32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Ok(loose(d)?.as_i64().and_then(|v| i32::try_from(v).ok()))
}

pub(crate) fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(loose(d)?.as_f64())
}

pub(crate) fn u32_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(opt_u32(d)?.unwrap_or_default())
}

pub(crate) fn i32_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Ok(opt_i32(d)?.unwrap_or_default())
}

/// Codes whose "absent" value is -1 on the wire.
pub(crate) fn i32_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Ok(opt_i32(d)?.unwrap_or(-1))
}

pub(crate) fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(opt_f64(d)?.unwrap_or_default())
}

/// `true`, `false`, `0`, `1`, `null` all accepted; anything non-zero is set.
pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match loose(d)? {
        Loose::Bool(flag) => flag,
        other => other.as_f64().is_some_and(|v| v != 0.0),
    })
}

pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(loose(d)?.as_text().unwrap_or_default())
}

/// Numeric array; unusable elements become 0.
pub(crate) fn f64_seq<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
    Ok(loose_seq(d)?
        .iter()
        .map(|item| item.as_f64().unwrap_or_default())
        .collect())
}

/// Per-corner readings, padded or cut to four.
pub(crate) fn corners<'de, D: Deserializer<'de>>(d: D) -> Result<[f32; 4], D::Error> {
    let items = loose_seq(d)?;
    let mut out = [0.0f32; 4];
    for (slot, item) in out.iter_mut().zip(&items) {
        *slot = item.as_f64().unwrap_or_default() as f32;
    }
    Ok(out)
}
