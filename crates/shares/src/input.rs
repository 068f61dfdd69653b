// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! JSON test-case schema.
//!
//! A test case is an object with a reserved `keys` entry holding the
//! threshold parameters and one entry per share, keyed by its declared index:
//!
//! ```json
//! { "keys": { "n": 4, "k": 3 },
//!   "1": { "base": "10", "value": "6" },
//!   "2": { "base": "2", "value": "1111" } }
//! ```
//!
//! Numeric fields may be written as JSON numbers or strings. A document is
//! either one test case or an array of them.

use crate::errors::{RecoveryError, RecoveryResult};
use crate::share::{ShareRecord, ShareSet, Threshold};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A non-negative integer written either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(u64),
    Text(String),
}

impl Numeric {
    fn resolve(&self, field: &'static str) -> RecoveryResult<u64> {
        match self {
            Numeric::Number(value) => Ok(*value),
            Numeric::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| RecoveryError::InvalidNumber {
                        field,
                        value: text.clone(),
                    })
            }
        }
    }

    fn resolve_usize(&self, field: &'static str) -> RecoveryResult<usize> {
        let value = self.resolve(field)?;
        usize::try_from(value).map_err(|_| RecoveryError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Numeric::Number(value)
    }
}

/// The reserved `keys` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    pub n: Numeric,
    pub k: Numeric,
}

/// One share entry as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShare {
    pub base: Numeric,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Keys>,
    #[serde(flatten)]
    pub shares: BTreeMap<String, RawShare>,
}

impl TestCase {
    /// Validates the case and decodes every share.
    ///
    /// # Errors
    ///
    /// * `RecoveryError::MissingThreshold` if `keys` is absent.
    /// * `RecoveryError::InvalidIndex` if a share key is not an integer.
    /// * `RecoveryError::InvalidBase` / `RecoveryError::InvalidNumber` for bad bases.
    /// * Any error from [`ShareSet::from_records`].
    pub fn to_share_set(&self) -> RecoveryResult<ShareSet> {
        let keys = self.keys.as_ref().ok_or(RecoveryError::MissingThreshold)?;
        let threshold = Threshold::new(keys.n.resolve_usize("n")?, keys.k.resolve_usize("k")?)?;

        let records = self
            .shares
            .iter()
            .map(|(key, raw)| {
                let idx = key
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| RecoveryError::InvalidIndex { key: key.clone() })?;
                let base = raw.base.resolve("base").map_err(|e| e.for_share(idx))?;
                let base = u32::try_from(base).map_err(|_| {
                    RecoveryError::InvalidNumber {
                        field: "base",
                        value: base.to_string(),
                    }
                    .for_share(idx)
                })?;
                Ok(ShareRecord::new(idx, base, raw.value.clone()))
            })
            .collect::<RecoveryResult<Vec<_>>>()?;

        ShareSet::from_records(threshold, records)
    }

    /// Renders a share set as a test case with every value in `base`.
    pub fn from_share_set(set: &ShareSet, base: u32) -> RecoveryResult<Self> {
        let threshold = set.threshold();
        let shares = set
            .to_records(base)?
            .into_iter()
            .map(|record| {
                (
                    record.idx.to_string(),
                    RawShare {
                        base: Numeric::Text(record.base.to_string()),
                        value: record.value,
                    },
                )
            })
            .collect();

        Ok(Self {
            keys: Some(Keys {
                n: Numeric::from(threshold.n as u64),
                k: Numeric::from(threshold.k as u64),
            }),
            shares,
        })
    }
}

/// Parses a document holding one test case or an array of them.
pub fn parse_cases(json: &str) -> RecoveryResult<Vec<TestCase>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(RecoveryError::from))
            .collect(),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}
