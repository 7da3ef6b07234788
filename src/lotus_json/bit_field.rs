// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::error::ExporterError;
use fvm_ipld_bitfield::json::BitFieldJson;
use serde::Deserialize;

/// A set of sector numbers in Lotus' JSON bitfield encoding.
///
/// The JSON is a list of run lengths, alternating unset and set bits and always
/// starting with an unset run: `[2, 3]` is `{2, 3, 4}`, `[0]` is the empty set.
/// The runs are kept as-is and only decoded into a [`fvm_ipld_bitfield::BitField`]
/// by [`SectorSet::count`], so a corrupt bitfield fails the count rather than
/// the whole response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<Vec<u64>>")]
pub struct SectorSet {
    runs: Vec<u64>,
}

impl From<Option<Vec<u64>>> for SectorSet {
    fn from(runs: Option<Vec<u64>>) -> Self {
        Self {
            runs: runs.unwrap_or_default(),
        }
    }
}

impl SectorSet {
    pub fn from_runs(runs: impl Into<Vec<u64>>) -> Self {
        Self { runs: runs.into() }
    }

    /// Number of sectors in the set.
    pub fn count(&self) -> Result<u64, ExporterError> {
        self.validate()?;
        let BitFieldJson(bit_field) =
            serde_json::from_value(serde_json::Value::from(self.runs.clone()))
                .map_err(|e| ExporterError::MalformedSet(format!("{:?}: {e}", self.runs)))?;
        Ok(bit_field.len())
    }

    // The decoder assumes well-formed runs.
    fn validate(&self) -> Result<(), ExporterError> {
        let mut end = 0u64;
        for (i, &run) in self.runs.iter().enumerate() {
            // only the leading unset run may be empty
            if run == 0 && i > 0 {
                return Err(ExporterError::MalformedSet(format!(
                    "zero-length run at offset {i} in {:?}",
                    self.runs
                )));
            }
            end = end.checked_add(run).ok_or_else(|| {
                ExporterError::MalformedSet(format!("run lengths overflow at offset {i}"))
            })?;
        }
        Ok(())
    }
}
