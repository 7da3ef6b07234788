// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::stringify;
use num_bigint::BigInt;
use num_traits::ToPrimitive as _;
use serde::Deserialize;

/// attoFIL per FIL.
const ATTO_PER_FIL: f64 = 1e18;

/// An amount of attoFIL, rendered by Lotus as a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount {
    #[serde(with = "stringify")]
    attos: BigInt,
}

impl TokenAmount {
    pub fn from_atto(attos: impl Into<BigInt>) -> Self {
        Self {
            attos: attos.into(),
        }
    }

    pub fn atto(&self) -> &BigInt {
        &self.attos
    }

    /// Whole FIL as a float. Precision loss past 2^53 attoFIL is accepted: this
    /// only ever feeds a gauge.
    pub fn to_fil(&self) -> f64 {
        self.attos.to_f64().unwrap_or(f64::NAN) / ATTO_PER_FIL
    }
}
