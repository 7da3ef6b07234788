// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::ChainEpoch;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeSeq as _};

/// The empty tipset key. Lotus resolves it to the heaviest tipset, which is
/// what every state query here wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadTipset;

impl Serialize for HeadTipset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_seq(Some(0))?.end()
    }
}

/// `ChainHead`, minus the blocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tipset {
    pub height: ChainEpoch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lotus_json::assert_snapshot;
    use serde_json::json;

    #[test]
    fn head_tipset_is_an_empty_key() {
        assert_eq!(serde_json::to_value(HeadTipset).unwrap(), json!([]));
    }

    #[test]
    fn snapshot() {
        assert_snapshot(
            json!({
                "Cids": [{ "/": "bafy2bzacea3wsdh6y3a36tb3skempjoxqpuyompjbmfeyf34fi3uy6uue42v4" }],
                "Blocks": [],
                "Height": 3_452_100
            }),
            Tipset { height: 3_452_100 },
        );
    }
}
