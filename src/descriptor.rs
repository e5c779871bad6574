use super::*;

/// Proof-of-work algorithm tag reported to miners.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    ValueEnum,
    DeserializeFromStr,
    SerializeDisplay,
)]
pub enum Algorithm {
    #[display("sha256d")]
    Sha256d,
    #[display("neoscrypt")]
    Neoscrypt,
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha256d" => Ok(Self::Sha256d),
            "neoscrypt" => Ok(Self::Neoscrypt),
            _ => bail!("invalid algorithm `{s}`"),
        }
    }
}

/// Merge-mining task returned by `createauxblock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxBlock {
    pub hash: BlockHash,
    pub algo: Algorithm,
    #[serde(rename = "chainid")]
    pub chain_id: i32,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: BlockHash,
    #[serde(rename = "coinbasevalue", with = "bitcoin::amount::serde::as_sat")]
    pub coinbase_value: Amount,
    pub bits: Bits,
    pub height: u64,
    pub target: String,
}

/// Legacy work task: the padded, word swapped header in `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub data: String,
    pub algo: Algorithm,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: BlockHash,
    #[serde(rename = "coinbasevalue", with = "bitcoin::amount::serde::as_sat")]
    pub coinbase_value: Amount,
    pub bits: Bits,
    pub height: u64,
    pub target: String,
}
