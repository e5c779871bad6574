use super::*;

/// Merkle branches deeper than this cannot come from a real parent chain.
const MAX_BRANCH_LENGTH: u64 = 32;

/// Merge-mining proof: the parent chain's coinbase committing to our block
/// hash, the branches linking it into the parent header, and that header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxPow {
    pub coinbase_tx: Transaction,
    pub parent_hash: BlockHash,
    pub coinbase_branch: Vec<TxMerkleNode>,
    pub coinbase_index: i32,
    pub chain_branch: Vec<TxMerkleNode>,
    pub chain_index: i32,
    pub parent_block: Header,
}

fn encode_branch<W: io::Write + ?Sized>(
    branch: &[TxMerkleNode],
    writer: &mut W,
) -> Result<usize, io::Error> {
    let mut len = VarInt(branch.len() as u64).consensus_encode(writer)?;
    for node in branch {
        len += node.consensus_encode(writer)?;
    }
    Ok(len)
}

fn decode_branch<R: io::Read + ?Sized>(
    reader: &mut R,
) -> Result<Vec<TxMerkleNode>, encode::Error> {
    let VarInt(len) = VarInt::consensus_decode(reader)?;

    if len > MAX_BRANCH_LENGTH {
        return Err(encode::Error::ParseFailed("merkle branch too long"));
    }

    (0..len)
        .map(|_| TxMerkleNode::consensus_decode(reader))
        .collect()
}

impl Encodable for AuxPow {
    fn consensus_encode<W: io::Write + ?Sized>(&self, writer: &mut W) -> Result<usize, io::Error> {
        let mut len = self.coinbase_tx.consensus_encode(writer)?;
        len += self.parent_hash.consensus_encode(writer)?;
        len += encode_branch(&self.coinbase_branch, writer)?;
        len += self.coinbase_index.consensus_encode(writer)?;
        len += encode_branch(&self.chain_branch, writer)?;
        len += self.chain_index.consensus_encode(writer)?;
        len += self.parent_block.consensus_encode(writer)?;
        Ok(len)
    }
}

impl Decodable for AuxPow {
    fn consensus_decode_from_finite_reader<R: io::Read + ?Sized>(
        reader: &mut R,
    ) -> Result<Self, encode::Error> {
        Ok(Self {
            coinbase_tx: Transaction::consensus_decode_from_finite_reader(reader)?,
            parent_hash: BlockHash::consensus_decode(reader)?,
            coinbase_branch: decode_branch(reader)?,
            coinbase_index: i32::consensus_decode(reader)?,
            chain_branch: decode_branch(reader)?,
            chain_index: i32::consensus_decode(reader)?,
            parent_block: Header::consensus_decode(reader)?,
        })
    }
}

impl FromStr for AuxPow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).context(HexSnafu)?;
        consensus::deserialize(&bytes).context(DecodeSnafu)
    }
}

impl Display for AuxPow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(consensus::serialize(self)))
    }
}
