use super::*;

/// Error codes shared with the node's JSON-RPC layer.
pub(crate) mod code {
    pub(crate) const INVALID_ADDRESS_OR_KEY: i32 = -5;
    pub(crate) const OUT_OF_MEMORY: i32 = -7;
    pub(crate) const INVALID_PARAMETER: i32 = -8;
    pub(crate) const CLIENT_NOT_CONNECTED: i32 = -9;
    pub(crate) const CLIENT_IN_INITIAL_DOWNLOAD: i32 = -10;
    pub(crate) const DESERIALIZATION_ERROR: i32 = -22;
    pub(crate) const CLIENT_P2P_DISABLED: i32 = -31;
    pub(crate) const METHOD_NOT_FOUND: i32 = -32601;
    pub(crate) const INVALID_PARAMS: i32 = -32602;
    pub(crate) const INTERNAL_ERROR: i32 = -32603;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnavailableNetwork,
    NotConnected,
    Syncing,
    ResourceExhaustion,
    InvalidDifficulty,
    UnknownTemplate,
    InvalidParameter,
    ConsistencyViolation,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MiningError {
    #[snafu(display("Error: Peer-to-peer functionality missing or disabled"))]
    P2pDisabled,

    #[snafu(display("Node is not connected!"))]
    NotConnected,

    #[snafu(display("Node is downloading blocks..."))]
    InitialBlockDownload,

    #[snafu(display("out of memory"))]
    OutOfMemory,

    #[snafu(display("invalid difficulty bits in block: {source}"))]
    InvalidDifficulty { source: auxpow::Error },

    #[snafu(display("invalid block template: {message}"))]
    InvalidTemplate { message: String },

    #[snafu(display("block hash unknown"))]
    UnknownBlockHash { hash: BlockHash },

    #[snafu(display("Merkle root unknown"))]
    UnknownMerkleRoot { merkle_root: TxMerkleNode },

    #[snafu(display("invalid size of data: {size} bytes"))]
    InvalidDataSize { size: usize },

    #[snafu(display("invalid {what} hex: {source}"))]
    Hex {
        what: &'static str,
        source: hex::FromHexError,
    },

    #[snafu(display("failed to decode {what}: {source}"))]
    Decode {
        what: &'static str,
        source: auxpow::Error,
    },

    #[snafu(display("{message}"))]
    InvalidParameter { message: String },

    #[snafu(display("reconstructed block hash {actual} does not match {expected}"))]
    HashMismatch {
        expected: BlockHash,
        actual: BlockHash,
    },
}

impl MiningError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::P2pDisabled => ErrorKind::UnavailableNetwork,
            Self::NotConnected => ErrorKind::NotConnected,
            Self::InitialBlockDownload => ErrorKind::Syncing,
            Self::OutOfMemory => ErrorKind::ResourceExhaustion,
            Self::InvalidDifficulty { .. } => ErrorKind::InvalidDifficulty,
            Self::UnknownBlockHash { .. } | Self::UnknownMerkleRoot { .. } => {
                ErrorKind::UnknownTemplate
            }
            Self::InvalidDataSize { .. }
            | Self::Hex { .. }
            | Self::Decode { .. }
            | Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::InvalidTemplate { .. } | Self::HashMismatch { .. } => {
                ErrorKind::ConsistencyViolation
            }
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::P2pDisabled => code::CLIENT_P2P_DISABLED,
            Self::NotConnected => code::CLIENT_NOT_CONNECTED,
            Self::InitialBlockDownload => code::CLIENT_IN_INITIAL_DOWNLOAD,
            Self::OutOfMemory => code::OUT_OF_MEMORY,
            Self::Decode { .. } => code::DESERIALIZATION_ERROR,
            Self::UnknownBlockHash { .. }
            | Self::UnknownMerkleRoot { .. }
            | Self::InvalidDataSize { .. }
            | Self::Hex { .. }
            | Self::InvalidParameter { .. } => code::INVALID_PARAMETER,
            Self::InvalidDifficulty { .. }
            | Self::InvalidTemplate { .. }
            | Self::HashMismatch { .. } => code::INTERNAL_ERROR,
        }
    }
}
