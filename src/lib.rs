use {
    anyhow::{anyhow, bail},
    auxpow::{AuxPow, Bits, HEADER_SIZE, decode_compact, target_hex},
    bitcoin::{
        Address, Amount, Block, BlockHash, Network, Script, ScriptBuf, TxMerkleNode,
        address::NetworkUnchecked, script,
    },
    clap::{Parser, ValueEnum},
    derive_more::Display,
    error::{
        DecodeSnafu, HashMismatchSnafu, HexSnafu, InitialBlockDownloadSnafu, InvalidDataSizeSnafu,
        InvalidDifficultySnafu, InvalidTemplateSnafu, NotConnectedSnafu, OutOfMemorySnafu,
        P2pDisabledSnafu, UnknownBlockHashSnafu, UnknownMerkleRootSnafu, code,
    },
    parking_lot::Mutex,
    primitive_types::U256,
    serde::{Deserialize, Serialize},
    serde_json::{Value, json},
    serde_with::{DeserializeFromStr, SerializeDisplay},
    snafu::{Snafu, ensure},
    std::{
        collections::{BTreeMap, HashMap},
        fmt::{self, Formatter},
        fs, io,
        path::PathBuf,
        str::FromStr,
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
        time::{Duration, SystemTime, UNIX_EPOCH},
    },
    tracing::{debug, info, warn},
    tracing_appender::non_blocking,
    tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt},
};

pub use {
    attacher::{AuxpowAttacher, Unattached},
    chain::Chain,
    clock::{Clock, MockClock, SystemClock},
    coordinator::{AuxpowMiner, MiningParams},
    descriptor::{Algorithm, AuxBlock, Work},
    error::{ErrorKind, MiningError},
    node::{NewBlock, Node, Tip},
    options::Options,
    rpc::{Rpc, RpcError},
    settings::Settings,
};

mod attacher;
mod cache;
mod chain;
mod clock;
mod coinbase;
mod coordinator;
mod descriptor;
mod error;
pub mod logs;
mod node;
mod options;
mod rpc;
mod settings;

/// Rebuild floor for templates whose only change is mempool churn.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Auxpow chain id used when none is configured.
pub const DEFAULT_AUXPOW_CHAIN_ID: i32 = 1;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
