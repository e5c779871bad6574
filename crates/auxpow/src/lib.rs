use {
    bitcoin::{
        BlockHash, CompactTarget, Transaction, TxMerkleNode, VarInt,
        block::Header,
        consensus::{self, Decodable, Encodable, encode},
        io,
    },
    byteorder::{BigEndian, ByteOrder, LittleEndian},
    error::{BitsSnafu, DecodeSnafu, HexSnafu, InvalidDifficultySnafu, WorkTooShortSnafu},
    primitive_types::U256,
    serde_with::{DeserializeFromStr, SerializeDisplay},
    snafu::{ResultExt, Snafu, ensure},
    std::{
        fmt::{self, Display, Formatter},
        str::FromStr,
    },
};

pub use {
    bits::Bits,
    compact::{Compact, decode_compact, target_hex},
    error::{Error, Result},
    proof::AuxPow,
    work::{
        HEADER_SIZE, MAX_PAD_INPUT, WORK_DATA_SIZE, decode_work, encode_work, pad_header,
        swap_words,
    },
};

mod bits;
mod compact;
mod error;
mod proof;
mod work;
