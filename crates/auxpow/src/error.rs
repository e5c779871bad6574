use super::*;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("invalid difficulty bits {bits:08x}"))]
    InvalidDifficulty { bits: u32 },

    #[snafu(display("work data too short: {len} bytes (need at least {HEADER_SIZE})"))]
    WorkTooShort { len: usize },

    #[snafu(display("invalid hex: {source}"))]
    Hex { source: hex::FromHexError },

    #[snafu(display("consensus decode failed: {source}"))]
    Decode { source: encode::Error },

    #[snafu(display("invalid bits `{input}`: {message}"))]
    Bits { input: String, message: String },
}
