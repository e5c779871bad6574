use super::*;

/// Compact difficulty bits in their fixed eight hex digit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr, SerializeDisplay)]
pub struct Bits(CompactTarget);

impl Bits {
    pub fn to_compact(&self) -> CompactTarget {
        self.0
    }
}

impl FromStr for Bits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ensure!(
            s.len() == 8 && s.bytes().all(|byte| byte.is_ascii_hexdigit()),
            BitsSnafu {
                input: s,
                message: "expected 8 hex digits",
            }
        );

        let bits = u32::from_str_radix(s, 16).map_err(|err| Error::Bits {
            input: s.into(),
            message: err.to_string(),
        })?;

        Ok(Bits(CompactTarget::from_consensus(bits)))
    }
}

impl Display for Bits {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0.to_consensus())
    }
}

impl From<CompactTarget> for Bits {
    fn from(compact: CompactTarget) -> Bits {
        Bits(compact)
    }
}

impl From<Bits> for CompactTarget {
    fn from(bits: Bits) -> CompactTarget {
        bits.0
    }
}
