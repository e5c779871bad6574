use super::*;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Result of expanding compact bits into a full width target, with the
/// sign and overflow flags the compact encoding can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compact {
    pub target: U256,
    pub negative: bool,
    pub overflow: bool,
}

impl Compact {
    /// The target, provided it is usable for mining. Negative, overflowed and
    /// zero targets are rejected.
    pub fn into_target(self, bits: CompactTarget) -> Result<U256> {
        ensure!(
            !self.negative && !self.overflow && !self.target.is_zero(),
            InvalidDifficultySnafu {
                bits: bits.to_consensus(),
            }
        );

        Ok(self.target)
    }
}

pub fn decode_compact(bits: CompactTarget) -> Compact {
    let bits = bits.to_consensus();
    let size = bits >> 24;
    let mut word = bits & MANTISSA_MASK;

    let target = if size <= 3 {
        word >>= 8 * (3 - size);
        U256::from(word)
    } else {
        let shift = 8 * (size as usize - 3);
        if shift >= 256 {
            U256::zero()
        } else {
            U256::from(word) << shift
        }
    };

    let negative = word != 0 && bits & SIGN_BIT != 0;

    let overflow =
        word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

    Compact {
        target,
        negative,
        overflow,
    }
}

/// Hex of the target in little endian byte order, the layout miners expect
/// in the `target` field of work descriptors.
pub fn target_hex(target: U256) -> String {
    hex::encode(target.to_little_endian())
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq};

    #[track_caller]
    fn case(bits: u32, target: U256, negative: bool, overflow: bool) {
        assert_eq!(
            decode_compact(CompactTarget::from_consensus(bits)),
            Compact {
                target,
                negative,
                overflow,
            },
            "bits {bits:08x}"
        );
    }

    #[test]
    fn zero_mantissas() {
        for bits in [
            0x00000000, 0x00123456, 0x01003456, 0x02000056, 0x03000000, 0x04000000, 0x00923456,
            0x01803456, 0x02800056, 0x03800000, 0x04800000,
        ] {
            case(bits, U256::zero(), false, false);
        }
    }

    #[test]
    fn small_sizes_shift_right() {
        case(0x01123456, U256::from(0x12u64), false, false);
        case(0x02123456, U256::from(0x1234u64), false, false);
        case(0x03123456, U256::from(0x123456u64), false, false);
    }

    #[test]
    fn large_sizes_shift_left() {
        case(0x04123456, U256::from(0x12345600u64), false, false);
        case(0x05009234, U256::from(0x92340000u64), false, false);
        case(0x20123456, U256::from(0x123456u64) << (8 * 29), false, false);
    }

    #[test]
    fn sign_bit() {
        case(0x04923456, U256::from(0x12345600u64), true, false);
        case(0x01fedcba, U256::from(0x7eu64), true, false);
    }

    #[test]
    fn overflow() {
        assert!(decode_compact(CompactTarget::from_consensus(0xff123456)).overflow);
        assert!(decode_compact(CompactTarget::from_consensus(0x23000100)).overflow);
        assert!(!decode_compact(CompactTarget::from_consensus(0x22000001)).overflow);
    }

    #[test]
    fn mainnet_genesis_bits() {
        let bits = CompactTarget::from_consensus(0x1d00ffff);
        let target = decode_compact(bits).into_target(bits).unwrap();
        assert_eq!(target, U256::from(0xffffu64) << 208);
    }

    #[test]
    fn unusable_targets_are_rejected() {
        for bits in [0x04923456, 0xff123456, 0x1d000000, 0x00000000] {
            let bits = CompactTarget::from_consensus(bits);
            assert!(matches!(
                decode_compact(bits).into_target(bits),
                Err(Error::InvalidDifficulty { .. })
            ));
        }
    }

    #[test]
    fn target_hex_is_little_endian() {
        let hex = target_hex(U256::from(0xffffu64) << 208);
        assert_eq!(hex.len(), 64);
        assert_eq!(
            hex,
            "0000000000000000000000000000000000000000000000000000ffff00000000"
        );
    }
}
