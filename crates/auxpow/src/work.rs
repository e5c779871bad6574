use super::*;

/// Serialized size of a block header.
pub const HEADER_SIZE: usize = 80;

/// Size of the padded and word swapped blob handed to legacy miners.
pub const WORK_DATA_SIZE: usize = 128;

/// Longest input whose padding still fits in `WORK_DATA_SIZE`: one `0x80`
/// byte and an eight byte length follow the data.
pub const MAX_PAD_INPUT: usize = WORK_DATA_SIZE - 9;

/// Pads a serialized header the way SHA-256 pads its final blocks: a single
/// `0x80` byte after the data, zeros, and the bit length big endian in the
/// last eight bytes. The result is extended to `WORK_DATA_SIZE`.
///
/// Panics if `data` is longer than `MAX_PAD_INPUT`.
pub fn pad_header(data: &[u8]) -> [u8; WORK_DATA_SIZE] {
    let len = data.len();

    assert!(
        len <= MAX_PAD_INPUT,
        "cannot pad {len} bytes into {WORK_DATA_SIZE} bytes of work"
    );

    let blocks = 1 + (len + 8) / 64;
    let end = 64 * blocks;

    let mut padded = [0u8; WORK_DATA_SIZE];
    padded[..len].copy_from_slice(data);
    padded[len] = 0x80;
    BigEndian::write_u64(&mut padded[end - 8..end], len as u64 * 8);

    padded
}

/// Reverses the byte order of every 4-byte word in place. Applying it twice
/// is the identity.
pub fn swap_words(data: &mut [u8]) {
    assert!(
        data.len() % 4 == 0,
        "word swap on {} bytes, not a multiple of 4",
        data.len()
    );

    for word in data.chunks_exact_mut(4) {
        let value = LittleEndian::read_u32(word);
        BigEndian::write_u32(word, value);
    }
}

pub fn encode_work(header: &Header) -> [u8; WORK_DATA_SIZE] {
    let mut work = pad_header(&consensus::serialize(header));
    swap_words(&mut work);
    work
}

/// Recovers the header from a work blob. Only the first `HEADER_SIZE` bytes
/// are read; padding is ignored.
pub fn decode_work(data: &[u8]) -> Result<Header> {
    ensure!(data.len() >= HEADER_SIZE, WorkTooShortSnafu { len: data.len() });

    let mut header = data[..HEADER_SIZE].to_vec();
    swap_words(&mut header);

    consensus::deserialize(&header).context(DecodeSnafu)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        bitcoin::{block, hashes::Hash},
        pretty_assertions::assert_eq,
    };

    fn header() -> Header {
        Header {
            version: block::Version::TWO,
            prev_blockhash: BlockHash::from_byte_array([0x11; 32]),
            merkle_root: TxMerkleNode::from_byte_array([0x22; 32]),
            time: 1_700_000_000,
            bits: CompactTarget::from_consensus(0x1d00ffff),
            nonce: 0,
        }
    }

    #[test]
    fn padding_layout() {
        let data = consensus::serialize(&header());
        assert_eq!(data.len(), HEADER_SIZE);

        let padded = pad_header(&data);

        assert_eq!(&padded[..HEADER_SIZE], data.as_slice());
        assert_eq!(padded[HEADER_SIZE], 0x80);
        assert!(padded[HEADER_SIZE + 1..WORK_DATA_SIZE - 4].iter().all(|b| *b == 0));
        assert_eq!(padded[WORK_DATA_SIZE - 4..], [0x00, 0x00, 0x02, 0x80]);
    }

    #[test]
    fn padding_of_short_input_is_extended() {
        let padded = pad_header(&[0xab; 4]);

        assert_eq!(padded[..5], [0xab, 0xab, 0xab, 0xab, 0x80]);
        assert_eq!(padded[60..64], [0x00, 0x00, 0x00, 0x20]);
        assert!(padded[64..].iter().all(|b| *b == 0));
    }

    #[test]
    fn longest_paddable_input() {
        let padded = pad_header(&[0xcd; MAX_PAD_INPUT]);

        assert_eq!(padded[MAX_PAD_INPUT], 0x80);
        assert_eq!(padded[WORK_DATA_SIZE - 8..], [0, 0, 0, 0, 0, 0, 0x03, 0xb8]);
    }

    #[test]
    #[should_panic(expected = "cannot pad 120 bytes")]
    fn padding_rejects_oversized_input() {
        pad_header(&[0; MAX_PAD_INPUT + 1]);
    }

    #[test]
    fn swap_reverses_each_word() {
        let mut data = [1, 2, 3, 4, 5, 6, 7, 8];
        swap_words(&mut data);
        assert_eq!(data, [4, 3, 2, 1, 8, 7, 6, 5]);
        swap_words(&mut data);
        assert_eq!(data, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    #[should_panic(expected = "not a multiple of 4")]
    fn swap_rejects_partial_words() {
        swap_words(&mut [0u8; 6]);
    }

    #[test]
    fn encoded_work_is_swapped_padding() {
        let header = header();
        let work = encode_work(&header);

        let mut unswapped = work;
        swap_words(&mut unswapped);

        assert_eq!(unswapped, pad_header(&consensus::serialize(&header)));
        assert_eq!(work[..4], [0x00, 0x00, 0x00, 0x02]);
    }

    #[test]
    fn decode_recovers_header() {
        let header = header();
        let decoded = decode_work(&encode_work(&header)).unwrap();

        assert_eq!(decoded.prev_blockhash, header.prev_blockhash);
        assert_eq!(decoded.merkle_root, header.merkle_root);
        assert_eq!(decoded.block_hash(), header.block_hash());
    }

    #[test]
    fn decode_reads_miner_nonce() {
        let mut header = header();
        header.nonce = 0xdeadbeef;

        let mut work = encode_work(&header);
        work[HEADER_SIZE..].fill(0xff);

        assert_eq!(decode_work(&work).unwrap().nonce, 0xdeadbeef);
    }

    #[test]
    fn decode_rejects_short_data() {
        assert!(matches!(
            decode_work(&[0u8; 79]),
            Err(Error::WorkTooShort { len: 79 })
        ));
        assert!(decode_work(&[0u8; HEADER_SIZE]).is_ok());
    }
}
