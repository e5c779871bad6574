use {super::*, snafu::OptionExt};

/// Rewrites the coinbase input script to `<height> <extra nonce>` and
/// recomputes the merkle root, so every rebuilt template on the same parent
/// has a distinct merkle root.
pub(crate) fn increment_extra_nonce(
    block: &mut Block,
    height: u64,
    extra_nonce: u32,
) -> Result<(), MiningError> {
    let height = i64::try_from(height).ok().context(InvalidTemplateSnafu {
        message: format!("height {height} out of range"),
    })?;

    let coinbase = block
        .txdata
        .first_mut()
        .filter(|tx| tx.is_coinbase())
        .context(InvalidTemplateSnafu {
            message: "block has no coinbase transaction",
        })?;

    // BIP34 height first, as consensus requires
    coinbase.input[0].script_sig = script::Builder::new()
        .push_int(height)
        .push_int(extra_nonce.into())
        .into_script();

    block.header.merkle_root = block.compute_merkle_root().context(InvalidTemplateSnafu {
        message: "block has no transactions",
    })?;

    Ok(())
}

/// Value of the first coinbase output, which pays the miner.
pub(crate) fn coinbase_value(block: &Block) -> Result<Amount, MiningError> {
    block
        .txdata
        .first()
        .and_then(|tx| tx.output.first())
        .map(|output| output.value)
        .context(InvalidTemplateSnafu {
            message: "coinbase transaction has no outputs",
        })
}
