use super::*;

/// Attaches a parsed auxiliary proof to a candidate block before it is
/// submitted. The block must hash the same afterwards.
pub trait AuxpowAttacher: Send + Sync {
    fn attach(&self, block: &mut Block, auxpow: AuxPow) -> Result<(), MiningError>;
}

/// Parses the proof but leaves the block as is, for chains whose block
/// format has no room for external proof-of-work data yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unattached;

impl AuxpowAttacher for Unattached {
    fn attach(&self, block: &mut Block, auxpow: AuxPow) -> Result<(), MiningError> {
        debug!(
            "Not attaching auxpow with parent {} to block {}",
            auxpow.parent_block.block_hash(),
            block.block_hash()
        );
        Ok(())
    }
}
