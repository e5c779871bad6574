use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
    pub hash: BlockHash,
    pub height: u64,
}

/// A freshly assembled candidate and the tip it builds on, taken under the
/// same chain lock so the parent and its height cannot drift apart.
#[derive(Debug, Clone)]
pub struct NewBlock {
    pub tip: Tip,
    pub block: Block,
}

/// The parts of a full node the miner depends on. Implementations take
/// whatever node-internal locks they need; the miner never calls into a
/// `Node` while a submission holds the template cache.
pub trait Node: Send + Sync {
    /// Current best chain tip. Hash and height must describe the same block.
    fn tip(&self) -> Tip;

    /// Counter bumped on every mempool change.
    fn transactions_updated(&self) -> u64;

    /// Assembles a candidate block on top of the current tip paying to
    /// `script_pubkey`, together with that tip. `None` means the assembler
    /// ran out of resources.
    fn create_new_block(&self, script_pubkey: &Script) -> Option<NewBlock>;

    /// Hands a solved block to validation, returning whether it was accepted.
    fn process_new_block(&self, block: Arc<Block>) -> bool;

    /// Number of connected peers, or `None` without peer-to-peer networking.
    fn connection_count(&self) -> Option<usize>;

    fn is_initial_block_download(&self) -> bool;
}
