use super::*;

/// Templates handed out since the last tip change. Blocks live in an arena
/// and both lookup indices map into it, so a block can be resolved by hash
/// for merge-mining submissions and by merkle root for legacy work.
#[derive(Debug, Default)]
pub(crate) struct TemplateCache {
    tip: Option<Tip>,
    last_build: u64,
    last_transactions_updated: u64,
    extra_nonce: u32,
    blocks: Vec<Block>,
    by_hash: HashMap<BlockHash, usize>,
    by_merkle_root: HashMap<TxMerkleNode, usize>,
    current: Option<BlockHash>,
}

impl TemplateCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn tip_changed(&self, tip: &Tip) -> bool {
        self.tip.as_ref() != Some(tip)
    }

    /// A template is stale once the tip moves, or once the mempool changed
    /// and the current template is older than `update_interval`.
    pub(crate) fn is_stale(
        &self,
        tip: &Tip,
        transactions_updated: u64,
        now: u64,
        update_interval: Duration,
    ) -> bool {
        self.current.is_none()
            || self.tip_changed(tip)
            || (transactions_updated != self.last_transactions_updated
                && now.saturating_sub(self.last_build) > update_interval.as_secs())
    }

    /// Drops every template. The extra nonce restarts since merkle roots
    /// only need to be unique per parent.
    pub(crate) fn clear(&mut self) {
        self.blocks.clear();
        self.by_hash.clear();
        self.by_merkle_root.clear();
        self.current = None;
        self.extra_nonce = 0;
    }

    pub(crate) fn next_extra_nonce(&mut self) -> u32 {
        self.extra_nonce = self.extra_nonce.wrapping_add(1);
        self.extra_nonce
    }

    /// Stores a finalized template as the current one and records the chain
    /// state it was built against.
    pub(crate) fn insert(
        &mut self,
        block: Block,
        tip: Tip,
        transactions_updated: u64,
        now: u64,
    ) -> BlockHash {
        let hash = block.block_hash();
        let index = self.blocks.len();

        self.by_hash.insert(hash, index);
        self.by_merkle_root.insert(block.header.merkle_root, index);
        self.blocks.push(block);

        self.tip = Some(tip);
        self.last_build = now;
        self.last_transactions_updated = transactions_updated;
        self.current = Some(hash);

        hash
    }

    pub(crate) fn current(&self) -> Option<&Block> {
        self.current.as_ref().and_then(|hash| self.get(hash))
    }

    pub(crate) fn get(&self, hash: &BlockHash) -> Option<&Block> {
        self.by_hash.get(hash).map(|index| &self.blocks[*index])
    }

    pub(crate) fn get_by_merkle_root(&self, merkle_root: &TxMerkleNode) -> Option<&Block> {
        self.by_merkle_root
            .get(merkle_root)
            .map(|index| &self.blocks[*index])
    }

    pub(crate) fn tip(&self) -> Option<Tip> {
        self.tip
    }

    pub(crate) fn len(&self) -> usize {
        self.by_hash.len()
    }
}
