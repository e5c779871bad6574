use super::*;

struct State {
    tip: Tip,
    transactions_updated: u64,
    connections: Option<usize>,
    initial_block_download: bool,
    out_of_memory: bool,
    advance_during_assembly: bool,
    bits: CompactTarget,
    coinbase_value: Amount,
    created: usize,
    processed: Vec<Block>,
}

/// In-memory node: assembles a coinbase-only block on its tip and accepts
/// any block that builds on the tip with a consistent merkle root.
pub(crate) struct MockNode {
    state: Mutex<State>,
}

impl MockNode {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                tip: tip_at(100),
                transactions_updated: 1,
                connections: Some(8),
                initial_block_download: false,
                out_of_memory: false,
                advance_during_assembly: false,
                bits: CompactTarget::from_consensus(REGTEST_BITS),
                coinbase_value: Amount::from_sat(50 * 100_000_000),
                created: 0,
                processed: Vec::new(),
            }),
        }
    }

    pub(crate) fn advance_tip(&self) -> Tip {
        let mut state = self.state.lock();
        state.tip = tip_at(state.tip.height + 1);
        state.tip
    }

    pub(crate) fn bump_mempool(&self) {
        self.state.lock().transactions_updated += 1;
    }

    pub(crate) fn set_connections(&self, connections: Option<usize>) {
        self.state.lock().connections = connections;
    }

    pub(crate) fn set_initial_block_download(&self, initial_block_download: bool) {
        self.state.lock().initial_block_download = initial_block_download;
    }

    pub(crate) fn set_out_of_memory(&self, out_of_memory: bool) {
        self.state.lock().out_of_memory = out_of_memory;
    }

    /// Makes the next assembly land on a tip that arrived after the miner
    /// last read it.
    pub(crate) fn advance_during_assembly(&self) {
        self.state.lock().advance_during_assembly = true;
    }

    pub(crate) fn set_bits(&self, bits: u32) {
        self.state.lock().bits = CompactTarget::from_consensus(bits);
    }

    pub(crate) fn set_coinbase_value(&self, value: Amount) {
        self.state.lock().coinbase_value = value;
    }

    /// Number of blocks assembled so far.
    pub(crate) fn created(&self) -> usize {
        self.state.lock().created
    }

    pub(crate) fn processed(&self) -> Vec<Block> {
        self.state.lock().processed.clone()
    }
}

fn tip_at(height: u64) -> Tip {
    Tip {
        hash: BlockHash::hash(&height.to_le_bytes()),
        height,
    }
}

impl Node for MockNode {
    fn tip(&self) -> Tip {
        self.state.lock().tip
    }

    fn transactions_updated(&self) -> u64 {
        self.state.lock().transactions_updated
    }

    fn create_new_block(&self, script_pubkey: &Script) -> Option<NewBlock> {
        let mut state = self.state.lock();

        if state.out_of_memory {
            return None;
        }

        if state.advance_during_assembly {
            state.advance_during_assembly = false;
            state.tip = tip_at(state.tip.height + 1);
        }

        state.created += 1;

        let coinbase = Transaction {
            version: transaction::Version::TWO,
            lock_time: LockTime::ZERO,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness: Witness::new(),
            }],
            output: vec![TxOut {
                value: state.coinbase_value,
                script_pubkey: script_pubkey.to_owned(),
            }],
        };

        let mut block = Block {
            header: Header {
                version: block::Version::from_consensus(0x2000_0000),
                prev_blockhash: state.tip.hash,
                merkle_root: TxMerkleNode::all_zeros(),
                time: u32::try_from(START_TIME).unwrap(),
                bits: state.bits,
                nonce: 0,
            },
            txdata: vec![coinbase],
        };

        block.header.merkle_root = block.compute_merkle_root()?;

        Some(NewBlock {
            tip: state.tip,
            block,
        })
    }

    fn process_new_block(&self, block: Arc<Block>) -> bool {
        let mut state = self.state.lock();

        let accepted = block.header.prev_blockhash == state.tip.hash && block.check_merkle_root();

        state.processed.push(Block::clone(&block));

        accepted
    }

    fn connection_count(&self) -> Option<usize> {
        self.state.lock().connections
    }

    fn is_initial_block_download(&self) -> bool {
        self.state.lock().initial_block_download
    }
}

/// Node whose block validation calls back into the miner, the way a node
/// notifies its own RPC layer while connecting a block.
pub(crate) struct ReentrantNode {
    pub(crate) inner: MockNode,
    miner: OnceLock<Weak<AuxpowMiner>>,
    seen_template_counts: Mutex<Vec<usize>>,
}

impl ReentrantNode {
    pub(crate) fn new() -> Self {
        Self {
            inner: MockNode::new(),
            miner: OnceLock::new(),
            seen_template_counts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn miner(self: &Arc<Self>) -> Arc<AuxpowMiner> {
        let miner = Arc::new(
            AuxpowMiner::new(self.clone(), MiningParams::default())
                .with_clock(Arc::new(MockClock::new(START_TIME))),
        );

        assert!(self.miner.set(Arc::downgrade(&miner)).is_ok());

        miner
    }

    pub(crate) fn seen_template_counts(&self) -> Vec<usize> {
        self.seen_template_counts.lock().clone()
    }
}

impl Node for ReentrantNode {
    fn tip(&self) -> Tip {
        self.inner.tip()
    }

    fn transactions_updated(&self) -> u64 {
        self.inner.transactions_updated()
    }

    fn create_new_block(&self, script_pubkey: &Script) -> Option<NewBlock> {
        self.inner.create_new_block(script_pubkey)
    }

    fn process_new_block(&self, block: Arc<Block>) -> bool {
        if let Some(miner) = self.miner.get().and_then(Weak::upgrade) {
            self.seen_template_counts
                .lock()
                .push(miner.template_count());
        }

        self.inner.process_new_block(block)
    }

    fn connection_count(&self) -> Option<usize> {
        self.inner.connection_count()
    }

    fn is_initial_block_download(&self) -> bool {
        self.inner.is_initial_block_download()
    }
}
