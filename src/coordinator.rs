use {
    super::*,
    crate::{cache::TemplateCache, coinbase::increment_extra_nonce},
    snafu::{OptionExt, ResultExt},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningParams {
    pub auxpow_chain_id: i32,
    pub mine_blocks_on_demand: bool,
    pub update_interval: Duration,
    pub aux_algorithm: Algorithm,
    pub work_algorithm: Algorithm,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            auxpow_chain_id: DEFAULT_AUXPOW_CHAIN_ID,
            mine_blocks_on_demand: false,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            aux_algorithm: Algorithm::Sha256d,
            work_algorithm: Algorithm::Neoscrypt,
        }
    }
}

/// The template the encoders project, borrowed from the locked cache.
struct CurrentBlock<'a> {
    block: &'a Block,
    height: u64,
    target: U256,
}

/// Hands out merge-mining and legacy work templates and turns solutions
/// back into blocks for the node. Constructed once per node and shared
/// between RPC handlers.
pub struct AuxpowMiner {
    node: Arc<dyn Node>,
    clock: Arc<dyn Clock>,
    attacher: Box<dyn AuxpowAttacher>,
    params: MiningParams,
    cache: Mutex<TemplateCache>,
}

impl AuxpowMiner {
    pub fn new(node: Arc<dyn Node>, params: MiningParams) -> Self {
        Self {
            node,
            clock: Arc::new(SystemClock),
            attacher: Box::new(Unattached),
            params,
            cache: Mutex::new(TemplateCache::new()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_attacher(mut self, attacher: Box<dyn AuxpowAttacher>) -> Self {
        self.attacher = attacher;
        self
    }

    pub fn params(&self) -> &MiningParams {
        &self.params
    }

    /// Number of templates that can currently be submitted against.
    pub fn template_count(&self) -> usize {
        self.cache.lock().len()
    }

    /// Copy of a cached template.
    pub fn template(&self, hash: &BlockHash) -> Option<Block> {
        self.cache.lock().get(hash).cloned()
    }

    pub fn create_aux_block(&self, script_pubkey: &Script) -> Result<AuxBlock, MiningError> {
        self.check()?;

        let mut cache = self.cache.lock();
        let current = self.current_block(&mut cache, script_pubkey)?;
        let block = current.block;

        Ok(AuxBlock {
            hash: block.block_hash(),
            algo: self.params.aux_algorithm,
            chain_id: self.params.auxpow_chain_id,
            previous_block_hash: block.header.prev_blockhash,
            coinbase_value: coinbase::coinbase_value(block)?,
            bits: block.header.bits.into(),
            height: current.height,
            target: target_hex(current.target),
        })
    }

    pub fn create_work(&self, script_pubkey: &Script) -> Result<Work, MiningError> {
        self.check()?;

        let mut cache = self.cache.lock();
        let current = self.current_block(&mut cache, script_pubkey)?;
        let block = current.block;

        Ok(Work {
            data: hex::encode(auxpow::encode_work(&block.header)),
            algo: self.params.work_algorithm,
            previous_block_hash: block.header.prev_blockhash,
            coinbase_value: coinbase::coinbase_value(block)?,
            bits: block.header.bits.into(),
            height: current.height,
            target: target_hex(current.target),
        })
    }

    pub fn submit_aux_block(&self, hash_hex: &str, auxpow_hex: &str) -> Result<bool, MiningError> {
        self.check()?;

        let hash = BlockHash::from_str(hash_hex).map_err(|err| MiningError::InvalidParameter {
            message: format!("invalid block hash `{hash_hex}`: {err}"),
        })?;

        let mut block = self
            .cache
            .lock()
            .get(&hash)
            .cloned()
            .context(UnknownBlockHashSnafu { hash })
            .inspect_err(|_| warn!("Aux block submitted for unknown hash {hash}"))?;

        let auxpow = AuxPow::from_str(auxpow_hex).context(DecodeSnafu { what: "auxpow" })?;

        self.attacher.attach(&mut block, auxpow)?;

        let actual = block.block_hash();
        ensure!(
            actual == hash,
            HashMismatchSnafu {
                expected: hash,
                actual,
            }
        );

        Ok(self.process(block))
    }

    pub fn submit_work(&self, data_hex: &str) -> Result<bool, MiningError> {
        self.check()?;

        let data = hex::decode(data_hex).context(HexSnafu { what: "work data" })?;

        ensure!(
            data.len() >= HEADER_SIZE,
            InvalidDataSizeSnafu { size: data.len() }
        );

        let header = auxpow::decode_work(&data).context(DecodeSnafu {
            what: "work header",
        })?;

        let mut block = self
            .cache
            .lock()
            .get_by_merkle_root(&header.merkle_root)
            .cloned()
            .context(UnknownMerkleRootSnafu {
                merkle_root: header.merkle_root,
            })
            .inspect_err(|_| {
                warn!(
                    "Work submitted for unknown merkle root {}",
                    header.merkle_root
                )
            })?;

        block.header.nonce = header.nonce;

        let expected = header.block_hash();
        let actual = block.block_hash();
        ensure!(actual == expected, HashMismatchSnafu { expected, actual });

        Ok(self.process(block))
    }

    fn check(&self) -> Result<(), MiningError> {
        self.ready()
            .inspect_err(|err| warn!("Refusing mining request: {err}"))
    }

    fn ready(&self) -> Result<(), MiningError> {
        let connections = self.node.connection_count().context(P2pDisabledSnafu)?;

        ensure!(
            connections > 0 || self.params.mine_blocks_on_demand,
            NotConnectedSnafu
        );

        ensure!(
            !self.node.is_initial_block_download() || self.params.mine_blocks_on_demand,
            InitialBlockDownloadSnafu
        );

        Ok(())
    }

    /// Returns the current template, building a new one if the cached one is
    /// stale. Runs under the cache lock for its whole duration so concurrent
    /// callers cannot both rebuild.
    fn current_block<'a>(
        &self,
        cache: &'a mut TemplateCache,
        script_pubkey: &Script,
    ) -> Result<CurrentBlock<'a>, MiningError> {
        let tip = self.node.tip();
        let transactions_updated = self.node.transactions_updated();
        let now = self.clock.now();

        if cache.is_stale(&tip, transactions_updated, now, self.params.update_interval) {
            Self::clear_on_tip_change(cache, &tip);

            let NewBlock { tip, mut block } = self
                .node
                .create_new_block(script_pubkey)
                .context(OutOfMemorySnafu)?;

            ensure!(
                block.header.prev_blockhash == tip.hash,
                InvalidTemplateSnafu {
                    message: format!(
                        "block builds on {} but was reported for tip {}",
                        block.header.prev_blockhash, tip.hash
                    ),
                }
            );

            // the chain may have moved while the block was assembled
            Self::clear_on_tip_change(cache, &tip);

            let height = tip.height + 1;
            increment_extra_nonce(&mut block, height, cache.next_extra_nonce())?;

            let merkle_root = block.header.merkle_root;
            let hash = cache.insert(block, tip, transactions_updated, now);

            info!(
                "New block template {hash} for height {height} with merkle root {merkle_root} ({} cached)",
                cache.len()
            );
        } else {
            debug!("Reusing current block template");
        }

        let cache: &'a TemplateCache = cache;

        let height = cache.tip().map(|tip| tip.height + 1).unwrap_or_default();

        let block = cache.current().context(InvalidTemplateSnafu {
            message: "no current block template",
        })?;

        let target = decode_compact(block.header.bits)
            .into_target(block.header.bits)
            .context(InvalidDifficultySnafu)?;

        Ok(CurrentBlock {
            block,
            height,
            target,
        })
    }

    fn clear_on_tip_change(cache: &mut TemplateCache, tip: &Tip) {
        if cache.tip_changed(tip) && cache.len() > 0 {
            debug!(
                "Tip changed to {} at height {}, dropping {} templates",
                tip.hash,
                tip.height,
                cache.len()
            );
            cache.clear();
        }
    }

    fn process(&self, block: Block) -> bool {
        let hash = block.block_hash();
        let accepted = self.node.process_new_block(Arc::new(block));

        if accepted {
            info!("Block {hash} accepted");
        } else {
            warn!("Block {hash} rejected");
        }

        accepted
    }
}
