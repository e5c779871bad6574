use super::*;

/// Command line options for the miner, meant to be flattened into the
/// node's own arguments.
#[derive(Clone, Default, Debug, Parser)]
#[command(group(
    clap::ArgGroup::new("chains")
        .required(false)
        .args(&["chain", "signet", "regtest", "testnet", "testnet4"]),
))]
pub struct Options {
    #[arg(long, help = "Load configuration from <CONFIG>.")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Load configuration from <CONFIG_DIR>/auxminer.toml.")]
    pub config_dir: Option<PathBuf>,

    #[arg(long = "chain", value_enum, help = "Use <CHAIN>. [default: mainnet]")]
    pub chain: Option<Chain>,

    #[arg(
        long,
        short = 's',
        help = "Use signet. Equivalent to `--chain signet`."
    )]
    pub signet: bool,

    #[arg(
        long,
        short = 'r',
        help = "Use regtest. Equivalent to `--chain regtest`."
    )]
    pub regtest: bool,

    #[arg(
        long,
        short = 't',
        help = "Use testnet. Equivalent to `--chain testnet`."
    )]
    pub testnet: bool,

    #[arg(long, help = "Use testnet4. Equivalent to `--chain testnet4`.")]
    pub testnet4: bool,

    #[arg(long, help = "Report <AUXPOW_CHAIN_ID> in merge-mining templates.")]
    pub auxpow_chain_id: Option<i32>,

    #[arg(
        long,
        help = "Hand out work without peers and during initial block download."
    )]
    pub mine_blocks_on_demand: bool,

    #[arg(
        long,
        help = "Rebuild templates for mempool changes at most every <UPDATE_INTERVAL> seconds."
    )]
    pub update_interval: Option<u64>,

    #[arg(long, value_enum, help = "Tag merge-mining templates with <AUX_ALGORITHM>.")]
    pub aux_algorithm: Option<Algorithm>,

    #[arg(long, value_enum, help = "Tag legacy work with <WORK_ALGORITHM>.")]
    pub work_algorithm: Option<Algorithm>,

    #[arg(long, help = "Pay legacy work created by `getwork` to <WORK_ADDRESS>.")]
    pub work_address: Option<String>,
}
