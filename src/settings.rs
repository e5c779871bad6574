use {super::*, anyhow::Context};

const CONFIG_FILE: &str = "auxminer.toml";
const ENV_PREFIX: &str = "AUXMINER_";

/// TOML config file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub chain: Option<Chain>,
    pub auxpow_chain_id: Option<i32>,
    pub mine_blocks_on_demand: Option<bool>,
    pub update_interval: Option<u64>,
    pub aux_algorithm: Option<Algorithm>,
    pub work_algorithm: Option<Algorithm>,
    pub work_address: Option<String>,
}

/// Resolved configuration, from highest to lowest priority: command line
/// options, `AUXMINER_` environment variables, config file, defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Settings {
    pub chain: Option<Chain>,
    pub config: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub auxpow_chain_id: Option<i32>,
    pub mine_blocks_on_demand: Option<bool>,
    pub update_interval: Option<u64>,
    pub aux_algorithm: Option<Algorithm>,
    pub work_algorithm: Option<Algorithm>,
    pub work_address: Option<String>,
}

impl Settings {
    /// Load settings from all sources with proper priority
    pub fn load(options: Options) -> Result<Self> {
        let mut env = BTreeMap::<String, String>::new();

        for (var, value) in std::env::vars_os() {
            let Some(var) = var.to_str() else {
                continue;
            };

            let Some(key) = var.strip_prefix(ENV_PREFIX) else {
                continue;
            };

            env.insert(
                key.into(),
                value.into_string().map_err(|value| {
                    anyhow!(
                        "environment variable `{var}` not valid unicode: `{}`",
                        value.to_string_lossy()
                    )
                })?,
            );
        }

        Self::merge(options, env)
    }

    pub fn merge(options: Options, env: BTreeMap<String, String>) -> Result<Self> {
        let settings = Self::from_options(&options);

        let settings = settings.or(Self::from_env(&env)?);

        let config = match Self::find_config_path(&settings) {
            Some(config_path) => toml::from_str(
                &fs::read_to_string(&config_path).with_context(|| {
                    format!("failed to open config file `{}`", config_path.display())
                })?,
            )
            .with_context(|| {
                format!(
                    "failed to deserialize config file `{}`",
                    config_path.display()
                )
            })?,
            None => Config::default(),
        };

        let settings = settings.or(Self::from_config(&config));

        let settings = settings.or_defaults();

        settings.validate()?;

        Ok(settings)
    }

    fn find_config_path(settings: &Self) -> Option<PathBuf> {
        if let Some(path) = &settings.config {
            return Some(path.clone());
        }

        if let Some(dir) = &settings.config_dir {
            let path = dir.join(CONFIG_FILE);
            if path.exists() {
                return Some(path);
            }
        }

        dirs::config_dir()
            .map(|dir| dir.join("auxminer").join(CONFIG_FILE))
            .filter(|path| path.exists())
    }

    pub fn from_options(options: &Options) -> Self {
        Self {
            chain: options
                .signet
                .then_some(Chain::Signet)
                .or(options.regtest.then_some(Chain::Regtest))
                .or(options.testnet.then_some(Chain::Testnet))
                .or(options.testnet4.then_some(Chain::Testnet4))
                .or(options.chain),
            config: options.config.clone(),
            config_dir: options.config_dir.clone(),
            auxpow_chain_id: options.auxpow_chain_id,
            mine_blocks_on_demand: options.mine_blocks_on_demand.then_some(true),
            update_interval: options.update_interval,
            aux_algorithm: options.aux_algorithm,
            work_algorithm: options.work_algorithm,
            work_address: options.work_address.clone(),
        }
    }

    pub fn from_env(env: &BTreeMap<String, String>) -> Result<Self> {
        fn get<T>(env: &BTreeMap<String, String>, key: &str) -> Result<Option<T>>
        where
            T: FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            env.get(key)
                .map(|value| value.parse::<T>())
                .transpose()
                .with_context(|| format!("failed to parse environment variable {ENV_PREFIX}{key}"))
        }

        let get_bool = |key: &str| {
            env.get(key)
                .map(|value| !value.is_empty() && value != "0" && value.to_lowercase() != "false")
        };

        let get_parsed = |key: &str| -> Result<Option<Algorithm>> {
            env.get(key)
                .map(|value| value.parse::<Algorithm>())
                .transpose()
                .with_context(|| format!("failed to parse environment variable {ENV_PREFIX}{key}"))
        };

        Ok(Self {
            chain: env
                .get("CHAIN")
                .map(|chain| chain.parse::<Chain>())
                .transpose()
                .with_context(|| format!("failed to parse environment variable {ENV_PREFIX}CHAIN"))?,
            config: env.get("CONFIG").map(PathBuf::from),
            config_dir: env.get("CONFIG_DIR").map(PathBuf::from),
            auxpow_chain_id: get(env, "AUXPOW_CHAIN_ID")?,
            mine_blocks_on_demand: get_bool("MINE_BLOCKS_ON_DEMAND"),
            update_interval: get(env, "UPDATE_INTERVAL")?,
            aux_algorithm: get_parsed("AUX_ALGORITHM")?,
            work_algorithm: get_parsed("WORK_ALGORITHM")?,
            work_address: env.get("WORK_ADDRESS").cloned(),
        })
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            chain: config.chain,
            auxpow_chain_id: config.auxpow_chain_id,
            mine_blocks_on_demand: config.mine_blocks_on_demand,
            update_interval: config.update_interval,
            aux_algorithm: config.aux_algorithm,
            work_algorithm: config.work_algorithm,
            work_address: config.work_address.clone(),
            ..Default::default()
        }
    }

    pub fn or(self, other: Self) -> Self {
        Self {
            chain: self.chain.or(other.chain),
            config: self.config.or(other.config),
            config_dir: self.config_dir.or(other.config_dir),
            auxpow_chain_id: self.auxpow_chain_id.or(other.auxpow_chain_id),
            mine_blocks_on_demand: self.mine_blocks_on_demand.or(other.mine_blocks_on_demand),
            update_interval: self.update_interval.or(other.update_interval),
            aux_algorithm: self.aux_algorithm.or(other.aux_algorithm),
            work_algorithm: self.work_algorithm.or(other.work_algorithm),
            work_address: self.work_address.or(other.work_address),
        }
    }

    fn or_defaults(self) -> Self {
        let chain = self.chain.unwrap_or_default();
        let defaults = MiningParams::default();

        Self {
            chain: Some(chain),
            auxpow_chain_id: self.auxpow_chain_id.or(Some(defaults.auxpow_chain_id)),
            mine_blocks_on_demand: self
                .mine_blocks_on_demand
                .or(Some(chain.mine_blocks_on_demand())),
            update_interval: self
                .update_interval
                .or(Some(defaults.update_interval.as_secs())),
            aux_algorithm: self.aux_algorithm.or(Some(defaults.aux_algorithm)),
            work_algorithm: self.work_algorithm.or(Some(defaults.work_algorithm)),
            ..self
        }
    }

    fn validate(&self) -> Result {
        if self.update_interval == Some(0) {
            bail!("update interval must be at least one second");
        }

        self.work_script_pubkey()?;

        Ok(())
    }

    pub fn chain(&self) -> Chain {
        self.chain.unwrap_or_default()
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_UPDATE_INTERVAL)
    }

    /// Payout script for work created without an explicit address.
    pub fn work_script_pubkey(&self) -> Result<Option<ScriptBuf>> {
        self.work_address
            .as_deref()
            .map(|address| {
                self.chain()
                    .address(address)
                    .map(|address| address.script_pubkey())
            })
            .transpose()
    }

    pub fn mining_params(&self) -> MiningParams {
        let defaults = MiningParams::default();

        MiningParams {
            auxpow_chain_id: self.auxpow_chain_id.unwrap_or(defaults.auxpow_chain_id),
            mine_blocks_on_demand: self
                .mine_blocks_on_demand
                .unwrap_or_else(|| self.chain().mine_blocks_on_demand()),
            update_interval: self.update_interval(),
            aux_algorithm: self.aux_algorithm.unwrap_or(defaults.aux_algorithm),
            work_algorithm: self.work_algorithm.unwrap_or(defaults.work_algorithm),
        }
    }
}
