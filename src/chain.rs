use super::*;

#[derive(
    Default, ValueEnum, Copy, Clone, Debug, PartialEq, Eq, DeserializeFromStr, SerializeDisplay,
)]
pub enum Chain {
    #[default]
    Mainnet,
    Testnet,
    Testnet4,
    Signet,
    Regtest,
}

impl Chain {
    pub fn network(self) -> Network {
        match self {
            Self::Mainnet => Network::Bitcoin,
            Self::Testnet => Network::Testnet,
            Self::Testnet4 => Network::Testnet4,
            Self::Signet => Network::Signet,
            Self::Regtest => Network::Regtest,
        }
    }

    /// Regtest blocks are mined on request, without peers.
    pub fn mine_blocks_on_demand(self) -> bool {
        self == Self::Regtest
    }

    pub fn address(self, address: &str) -> Result<Address> {
        Ok(address
            .parse::<Address<NetworkUnchecked>>()
            .map_err(|err| anyhow!("invalid address `{address}`: {err}"))?
            .require_network(self.network())
            .map_err(|err| anyhow!("address `{address}` not valid for {self}: {err}"))?)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Mainnet => "mainnet",
                Self::Testnet => "testnet",
                Self::Testnet4 => "testnet4",
                Self::Signet => "signet",
                Self::Regtest => "regtest",
            }
        )
    }
}

impl FromStr for Chain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "testnet4" => Ok(Self::Testnet4),
            "signet" => Ok(Self::Signet),
            "regtest" => Ok(Self::Regtest),
            _ => bail!("invalid chain `{s}`"),
        }
    }
}
