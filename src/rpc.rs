use {super::*, serde::de::DeserializeOwned};

/// JSON-RPC error object returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for RpcError {}

impl From<MiningError> for RpcError {
    fn from(err: MiningError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Maps the node's mining RPC methods onto an [`AuxpowMiner`].
pub struct Rpc {
    miner: Arc<AuxpowMiner>,
    chain: Chain,
    work_script_pubkey: Option<ScriptBuf>,
}

impl Rpc {
    pub fn new(miner: Arc<AuxpowMiner>, settings: &Settings) -> Result<Self> {
        Ok(Self {
            miner,
            chain: settings.chain(),
            work_script_pubkey: settings.work_script_pubkey()?,
        })
    }

    pub fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        debug!("RPC {method} {params}");

        match method {
            "createauxblock" => {
                let (address,) = parse_params::<(String,)>(method, params)?;
                let script_pubkey = self.script_pubkey(&address)?;
                to_value(self.miner.create_aux_block(&script_pubkey)?)
            }
            "submitauxblock" => {
                let (hash, auxpow) = parse_params::<(String, String)>(method, params)?;
                Ok(Value::Bool(self.miner.submit_aux_block(&hash, &auxpow)?))
            }
            "creatework" => {
                let (address,) = parse_params::<(String,)>(method, params)?;
                let script_pubkey = self.script_pubkey(&address)?;
                to_value(self.miner.create_work(&script_pubkey)?)
            }
            "submitwork" => {
                let (data,) = parse_params::<(String,)>(method, params)?;
                Ok(Value::Bool(self.miner.submit_work(&data)?))
            }
            "getwork" => {
                let params = parse_params::<Vec<String>>(method, params)?;

                match params.as_slice() {
                    [] => {
                        let script_pubkey = self.work_script_pubkey.as_ref().ok_or_else(|| {
                            RpcError::new(code::INVALID_PARAMETER, "no work address configured")
                        })?;
                        to_value(self.miner.create_work(script_pubkey)?)
                    }
                    [data] => Ok(Value::Bool(self.miner.submit_work(data)?)),
                    _ => Err(RpcError::new(
                        code::INVALID_PARAMS,
                        format!("{method} takes at most one parameter"),
                    )),
                }
            }
            method => {
                warn!("Unknown RPC method {method}");
                Err(RpcError::new(
                    code::METHOD_NOT_FOUND,
                    format!("Method not found: {method}"),
                ))
            }
        }
    }

    fn script_pubkey(&self, address: &str) -> Result<ScriptBuf, RpcError> {
        self.chain
            .address(address)
            .map(|address| address.script_pubkey())
            .map_err(|err| {
                RpcError::new(
                    code::INVALID_ADDRESS_OR_KEY,
                    format!("Invalid coinbase payout address: {err}"),
                )
            })
    }
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, RpcError> {
    let params = match params {
        Value::Null => json!([]),
        params => params,
    };

    serde_json::from_value(params).map_err(|err| {
        RpcError::new(
            code::INVALID_PARAMS,
            format!("invalid params for {method}: {err}"),
        )
    })
}

fn to_value<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|err| RpcError::new(code::INTERNAL_ERROR, err.to_string()))
}
