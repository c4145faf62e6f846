//! Bridge configuration document
//!
//! Only the fields the harness rewrites are typed. Everything else at each
//! level lands in an ordered `extra` map and is written back untouched, so a
//! baseline survives load → rewrite → persist without losing settings this
//! crate knows nothing about.
//!
//! A config parsed with [`BridgeConfig::from_json`] remembers the document it
//! came from and serializes back in that document's key order.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Unmodelled fields kept verbatim
pub type ExtraFields = Map<String, Value>;

/// Root of the bridge config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub l1_config: L1Config,
    pub l2_config: L2Config,
    pub db_config: DbConfig,
    #[serde(flatten)]
    pub extra: ExtraFields,
    /// Source document, used only as the key order template on output
    #[serde(skip)]
    layout: Option<Value>,
}

/// L1 chain side: watches L1 and relays into L2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L1Config {
    pub confirmations: BlockNumber,
    pub endpoint: String,
    pub l1_message_queue_address: String,
    pub rollup_contract_address: String,
    pub l1_messenger_address: String,
    pub relayer_config: RelayerConfig,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// L2 chain side: watches L2 and relays into L1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L2Config {
    pub confirmations: BlockNumber,
    pub endpoint: String,
    pub l2_message_queue_address: String,
    pub l2_messenger_address: String,
    pub relayer_config: RelayerConfig,
    pub batch_proposer_config: BatchProposerConfig,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Relayer embedded in a chain side; its addresses live on the other chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayerConfig {
    pub messenger_contract_address: String,
    pub gas_price_oracle_contract_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_contract_address: Option<String>,
    pub sender_config: SenderConfig,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Transaction sender used by a relayer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderConfig {
    pub endpoint: String,
    pub confirmations: BlockNumber,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchProposerConfig {
    pub commit_tx_calldata_size_limit: u64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbConfig {
    pub dsn: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl BridgeConfig {
    /// Parse a config document, remembering its key order
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let document: Value = serde_json::from_str(content)?;
        let mut cfg: Self = serde_json::from_value(document.clone())?;
        cfg.layout = Some(document);
        Ok(cfg)
    }

    /// JSON tree in the source document's key order
    ///
    /// Keys the source did not have (e.g. a rollup address added by the
    /// rewrite) follow the known ones.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Some(layout) = &self.layout {
            follow_layout(&mut value, layout);
        }
        Ok(value)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_value()?)
    }
}

impl PartialEq for BridgeConfig {
    fn eq(&self, other: &Self) -> bool {
        self.l1_config == other.l1_config
            && self.l2_config == other.l2_config
            && self.db_config == other.db_config
            && self.extra == other.extra
    }
}

fn follow_layout(value: &mut Value, layout: &Value) {
    let (Value::Object(map), Value::Object(template)) = (value, layout) else {
        return;
    };

    let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
    // stable: keys missing from the template keep their relative order at the end
    entries.sort_by_key(|(key, _)| template.keys().position(|known| known == key).unwrap_or(usize::MAX));

    for (key, child) in entries.iter_mut() {
        if let Some(child_layout) = template.get(key.as_str()) {
            follow_layout(child, child_layout);
        }
    }
    *map = entries.into_iter().collect();
}

/// Block height or symbolic block tag, as the workers' config reads it
///
/// Heights are accepted as an integer, a decimal string or a `0x` hex
/// string and always written back as `0x` hex. Tags round-trip as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockNumber {
    Number(u64),
    Earliest,
    Latest,
    Pending,
    Safe,
    Finalized,
}

impl BlockNumber {
    /// No confirmation wait
    pub const ZERO: BlockNumber = BlockNumber::Number(0);

    fn tag(&self) -> Option<&'static str> {
        match self {
            BlockNumber::Number(_) => None,
            BlockNumber::Earliest => Some("earliest"),
            BlockNumber::Latest => Some("latest"),
            BlockNumber::Pending => Some("pending"),
            BlockNumber::Safe => Some("safe"),
            BlockNumber::Finalized => Some("finalized"),
        }
    }
}

impl From<u64> for BlockNumber {
    fn from(n: u64) -> Self {
        BlockNumber::Number(n)
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockNumber::Number(n) => write!(f, "{n:#x}"),
            tagged => f.write_str(tagged.tag().unwrap_or_default()),
        }
    }
}

impl FromStr for BlockNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let tagged = match text {
            "earliest" => Some(BlockNumber::Earliest),
            "latest" => Some(BlockNumber::Latest),
            "pending" => Some(BlockNumber::Pending),
            "safe" => Some(BlockNumber::Safe),
            "finalized" => Some(BlockNumber::Finalized),
            _ => None,
        };
        if let Some(block) = tagged {
            return Ok(block);
        }

        let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => text.parse::<u64>(),
        };
        parsed
            .map(BlockNumber::Number)
            .map_err(|e| format!("invalid block number {text:?}: {e}"))
    }
}

impl Serialize for BlockNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(BlockNumber::Number(n)),
            Raw::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}
