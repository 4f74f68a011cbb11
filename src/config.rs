//! Connection configuration serialization.
//!
//! This module provides owned, serializable snapshots of a connection
//! request: the [`ConnSpec`] plus a [`SynSpecConfig`] standing in for the
//! borrowed [`SynSpec`]. Snapshots round-trip through JSON (serde_json) and
//! binary (bincode).
//!
//! Rule and synapse type names serialize with their canonical strings
//! (`"fixed_indegree"`, `"stdp"`, ...).
//!
//! # Example
//!
//! ```
//! use connspec::config::{ConnectConfig, SynSpecConfig, ValueConfig};
//! use connspec::{ConnRule, ConnSpec, SynapseType};
//!
//! # fn main() -> connspec::Result<()> {
//! let config = ConnectConfig::new(
//!     ConnSpec::with_rule(ConnRule::FixedIndegree, 4),
//!     SynSpecConfig {
//!         synapse_type: SynapseType::Stdp,
//!         receptor: 1,
//!         weight: ValueConfig::Distribution(vec![0.1, 0.2, 0.3, 0.4]),
//!         delay: ValueConfig::Scalar(1.5),
//!     },
//! )
//! .with_metadata("projection", "l4_to_l23");
//!
//! let json = config.to_json()?;
//! assert!(json.contains("\"fixed_indegree\""));
//! let restored = ConnectConfig::from_json(&json)?;
//! assert_eq!(restored, config);
//!
//! // Borrow the stored arrays back into a live spec
//! let syn = restored.syn.to_spec()?;
//! assert_eq!(syn.get_array_param("weight_array")?.map(|a| a.len()), Some(4));
//! # Ok(())
//! # }
//! ```

use crate::syn_spec::{ParamMode, SynSpec, SynapseType};
use crate::{ConnSpec, ConnSpecError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owned weight or delay setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ValueConfig {
    /// One value for every connection
    Scalar(f32),
    /// One value per connection
    Distribution(Vec<f32>),
}

impl Default for ValueConfig {
    fn default() -> Self {
        ValueConfig::Scalar(0.0)
    }
}

/// Owned counterpart of [`SynSpec`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SynSpecConfig {
    /// Synapse model
    pub synapse_type: SynapseType,
    /// Postsynaptic receptor port
    pub receptor: u8,
    /// Weight setting
    pub weight: ValueConfig,
    /// Delay setting
    pub delay: ValueConfig,
}

impl SynSpecConfig {
    /// Snapshot a live spec.
    ///
    /// Values in distribution mode are copied out of the borrowed arrays;
    /// the stale scalar behind them is not kept.
    pub fn from_spec(syn: &SynSpec<'_>) -> Result<Self> {
        let value = |mode: ParamMode, scalar: &str, array: &str| -> Result<ValueConfig> {
            Ok(match (mode, syn.get_array_param(array)?) {
                (ParamMode::Distribution, Some(values)) => ValueConfig::Distribution(values.to_vec()),
                _ => ValueConfig::Scalar(syn.get_float_param(scalar)?),
            })
        };
        Ok(Self {
            synapse_type: syn.synapse_type(),
            receptor: syn.receptor(),
            weight: value(syn.weight_mode(), "weight", "weight_array")?,
            delay: value(syn.delay_mode(), "delay", "delay_array")?,
        })
    }

    /// Build a live spec borrowing this snapshot's arrays.
    ///
    /// Goes through the named-parameter interface, so the same validation
    /// applies (finite scalars, non-empty arrays).
    pub fn to_spec(&self) -> Result<SynSpec<'_>> {
        let mut syn = SynSpec::new();
        syn.init_with_type(
            self.synapse_type as i64,
            0.0,
            0.0,
            i64::from(self.receptor),
        )?;
        for (value, scalar, array) in [
            (&self.weight, "weight", "weight_array"),
            (&self.delay, "delay", "delay_array"),
        ] {
            match value {
                ValueConfig::Scalar(v) => syn.set_float_param(scalar, *v)?,
                ValueConfig::Distribution(values) => syn.set_array_param(array, values)?,
            }
        }
        Ok(syn)
    }
}

/// Complete connection request: rule, synapse properties, metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectConfig {
    /// Version of the serialization format
    pub version: String,

    /// Connection rule
    pub conn: ConnSpec,

    /// Synapse properties
    pub syn: SynSpecConfig,

    /// Optional metadata (projection name, description, etc.)
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ConnectConfig {
    /// Create a configuration stamped with the crate version.
    pub fn new(conn: ConnSpec, syn: SynSpecConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            conn,
            syn,
            metadata: HashMap::new(),
        }
    }

    /// Snapshot a live pair of specs.
    pub fn from_specs(conn: &ConnSpec, syn: &SynSpec<'_>) -> Result<Self> {
        Ok(Self::new(*conn, SynSpecConfig::from_spec(syn)?))
    }

    /// Add metadata to the configuration.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConnSpecError::Other(e.to_string()))
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConnSpecError::Other(e.to_string()))
    }

    /// Serialize to binary (bincode).
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from binary (bincode).
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}
