//! Host layout: which hosts exist and how many neurons each one owns.

use crate::remote::{HostId, RemoteNeuron};
use crate::{ConnSpecError, Result};
use serde::{Deserialize, Serialize};

/// Known hosts, their neuron counts, and the host this process runs on.
///
/// # Examples
///
/// ```
/// use connspec::{HostLayout, RemoteNeuron};
///
/// let layout = HostLayout::new(0, vec![100, 50]).unwrap();
/// assert!(layout.check(&RemoteNeuron::new(1, 49)).is_ok());
/// assert!(layout.check(&RemoteNeuron::new(1, 50)).is_err());
/// assert!(layout.check(&RemoteNeuron::new(2, 0)).is_err());
/// assert!(!layout.is_local(&RemoteNeuron::new(1, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HostLayoutRaw")]
pub struct HostLayout {
    this_host: HostId,
    neuron_counts: Vec<u32>,
}

/// Unchecked wire form, validated through [`HostLayout::new`].
#[derive(Deserialize)]
struct HostLayoutRaw {
    this_host: HostId,
    neuron_counts: Vec<u32>,
}

impl TryFrom<HostLayoutRaw> for HostLayout {
    type Error = ConnSpecError;

    fn try_from(raw: HostLayoutRaw) -> Result<Self> {
        Self::new(raw.this_host, raw.neuron_counts)
    }
}

impl HostLayout {
    /// Create a layout with one neuron count per host.
    pub fn new(this_host: HostId, neuron_counts: Vec<u32>) -> Result<Self> {
        if neuron_counts.is_empty() {
            return Err(ConnSpecError::InvalidArgument(
                "host layout needs at least one host".to_string(),
            ));
        }
        if this_host as usize >= neuron_counts.len() {
            return Err(ConnSpecError::UnknownHost {
                host_id: this_host,
                n_hosts: neuron_counts.len(),
            });
        }
        Ok(Self {
            this_host,
            neuron_counts,
        })
    }

    /// Single-host layout with `n_neurons` neurons on host 0.
    pub fn single(n_neurons: u32) -> Self {
        Self {
            this_host: 0,
            neuron_counts: vec![n_neurons],
        }
    }

    /// Host this process runs on.
    #[inline]
    pub fn this_host(&self) -> HostId {
        self.this_host
    }

    /// Number of hosts.
    #[inline]
    pub fn n_hosts(&self) -> usize {
        self.neuron_counts.len()
    }

    /// Neuron count of `host_id`.
    pub fn neuron_count(&self, host_id: HostId) -> Result<u32> {
        self.neuron_counts
            .get(host_id as usize)
            .copied()
            .ok_or(ConnSpecError::UnknownHost {
                host_id,
                n_hosts: self.neuron_counts.len(),
            })
    }

    /// Verify that `neuron` names an existing host and index.
    pub fn check(&self, neuron: &RemoteNeuron) -> Result<()> {
        let count = self.neuron_count(neuron.host_id())?;
        if neuron.neuron_index() >= count {
            return Err(ConnSpecError::NeuronOutOfRange {
                host_id: neuron.host_id(),
                neuron_index: neuron.neuron_index(),
                count,
            });
        }
        Ok(())
    }

    /// Whether `neuron` lives on this host.
    #[inline]
    pub fn is_local(&self, neuron: &RemoteNeuron) -> bool {
        neuron.is_local(self.this_host)
    }
}
