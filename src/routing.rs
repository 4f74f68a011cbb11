//! Routing of generated connections across hosts.
//!
//! Connections are stored on the host that owns their target neuron. After
//! generation, a host keeps the connections whose target is local and ships
//! the rest to the owning hosts. Local connections with a source on another
//! host need that source's spikes imported; [`HostPartition::remote_sources`]
//! lists those neurons.

use crate::connect::Connection;
use crate::remote::{HostId, RemoteNeuron};
use std::collections::{BTreeMap, BTreeSet};

/// Generated connections split by the host that must store them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostPartition {
    this_host: HostId,
    local: Vec<Connection>,
    outbound: BTreeMap<HostId, Vec<Connection>>,
}

impl HostPartition {
    /// Split `conns` by target host, relative to `this_host`. Order within
    /// each group is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use connspec::{Connection, HostPartition, RemoteNeuron, SynapseType};
    ///
    /// let conn = |s: (u32, u32), t: (u32, u32)| Connection {
    ///     source: RemoteNeuron::new(s.0, s.1),
    ///     target: RemoteNeuron::new(t.0, t.1),
    ///     weight: 1.0,
    ///     delay: 1.0,
    ///     receptor: 0,
    ///     synapse_type: SynapseType::Standard,
    /// };
    ///
    /// let part = HostPartition::split(vec![conn((0, 0), (0, 1)), conn((1, 3), (0, 2)), conn((0, 0), (1, 5))], 0);
    /// assert_eq!(part.local().len(), 2);
    /// assert_eq!(part.outbound_to(1).len(), 1);
    /// assert_eq!(part.remote_sources(), vec![RemoteNeuron::new(1, 3)]);
    /// ```
    pub fn split(conns: impl IntoIterator<Item = Connection>, this_host: HostId) -> Self {
        let mut partition = Self {
            this_host,
            ..Self::default()
        };
        for conn in conns {
            if conn.target.is_local(this_host) {
                partition.local.push(conn);
            } else {
                partition
                    .outbound
                    .entry(conn.target.host_id())
                    .or_default()
                    .push(conn);
            }
        }
        tracing::debug!(
            this_host,
            local = partition.local.len(),
            remote_hosts = partition.outbound.len(),
            "partitioned connections"
        );
        partition
    }

    /// Host the partition was computed for.
    #[inline]
    pub fn this_host(&self) -> HostId {
        self.this_host
    }

    /// Connections stored on this host.
    #[inline]
    pub fn local(&self) -> &[Connection] {
        &self.local
    }

    /// Connections grouped by the remote host that stores them.
    #[inline]
    pub fn outbound(&self) -> &BTreeMap<HostId, Vec<Connection>> {
        &self.outbound
    }

    /// Connections to ship to `host_id` (empty if none).
    pub fn outbound_to(&self, host_id: HostId) -> &[Connection] {
        self.outbound
            .get(&host_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct remote sources of local connections, sorted.
    pub fn remote_sources(&self) -> Vec<RemoteNeuron> {
        self.local
            .iter()
            .map(|c| c.source)
            .filter(|s| !s.is_local(self.this_host))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Total number of connections across all groups.
    pub fn len(&self) -> usize {
        self.local.len() + self.outbound.values().map(Vec::len).sum::<usize>()
    }

    /// Whether the partition holds no connections.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
