//! ConnectionGenerator - Host-side connection generation.
//!
//! This module turns a [`ConnSpec`], a [`SynSpec`] and two populations into a
//! list of [`Connection`] records. It is the reference for what a device
//! routine must produce for the same inputs.
//!
//! # Ordering
//!
//! Connection `i` takes `weight_array[i]` / `delay_array[i]` in distribution
//! mode, so the order is part of the contract:
//!
//! - `one_to_one`: source `i` to target `i`
//! - `all_to_all`: target-major, every source for target 0, then target 1, ...
//! - `fixed_total_number`: sampled pairs in target-major flat-index order
//! - `fixed_indegree`: for each target in order, its `indegree` sources
//! - `fixed_outdegree`: for each source in order, its `outdegree` targets
//!
//! All sampled rules draw without replacement.
//!
//! # Examples
//!
//! ```
//! use connspec::{ConnRule, ConnSpec, ConnectionGenerator, HostLayout, Population, SynSpec};
//!
//! # fn main() -> connspec::Result<()> {
//! let mut gen = ConnectionGenerator::new(HostLayout::single(200), 42);
//! let src = Population::range(0, 0, 100)?;
//! let tgt = Population::range(0, 100, 100)?;
//!
//! let conns = gen.connect(
//!     &src,
//!     &tgt,
//!     &ConnSpec::with_rule(ConnRule::FixedIndegree, 10),
//!     &SynSpec::with_weight_delay(0.5, 1.0),
//! )?;
//! assert_eq!(conns.len(), 1000);
//! # Ok(())
//! # }
//! ```

use crate::conn_spec::{ConnRule, ConnSpec};
use crate::host::HostLayout;
use crate::population::Population;
use crate::remote::RemoteNeuron;
use crate::syn_spec::{SynSpec, SynapseType, ValueSource};
use crate::{ConnSpecError, Result};
use itertools::iproduct;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// One generated synapse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Presynaptic neuron
    pub source: RemoteNeuron,
    /// Postsynaptic neuron
    pub target: RemoteNeuron,
    /// Synaptic weight
    pub weight: f32,
    /// Transmission delay
    pub delay: f32,
    /// Postsynaptic receptor port
    pub receptor: u8,
    /// Synapse model
    pub synapse_type: SynapseType,
}

/// Generates connections against a fixed host layout.
///
/// Randomness comes from a seeded `StdRng`; two generators built with the
/// same seed produce identical connections for identical calls.
pub struct ConnectionGenerator {
    layout: HostLayout,
    rng: StdRng,
    seed: u64,
}

impl ConnectionGenerator {
    /// Create a generator for `layout` seeded with `seed`.
    pub fn new(layout: HostLayout, seed: u64) -> Self {
        Self {
            layout,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Host layout addresses are checked against.
    #[inline]
    pub fn layout(&self) -> &HostLayout {
        &self.layout
    }

    /// Seed the generator was created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the random stream from the original seed.
    pub fn reset_rng(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Connect `source` to `target` following `conn`, with synapse
    /// properties from `syn`.
    ///
    /// Indirect populations are read once at the start of the call. Every
    /// address is checked against the layout before anything is generated,
    /// and per-connection arrays must hold exactly one value per connection.
    pub fn connect(
        &mut self,
        source: &Population<'_>,
        target: &Population<'_>,
        conn: &ConnSpec,
        syn: &SynSpec<'_>,
    ) -> Result<Vec<Connection>> {
        let sources = source.resolve();
        let targets = target.resolve();
        for neuron in sources.iter().chain(targets.iter()) {
            self.layout.check(neuron)?;
        }

        let n_conn = conn.connection_count(sources.len(), targets.len())?;
        let weight = syn.weight_source();
        let delay = syn.delay_source();
        check_len("weight_array", &weight, n_conn)?;
        check_len("delay_array", &delay, n_conn)?;

        let pairs = self.pairs(conn, sources.len(), targets.len());
        debug_assert_eq!(pairs.len(), n_conn);

        let conns: Vec<Connection> = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (s, t))| Connection {
                source: sources[s],
                target: targets[t],
                weight: weight.at(i),
                delay: delay.at(i),
                receptor: syn.receptor(),
                synapse_type: syn.synapse_type(),
            })
            .collect();

        tracing::debug!(
            rule = %conn.rule(),
            n_source = sources.len(),
            n_target = targets.len(),
            n_conn = conns.len(),
            source_host = source.host_id(),
            target_host = target.host_id(),
            "generated connections"
        );
        Ok(conns)
    }

    /// `(source position, target position)` pairs in output order.
    ///
    /// Sizes have already been validated by `connection_count`.
    fn pairs(&mut self, conn: &ConnSpec, n_source: usize, n_target: usize) -> Vec<(usize, usize)> {
        match conn.rule() {
            ConnRule::OneToOne => (0..n_source).map(|i| (i, i)).collect(),
            ConnRule::AllToAll => iproduct!(0..n_target, 0..n_source)
                .map(|(t, s)| (s, t))
                .collect(),
            ConnRule::FixedTotalNumber => {
                let mut flat = index::sample(&mut self.rng, n_source * n_target, conn.total_num())
                    .into_vec();
                flat.sort_unstable();
                flat.into_iter()
                    .map(|k| (k % n_source, k / n_source))
                    .collect()
            }
            ConnRule::FixedIndegree => {
                let k = conn.indegree();
                let mut pairs = Vec::with_capacity(k * n_target);
                for t in 0..n_target {
                    for s in index::sample(&mut self.rng, n_source, k) {
                        pairs.push((s, t));
                    }
                }
                pairs
            }
            ConnRule::FixedOutdegree => {
                let k = conn.outdegree();
                let mut pairs = Vec::with_capacity(k * n_source);
                for s in 0..n_source {
                    for t in index::sample(&mut self.rng, n_target, k) {
                        pairs.push((s, t));
                    }
                }
                pairs
            }
        }
    }
}

fn check_len(param: &'static str, source: &ValueSource<'_>, expected: usize) -> Result<()> {
    match source {
        ValueSource::Distribution(values) if values.len() != expected => {
            Err(ConnSpecError::ArraySizeMismatch {
                param,
                expected,
                actual: values.len(),
            })
        }
        _ => Ok(()),
    }
}
