//! Connspec - Connection rules and synapse specifications for multi-host
//! spiking neural network simulation.
//!
//! Connspec describes how neuron populations are wired together and how the
//! resulting synapses are parameterized. Specification objects are plain
//! values configured through a named-parameter interface, then handed to a
//! connection generator together with a source and a target population.
//!
//! # Architecture
//!
//! - **ConnSpec**: connection rule (`one_to_one`, `all_to_all`,
//!   `fixed_total_number`, `fixed_indegree`, `fixed_outdegree`) and its
//!   degree/count parameters
//! - **SynSpec**: synapse type, receptor port, and weight/delay given either
//!   as scalars or as borrowed per-connection arrays
//! - **RemoteNeuron**: `(host, local index)` addressing, with an indirect form
//!   whose index is filled in after construction
//! - **ParamTable**: static name tables validating every `set_param`/`get_param`
//! - **ConnectionGenerator**: host-side generation of connection records
//! - **HostPartition**: splitting generated connections by owning host
//!
//! # Examples
//!
//! ## Configuring specs by name
//!
//! ```
//! use connspec::{ConnSpec, SynSpec, ParamValue};
//!
//! let mut conn = ConnSpec::new();
//! conn.set_rule_by_name("fixed_outdegree").unwrap();
//! conn.set_param("outdegree", 5).unwrap();
//!
//! let mut syn = SynSpec::new();
//! syn.set_param("synapse_type", ParamValue::Int(1)).unwrap();
//! syn.set_param("weight", ParamValue::Float(0.5)).unwrap();
//! syn.set_param("delay", ParamValue::Float(1.2)).unwrap();
//!
//! assert_eq!(conn.get_param("outdegree").unwrap(), 5);
//! assert_eq!(syn.get_float_param("weight").unwrap(), 0.5);
//! ```
//!
//! ## Generating connections
//!
//! ```
//! use connspec::{ConnRule, ConnSpec, ConnectionGenerator, HostLayout, Population, SynSpec};
//!
//! # fn main() -> connspec::Result<()> {
//! let layout = HostLayout::new(0, vec![60, 40])?;
//! let mut gen = ConnectionGenerator::new(layout, 7);
//!
//! let local = Population::range(0, 0, 10)?;
//! let remote = Population::range(1, 0, 40)?;
//! let conns = gen.connect(
//!     &local,
//!     &remote,
//!     &ConnSpec::with_rule(ConnRule::FixedOutdegree, 5),
//!     &SynSpec::with_weight_delay(1.0, 2.0),
//! )?;
//! assert_eq!(conns.len(), 50);
//! assert!(conns.iter().all(|c| c.target.host_id() == 1));
//! # Ok(())
//! # }
//! ```
//!
//! # Borrowed arrays
//!
//! `SynSpec<'a>` borrows weight and delay arrays for `'a`. The buffer is
//! never copied, and the borrow checker keeps it alive and unmodified for as
//! long as the spec exists.

// Module declarations
pub mod error;
pub mod params;
pub mod remote;

pub mod conn_spec;
pub mod syn_spec;

pub mod connect;
pub mod host;
pub mod population;
pub mod routing;

pub mod config;

// Re-exports for convenient access
pub use error::{ConnSpecError, Result};
pub use params::{ParamKind, ParamTable, ParamValue};
pub use remote::{HostId, NeuronIndex, RemoteNeuron, RemoteNeuronRef};

pub use conn_spec::{ConnRule, ConnSpec, CONN_RULE_NAMES, N_CONN_RULE};
pub use syn_spec::{ParamMode, SynSpec, SynapseType, N_SYNAPSE_TYPE, SYNAPSE_TYPE_NAMES};

pub use connect::{Connection, ConnectionGenerator};
pub use host::HostLayout;
pub use population::{NodeSeq, Population};
pub use routing::HostPartition;

pub use config::{ConnectConfig, SynSpecConfig, ValueConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "Connspec";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
