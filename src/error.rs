//! Error types for connection and synapse specifications.
//!
//! This module provides a unified error type for every fallible operation in
//! the crate, using the `thiserror` crate for ergonomic error handling.

use thiserror::Error;

/// The main error type for connspec operations.
///
/// `UnknownParameter` and `InvalidArgument` cover named-parameter validation.
/// The remaining variants are raised while resolving populations and
/// generating connections.
#[derive(Error, Debug)]
pub enum ConnSpecError {
    /// Parameter name is not recognized by the target object for this value kind
    #[error("Unknown parameter '{name}' for {target}")]
    UnknownParameter {
        /// Object that rejected the name (e.g. "connection spec")
        target: &'static str,
        /// The rejected parameter name
        name: String,
    },

    /// Value outside its legal domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Source and target populations must have equal size for this rule
    #[error("Population size mismatch: {n_source} sources, {n_target} targets")]
    PopulationSizeMismatch {
        /// Number of source neurons
        n_source: usize,
        /// Number of target neurons
        n_target: usize,
    },

    /// Per-connection array does not match the number of generated connections
    #[error("Array '{param}' has {actual} values, expected {expected}")]
    ArraySizeMismatch {
        /// Array parameter name
        param: &'static str,
        /// Number of connections the rule produces
        expected: usize,
        /// Length of the supplied array
        actual: usize,
    },

    /// Host id not present in the host layout
    #[error("Unknown host {host_id} (layout has {n_hosts} hosts)")]
    UnknownHost {
        /// The unresolvable host id
        host_id: u32,
        /// Number of hosts in the layout
        n_hosts: usize,
    },

    /// Neuron index not below the host's neuron count
    #[error("Neuron {neuron_index} out of range on host {host_id} ({count} neurons)")]
    NeuronOutOfRange {
        /// Host the neuron was addressed on
        host_id: u32,
        /// The out-of-range local index
        neuron_index: u32,
        /// Neuron count of that host
        count: u32,
    },

    /// Serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// A specialized `Result` type for connspec operations.
pub type Result<T> = std::result::Result<T, ConnSpecError>;
