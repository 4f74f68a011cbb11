//! Remote neuron addressing.
//!
//! A neuron is identified by the host that owns it and its index local to
//! that host. The indirect form borrows an index slot that an allocation step
//! fills in after the address was built.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

/// Compute host identifier.
pub type HostId = u32;

/// Neuron index local to one host.
pub type NeuronIndex = u32;

/// A neuron addressed as `(host, local index)`.
///
/// # Examples
///
/// ```
/// use connspec::RemoteNeuron;
///
/// let n = RemoteNeuron::new(2, 17);
/// assert_eq!(n.host_id(), 2);
/// assert_eq!(n.neuron_index(), 17);
/// assert!(!n.is_local(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RemoteNeuron {
    host_id: HostId,
    neuron_index: NeuronIndex,
}

impl RemoteNeuron {
    /// Create an address.
    #[inline]
    pub const fn new(host_id: HostId, neuron_index: NeuronIndex) -> Self {
        Self {
            host_id,
            neuron_index,
        }
    }

    /// Owning host.
    #[inline]
    pub fn host_id(&self) -> HostId {
        self.host_id
    }

    /// Index local to the owning host.
    #[inline]
    pub fn neuron_index(&self) -> NeuronIndex {
        self.neuron_index
    }

    /// Whether this neuron lives on `this_host`.
    #[inline]
    pub fn is_local(&self, this_host: HostId) -> bool {
        self.host_id == this_host
    }
}

impl fmt::Display for RemoteNeuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host_id, self.neuron_index)
    }
}

/// A neuron address whose local index is read through a borrowed slot.
///
/// The slot is a `Cell` so the allocation layer can write the index after the
/// reference exists; [`resolve`](Self::resolve) reads whatever it holds at
/// that moment.
///
/// # Examples
///
/// ```
/// use connspec::RemoteNeuronRef;
/// use std::cell::Cell;
///
/// let slot = Cell::new(0);
/// let r = RemoteNeuronRef::new(1, &slot);
/// slot.set(42);
/// assert_eq!(r.resolve().neuron_index(), 42);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RemoteNeuronRef<'a> {
    host_id: HostId,
    neuron_index: &'a Cell<NeuronIndex>,
}

impl<'a> RemoteNeuronRef<'a> {
    /// Create an indirect address.
    pub fn new(host_id: HostId, neuron_index: &'a Cell<NeuronIndex>) -> Self {
        Self {
            host_id,
            neuron_index,
        }
    }

    /// Owning host.
    #[inline]
    pub fn host_id(&self) -> HostId {
        self.host_id
    }

    /// The borrowed index slot.
    #[inline]
    pub fn slot(&self) -> &'a Cell<NeuronIndex> {
        self.neuron_index
    }

    /// Snapshot the current index into a direct address.
    #[inline]
    pub fn resolve(&self) -> RemoteNeuron {
        RemoteNeuron::new(self.host_id, self.neuron_index.get())
    }
}
