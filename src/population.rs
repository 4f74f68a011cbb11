//! Population handles.
//!
//! A [`Population`] names an ordered set of neurons on one host. It resolves
//! to a sequence of [`RemoteNeuron`] addresses when a connection is generated.
//!
//! # Examples
//!
//! ```
//! use connspec::{Population, RemoteNeuron};
//! use std::cell::Cell;
//!
//! let block = Population::range(0, 10, 3).unwrap();
//! assert_eq!(block.resolve(), vec![
//!     RemoteNeuron::new(0, 10),
//!     RemoteNeuron::new(0, 11),
//!     RemoteNeuron::new(0, 12),
//! ]);
//!
//! // Indices filled in by a later allocation step
//! let slots = vec![Cell::new(0), Cell::new(0)];
//! let pending = Population::indirect(1, &slots);
//! slots[0].set(40);
//! slots[1].set(41);
//! assert_eq!(pending.get(1), Some(RemoteNeuron::new(1, 41)));
//! ```

use crate::remote::{HostId, NeuronIndex, RemoteNeuron};
use crate::{ConnSpecError, Result};
use std::cell::Cell;

/// Ordered local indices making up a population.
#[derive(Debug, Clone, Copy)]
pub enum NodeSeq<'a> {
    /// `len` consecutive indices starting at `first`
    Range {
        /// First local index
        first: NeuronIndex,
        /// Number of neurons
        len: u32,
    },
    /// Explicit borrowed index list
    List(&'a [NeuronIndex]),
    /// Index slots written after the population was described
    Indirect(&'a [Cell<NeuronIndex>]),
}

impl NodeSeq<'_> {
    /// Number of neurons.
    pub fn len(&self) -> usize {
        match self {
            NodeSeq::Range { len, .. } => *len as usize,
            NodeSeq::List(indices) => indices.len(),
            NodeSeq::Indirect(slots) => slots.len(),
        }
    }

    /// Whether the sequence has no neurons.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Local index at position `i`, read now for indirect slots.
    pub fn get(&self, i: usize) -> Option<NeuronIndex> {
        match self {
            NodeSeq::Range { first, len } => {
                if i < *len as usize {
                    first.checked_add(i as u32)
                } else {
                    None
                }
            }
            NodeSeq::List(indices) => indices.get(i).copied(),
            NodeSeq::Indirect(slots) => slots.get(i).map(Cell::get),
        }
    }
}

/// Neurons on one host, addressed through a [`NodeSeq`].
#[derive(Debug, Clone, Copy)]
pub struct Population<'a> {
    host_id: HostId,
    nodes: NodeSeq<'a>,
}

impl<'a> Population<'a> {
    /// Contiguous block `first..first + len` on `host_id`.
    ///
    /// Fails with `InvalidArgument` if the block runs past `u32::MAX`.
    pub fn range(host_id: HostId, first: NeuronIndex, len: u32) -> Result<Self> {
        if len > 0 && first.checked_add(len - 1).is_none() {
            return Err(ConnSpecError::InvalidArgument(format!(
                "range {}+{} overflows the neuron index space",
                first, len
            )));
        }
        Ok(Self {
            host_id,
            nodes: NodeSeq::Range { first, len },
        })
    }

    /// Explicit list of local indices on `host_id`.
    pub fn list(host_id: HostId, indices: &'a [NeuronIndex]) -> Self {
        Self {
            host_id,
            nodes: NodeSeq::List(indices),
        }
    }

    /// Index slots on `host_id` that an allocation step fills in later.
    pub fn indirect(host_id: HostId, slots: &'a [Cell<NeuronIndex>]) -> Self {
        Self {
            host_id,
            nodes: NodeSeq::Indirect(slots),
        }
    }

    /// Owning host.
    #[inline]
    pub fn host_id(&self) -> HostId {
        self.host_id
    }

    /// Underlying index sequence.
    #[inline]
    pub fn nodes(&self) -> &NodeSeq<'a> {
        &self.nodes
    }

    /// Number of neurons.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the population is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Address of the neuron at position `i`.
    pub fn get(&self, i: usize) -> Option<RemoteNeuron> {
        self.nodes
            .get(i)
            .map(|index| RemoteNeuron::new(self.host_id, index))
    }

    /// Iterate over addresses in order.
    pub fn iter(&self) -> impl Iterator<Item = RemoteNeuron> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Snapshot every address. Indirect slots are read once, here.
    pub fn resolve(&self) -> Vec<RemoteNeuron> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        let pop = Population::range(2, 5, 4).unwrap();
        assert_eq!(pop.len(), 4);
        assert_eq!(pop.host_id(), 2);
        assert_eq!(pop.get(0), Some(RemoteNeuron::new(2, 5)));
        assert_eq!(pop.get(3), Some(RemoteNeuron::new(2, 8)));
        assert_eq!(pop.get(4), None);
    }

    #[test]
    fn test_range_overflow() {
        assert!(Population::range(0, u32::MAX, 1).is_ok());
        assert!(Population::range(0, u32::MAX, 2).is_err());
        assert!(Population::range(0, u32::MAX, 0).unwrap().is_empty());
    }

    #[test]
    fn test_list_keeps_order() {
        let indices = [9, 3, 7];
        let pop = Population::list(1, &indices);
        let idx: Vec<_> = pop.iter().map(|n| n.neuron_index()).collect();
        assert_eq!(idx, vec![9, 3, 7]);
    }

    #[test]
    fn test_indirect_reads_at_resolve() {
        let slots: Vec<Cell<u32>> = (0..3).map(|_| Cell::new(0)).collect();
        let pop = Population::indirect(0, &slots);
        assert_eq!(pop.resolve(), vec![RemoteNeuron::new(0, 0); 3]);

        for (i, slot) in slots.iter().enumerate() {
            slot.set(100 + i as u32);
        }
        let idx: Vec<_> = pop.resolve().iter().map(|n| n.neuron_index()).collect();
        assert_eq!(idx, vec![100, 101, 102]);
    }
}
