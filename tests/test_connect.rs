//! Integration tests for connection generation.
//!
//! Tests cover:
//! - End-to-end scenarios for each rule
//! - Degree invariants of sampled rules
//! - Per-connection weight/delay arrays
//! - Indirect populations and layout validation

use approx::assert_relative_eq;
use connspec::{
    ConnRule, ConnSpec, ConnSpecError, ConnectionGenerator, HostLayout, ParamMode, Population,
    SynSpec, SynapseType,
};
use proptest::prelude::*;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

#[test]
fn test_one_to_one_same_host() -> anyhow::Result<()> {
    let mut gen = ConnectionGenerator::new(HostLayout::single(200), 0);
    let src = Population::range(0, 0, 100)?;
    let tgt = Population::range(0, 100, 100)?;

    let conns = gen.connect(
        &src,
        &tgt,
        &ConnSpec::with_rule(ConnRule::OneToOne, 0),
        &SynSpec::with_weight_delay(1.0, 1.0),
    )?;

    assert_eq!(conns.len(), 100);
    for (i, c) in conns.iter().enumerate() {
        assert_eq!(c.source.neuron_index() as usize, i);
        assert_eq!(c.target.neuron_index() as usize, 100 + i);
        assert_eq!(c.source.host_id(), 0);
        assert_eq!(c.target.host_id(), 0);
    }
    Ok(())
}

#[test]
fn test_one_to_one_size_mismatch() -> anyhow::Result<()> {
    let mut gen = ConnectionGenerator::new(HostLayout::single(30), 0);
    let err = gen
        .connect(
            &Population::range(0, 0, 10)?,
            &Population::range(0, 10, 11)?,
            &ConnSpec::with_rule(ConnRule::OneToOne, 0),
            &SynSpec::new(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ConnSpecError::PopulationSizeMismatch {
            n_source: 10,
            n_target: 11
        }
    ));
    Ok(())
}

#[test]
fn test_fixed_outdegree_counts() -> anyhow::Result<()> {
    let mut gen = ConnectionGenerator::new(HostLayout::single(60), 11);
    let src = Population::range(0, 0, 10)?;
    let tgt = Population::range(0, 10, 50)?;

    let conns = gen.connect(
        &src,
        &tgt,
        &ConnSpec::with_rule(ConnRule::FixedOutdegree, 5),
        &SynSpec::new(),
    )?;

    assert_eq!(conns.len(), 50);
    let mut per_source: HashMap<u32, HashSet<u32>> = HashMap::new();
    for c in &conns {
        per_source
            .entry(c.source.neuron_index())
            .or_default()
            .insert(c.target.neuron_index());
    }
    assert_eq!(per_source.len(), 10);
    for targets in per_source.values() {
        assert_eq!(targets.len(), 5);
        assert!(targets.iter().all(|t| (10..60).contains(t)));
    }
    Ok(())
}

#[test]
fn test_all_to_all_dense() -> anyhow::Result<()> {
    let mut gen = ConnectionGenerator::new(HostLayout::single(12), 0);
    let conns = gen.connect(
        &Population::range(0, 0, 4)?,
        &Population::range(0, 4, 8)?,
        &ConnSpec::new(),
        &SynSpec::new(),
    )?;
    assert_eq!(conns.len(), 32);
    let unique: HashSet<_> = conns.iter().map(|c| (c.source, c.target)).collect();
    assert_eq!(unique.len(), 32);
    Ok(())
}

#[test]
fn test_fixed_indegree_equal_to_pool() -> anyhow::Result<()> {
    let mut gen = ConnectionGenerator::new(HostLayout::single(13), 5);
    let conns = gen.connect(
        &Population::range(0, 0, 10)?,
        &Population::range(0, 10, 3)?,
        &ConnSpec::with_rule(ConnRule::FixedIndegree, 10),
        &SynSpec::new(),
    )?;

    assert_eq!(conns.len(), 30);
    for t in 10..13 {
        let sources: HashSet<u32> = conns
            .iter()
            .filter(|c| c.target.neuron_index() == t)
            .map(|c| c.source.neuron_index())
            .collect();
        assert_eq!(sources, (0..10).collect::<HashSet<u32>>());
    }
    Ok(())
}

#[test]
fn test_fixed_indegree_over_pool_rejected() -> anyhow::Result<()> {
    let mut gen = ConnectionGenerator::new(HostLayout::single(13), 5);
    let result = gen.connect(
        &Population::range(0, 0, 10)?,
        &Population::range(0, 10, 3)?,
        &ConnSpec::with_rule(ConnRule::FixedIndegree, 11),
        &SynSpec::new(),
    );
    assert!(matches!(result, Err(ConnSpecError::InvalidArgument(_))));
    Ok(())
}

#[test]
fn test_synapse_properties_propagate() -> anyhow::Result<()> {
    let mut gen = ConnectionGenerator::new(HostLayout::single(4), 0);
    let syn = SynSpec::with_type(SynapseType::Stdp, 0.5, 1.2, 2);
    let conns = gen.connect(
        &Population::range(0, 0, 2)?,
        &Population::range(0, 2, 2)?,
        &ConnSpec::new(),
        &syn,
    )?;
    for c in &conns {
        assert_eq!(c.synapse_type, SynapseType::Stdp);
        assert_eq!(c.receptor, 2);
        assert_relative_eq!(c.weight, 0.5);
        assert_relative_eq!(c.delay, 1.2);
    }
    Ok(())
}

#[test]
fn test_distribution_arrays_follow_connection_order() -> anyhow::Result<()> {
    let weights: Vec<f32> = (0..6).map(|i| i as f32 * 0.1).collect();
    let delays: Vec<f32> = (0..6).map(|i| 1.0 + i as f32).collect();
    let mut syn = SynSpec::new();
    syn.set_array_param("weight_array", &weights)?;
    syn.set_array_param("delay_array", &delays)?;

    let mut gen = ConnectionGenerator::new(HostLayout::single(5), 0);
    let conns = gen.connect(
        &Population::range(0, 0, 2)?,
        &Population::range(0, 2, 3)?,
        &ConnSpec::new(),
        &syn,
    )?;

    for (i, c) in conns.iter().enumerate() {
        assert_relative_eq!(c.weight, weights[i]);
        assert_relative_eq!(c.delay, delays[i]);
    }
    // Target-major: the first two connections share target 2
    assert_eq!(conns[0].target.neuron_index(), 2);
    assert_eq!(conns[1].target.neuron_index(), 2);
    Ok(())
}

#[test]
fn test_scalar_after_array_ignores_array_length() -> anyhow::Result<()> {
    let weights = vec![1.0f32; 3];
    let mut syn = SynSpec::new();
    syn.set_array_param("weight_array", &weights)?;
    syn.set_float_param("weight", 2.0)?;
    assert_eq!(syn.weight_mode(), ParamMode::Scalar);

    // 4 connections would not match the 3-element array, but it is inactive
    let mut gen = ConnectionGenerator::new(HostLayout::single(4), 0);
    let conns = gen.connect(
        &Population::range(0, 0, 2)?,
        &Population::range(0, 2, 2)?,
        &ConnSpec::new(),
        &syn,
    )?;
    assert!(conns.iter().all(|c| c.weight == 2.0));
    Ok(())
}

#[test]
fn test_indirect_population_resolved_at_connect() -> anyhow::Result<()> {
    let slots: Vec<Cell<u32>> = (0..4).map(|_| Cell::new(0)).collect();
    let tgt = Population::indirect(0, &slots);
    let src = Population::range(0, 0, 4)?;

    // Allocation step fills the indices after the population was described
    for (i, slot) in slots.iter().enumerate() {
        slot.set(10 + i as u32);
    }

    let mut gen = ConnectionGenerator::new(HostLayout::single(20), 0);
    let conns = gen.connect(
        &src,
        &tgt,
        &ConnSpec::with_rule(ConnRule::OneToOne, 0),
        &SynSpec::new(),
    )?;
    let targets: Vec<u32> = conns.iter().map(|c| c.target.neuron_index()).collect();
    assert_eq!(targets, vec![10, 11, 12, 13]);
    Ok(())
}

#[test]
fn test_unknown_host_rejected() -> anyhow::Result<()> {
    let mut gen = ConnectionGenerator::new(HostLayout::new(0, vec![10, 10])?, 0);
    let result = gen.connect(
        &Population::range(0, 0, 2)?,
        &Population::range(2, 0, 2)?,
        &ConnSpec::new(),
        &SynSpec::new(),
    );
    assert!(matches!(
        result,
        Err(ConnSpecError::UnknownHost {
            host_id: 2,
            n_hosts: 2
        })
    ));
    Ok(())
}

#[test]
fn test_same_seed_same_connections() -> anyhow::Result<()> {
    let spec = ConnSpec::with_rule(ConnRule::FixedTotalNumber, 40);
    let run = |seed| -> anyhow::Result<Vec<connspec::Connection>> {
        let mut gen = ConnectionGenerator::new(HostLayout::single(40), seed);
        Ok(gen.connect(
            &Population::range(0, 0, 20)?,
            &Population::range(0, 20, 20)?,
            &spec,
            &SynSpec::new(),
        )?)
    };
    assert_eq!(run(3)?, run(3)?);
    assert_ne!(run(3)?, run(4)?);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fixed_indegree_distinct_sources(
        n_source in 1..40u32,
        n_target in 1..20u32,
        k_frac in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let k = ((n_source as f64) * k_frac).floor() as usize;
        let mut gen = ConnectionGenerator::new(HostLayout::single(n_source + n_target), seed);
        let conns = gen.connect(
            &Population::range(0, 0, n_source).unwrap(),
            &Population::range(0, n_source, n_target).unwrap(),
            &ConnSpec::with_rule(ConnRule::FixedIndegree, k),
            &SynSpec::new(),
        ).unwrap();

        prop_assert_eq!(conns.len(), k * n_target as usize);
        let mut per_target: HashMap<u32, HashSet<u32>> = HashMap::new();
        for c in &conns {
            prop_assert!(c.source.neuron_index() < n_source);
            let fresh = per_target
                .entry(c.target.neuron_index())
                .or_default()
                .insert(c.source.neuron_index());
            prop_assert!(fresh, "duplicate source for target {}", c.target.neuron_index());
        }
        for sources in per_target.values() {
            prop_assert_eq!(sources.len(), k);
        }
    }

    #[test]
    fn prop_fixed_total_number_exact(
        n_source in 1..30u32,
        n_target in 1..30u32,
        frac in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let pool = (n_source * n_target) as usize;
        let total = ((pool as f64) * frac).floor() as usize;
        let mut gen = ConnectionGenerator::new(HostLayout::single(n_source + n_target), seed);
        let conns = gen.connect(
            &Population::range(0, 0, n_source).unwrap(),
            &Population::range(0, n_source, n_target).unwrap(),
            &ConnSpec::with_rule(ConnRule::FixedTotalNumber, total),
            &SynSpec::new(),
        ).unwrap();

        prop_assert_eq!(conns.len(), total);
        let unique: HashSet<_> = conns.iter().map(|c| (c.source, c.target)).collect();
        prop_assert_eq!(unique.len(), total);
    }
}
