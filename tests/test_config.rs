//! Tests for configuration snapshots.
//!
//! Tests cover:
//! - JSON and binary round-trips
//! - Canonical names in serialized output
//! - Rebuilding live specs from snapshots

use approx::assert_relative_eq;
use connspec::{
    ConnRule, ConnSpec, ConnectConfig, ConnectionGenerator, HostLayout, ParamMode, Population,
    SynSpec, SynSpecConfig, SynapseType, ValueConfig,
};

fn sample_config() -> ConnectConfig {
    ConnectConfig::new(
        ConnSpec::with_rule(ConnRule::FixedTotalNumber, 6),
        SynSpecConfig {
            synapse_type: SynapseType::Stdp,
            receptor: 2,
            weight: ValueConfig::Distribution(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]),
            delay: ValueConfig::Scalar(1.2),
        },
    )
    .with_metadata("name", "exc_to_inh")
}

#[test]
fn test_config_json_round_trip() -> anyhow::Result<()> {
    let config = sample_config();
    let json = config.to_json()?;
    assert!(json.contains("\"fixed_total_number\""));
    assert!(json.contains("\"stdp\""));
    assert!(json.contains("exc_to_inh"));

    let restored = ConnectConfig::from_json(&json)?;
    assert_eq!(restored, config);
    Ok(())
}

#[test]
fn test_config_binary_round_trip() -> anyhow::Result<()> {
    let config = sample_config();
    let restored = ConnectConfig::from_binary(&config.to_binary()?)?;
    assert_eq!(restored, config);
    Ok(())
}

#[test]
fn test_config_invalid_json() {
    assert!(ConnectConfig::from_json("{\"conn\": 3}").is_err());
    let bad_rule = r#"{"version":"1.0.0","conn":{"rule":"pairwise","total_num":0,"indegree":0,"outdegree":0},
        "syn":{"synapse_type":"standard_synapse","receptor":0,"weight":{"scalar":0.0},"delay":{"scalar":1.0}}}"#;
    assert!(ConnectConfig::from_json(bad_rule).is_err());
}

#[test]
fn test_config_missing_metadata_defaults() -> anyhow::Result<()> {
    let json = r#"{"version":"1.0.0","conn":{"rule":"one_to_one","total_num":0,"indegree":0,"outdegree":0},
        "syn":{"synapse_type":"standard_synapse","receptor":0,"weight":{"scalar":0.5},"delay":{"scalar":1.0}}}"#;
    let config = ConnectConfig::from_json(json)?;
    assert!(config.metadata.is_empty());
    assert_eq!(config.conn.rule(), ConnRule::OneToOne);
    assert_eq!(config.syn.weight, ValueConfig::Scalar(0.5));
    Ok(())
}

#[test]
fn test_snapshot_of_live_specs() -> anyhow::Result<()> {
    let delays = vec![1.0f32, 2.0, 3.0];
    let mut syn = SynSpec::with_type(SynapseType::Standard, 0.8, 0.0, 1);
    syn.set_array_param("delay_array", &delays)?;

    let config = ConnectConfig::from_specs(&ConnSpec::with_rule(ConnRule::OneToOne, 0), &syn)?;
    assert_eq!(config.syn.weight, ValueConfig::Scalar(0.8));
    assert_eq!(config.syn.delay, ValueConfig::Distribution(delays.clone()));
    assert_eq!(config.syn.receptor, 1);
    Ok(())
}

#[test]
fn test_snapshot_drives_generation() -> anyhow::Result<()> {
    let config = ConnectConfig::from_json(&sample_config().to_json()?)?;
    let syn = config.syn.to_spec()?;
    assert_eq!(syn.weight_mode(), ParamMode::Distribution);
    assert_eq!(syn.receptor(), 2);

    let mut gen = ConnectionGenerator::new(HostLayout::single(8), 0);
    let conns = gen.connect(
        &Population::range(0, 0, 4)?,
        &Population::range(0, 4, 4)?,
        &config.conn,
        &syn,
    )?;
    assert_eq!(conns.len(), 6);
    for (c, w) in conns.iter().zip([0.1f32, 0.2, 0.3, 0.4, 0.5, 0.6]) {
        assert_relative_eq!(c.weight, w);
        assert_relative_eq!(c.delay, 1.2);
        assert_eq!(c.synapse_type, SynapseType::Stdp);
    }
    Ok(())
}
