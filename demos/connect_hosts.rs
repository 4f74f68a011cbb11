//! Example: Connect Populations Across Hosts
//!
//! Demonstrates how to:
//! 1. Describe a three-host layout
//! 2. Configure a fixed-indegree rule and an STDP synapse with per-connection weights
//! 3. Generate connections from a remote source population onto local targets
//! 4. Split the result into local and outbound connections
//! 5. Round-trip the configuration through JSON and binary snapshots

use connspec::{
    ConnRule, ConnSpec, ConnectConfig, ConnectionGenerator, HostLayout, HostPartition,
    Population, Result, SynSpec, SynapseType,
};

fn main() -> Result<()> {
    println!("=== Multi-Host Connection Example ===\n");

    // ========================================
    // PART 1: Layout and specs
    // ========================================
    println!("Part 1: Configuring layout and specs...");

    let layout = HostLayout::new(0, vec![200, 100, 50])?;
    println!("✓ {} hosts, running as host {}", layout.n_hosts(), layout.this_host());

    let mut conn = ConnSpec::new();
    conn.set_rule_by_name("fixed_indegree")?;
    conn.set_param("indegree", 4)?;

    let n_target = 20;
    let weights: Vec<f32> = (0..4 * n_target).map(|i| 0.1 + 0.01 * i as f32).collect();
    let mut syn = SynSpec::with_type(SynapseType::Stdp, 0.5, 1.2, 2);
    syn.set_array_param("weight_array", &weights)?;
    println!("✓ Rule {}, synapse {}", conn.rule(), syn.synapse_type());

    // ========================================
    // PART 2: Generate connections
    // ========================================
    println!("\nPart 2: Generating connections...");

    let mut gen = ConnectionGenerator::new(layout, 42);
    let remote_sources = Population::range(1, 0, 30)?;
    let local_targets = Population::range(0, 100, n_target as u32)?;
    let mut conns = gen.connect(&remote_sources, &local_targets, &conn, &syn)?;
    println!("✓ {} connections from host 1 onto host 0", conns.len());

    // Local sources onto host 2 become outbound traffic
    let local_sources = Population::range(0, 0, 10)?;
    let far_targets = Population::range(2, 0, 10)?;
    let one_to_one = ConnSpec::with_rule(ConnRule::OneToOne, 0);
    let plain = SynSpec::with_weight_delay(1.0, 2.0);
    conns.extend(gen.connect(&local_sources, &far_targets, &one_to_one, &plain)?);

    for c in conns.iter().take(3) {
        println!("  {} -> {} w={:.2} d={:.1}", c.source, c.target, c.weight, c.delay);
    }

    // ========================================
    // PART 3: Partition by host
    // ========================================
    println!("\nPart 3: Partitioning...");

    let partition = HostPartition::split(conns, gen.layout().this_host());
    println!("✓ {} local connections", partition.local().len());
    for (host_id, outbound) in partition.outbound() {
        println!("✓ {} connections outbound to host {}", outbound.len(), host_id);
    }
    println!(
        "✓ {} remote sources to import",
        partition.remote_sources().len()
    );

    // ========================================
    // PART 4: Snapshots
    // ========================================
    println!("\nPart 4: Saving configuration...");

    let config = ConnectConfig::from_specs(&conn, &syn)?
        .with_metadata("name", "host1_to_host0")
        .with_metadata("description", "fixed indegree with STDP weights");
    let json = config.to_json()?;
    let binary = config.to_binary()?;
    println!("✓ JSON: {} bytes, binary: {} bytes", json.len(), binary.len());

    let restored = ConnectConfig::from_binary(&binary)?;
    assert_eq!(restored, config);
    let restored_syn = restored.syn.to_spec()?;
    gen.reset_rng();
    let replay = gen.connect(&remote_sources, &local_targets, &restored.conn, &restored_syn)?;
    println!("✓ Restored snapshot regenerates {} connections", replay.len());

    println!("\n=== Example Complete ===");
    Ok(())
}
