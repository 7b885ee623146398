use weightset::WeightSet;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut servers: WeightSet<&'static str> = WeightSet::new(2024);

    // Weights as capacity units; zero keeps a host in the pool but undrawable.
    servers.insert("alpha", 4)?;
    servers.insert("bravo", 2)?;
    servers.insert("charlie", 1)?;
    servers.insert("standby", 0)?;
    servers.refresh();

    println!(
        "pool of {} hosts, total weight {}",
        servers.len(),
        servers.total_weight()
    );
    for (host, weight) in servers.iter() {
        let p = servers.probability(host).unwrap();
        println!("  {host: >8} weight {weight} probability {p:.3}");
    }

    println!("\nrouting 20 requests:");
    for _ in 0..20 {
        print!("{} ", servers.draw().unwrap());
    }
    println!();

    // Batch membership changes, then pay one rebuild.
    servers.erase(&"charlie");
    servers.modify(&"standby", 3)?;
    servers.insert("delta", 2)?;
    servers.refresh();

    println!(
        "\nafter failover ({} hosts, total weight {}):",
        servers.len(),
        servers.total_weight()
    );
    for _ in 0..20 {
        print!("{} ", servers.draw().unwrap());
    }
    println!();

    Ok(())
}
