use std::collections::HashMap;
use weightset::{WeightSet, WeightedEnum};

#[derive(Copy, Eq, PartialEq, Clone, Debug, Hash, PartialOrd, Ord, WeightedEnum)]
enum Rarity {
    #[weight(1)]
    Mythic,
    #[weight(10)]
    Legendary,
    #[weight(200)]
    Uncommon,
    #[weight(500)]
    Common,
}

fn print_hist(hist: HashMap<Rarity, u64>) {
    let mut values: Vec<(Rarity, u64)> = hist.into_iter().collect();
    values.sort_by(|(_, ca), (_, cb)| cb.cmp(ca));

    for (rarity, count) in values {
        println!("{count: >7} {rarity:?}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build straight from the enum:
    let mut table = Rarity::weight_set(0xDEAD_BEEF)?;

    // Or, if you want to mix arbitrary items with weights:
    let _custom: WeightSet<&'static str> =
        WeightSet::from_entries(7, [("sword", 1), ("shield", 3)])?;

    let mut hist: HashMap<Rarity, u64> = HashMap::default();
    for _ in 0..2_000_000 {
        *hist.entry(table.draw_owned().unwrap()).or_insert(0) += 1;
    }
    print_hist(hist);

    // The same table keeps drawing after membership changes: retire the
    // mythic tier and double the legendary odds.
    table.erase(&Rarity::Mythic);
    table.modify(&Rarity::Legendary, 20)?;

    println!("\nafter retiring Mythic and doubling Legendary:");
    let mut hist: HashMap<Rarity, u64> = HashMap::default();
    for _ in 0..2_000_000 {
        *hist.entry(table.draw_owned().unwrap()).or_insert(0) += 1;
    }
    print_hist(hist);

    Ok(())
}
