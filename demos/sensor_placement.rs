use fixedbitset::FixedBitSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

fn generate_coverage(num_zones: usize, sensors_per_zone: usize, p_cover: f64, rng: &mut StdRng) -> Vec<FixedBitSet> {
    (0..sensors_per_zone * num_zones)
        .map(|_| {
            let mut coverage = FixedBitSet::with_capacity(num_zones);
            for zone in 0..num_zones {
                if rng.gen::<f64>() < p_cover {
                    coverage.insert(zone);
                }
            }
            // every sensor covers at least one zone
            if coverage.count_ones(..) == 0 {
                coverage.insert(rng.gen_range(0..num_zones));
            }
            coverage
        })
        .collect()
}

// repeatedly pick the sensor covering the most still-uncovered zones
fn greedy_placement(num_zones: usize, coverage: &[FixedBitSet]) -> (Vec<usize>, FixedBitSet) {
    let mut uncovered = FixedBitSet::with_capacity(num_zones);
    uncovered.insert_range(..);
    let mut chosen = Vec::new();

    while uncovered.count_ones(..) > 0 {
        let mut best = None;
        let mut best_gain = 0;
        for (sensor, zones) in coverage.iter().enumerate() {
            let gain = zones.intersection(&uncovered).count();
            if gain > best_gain {
                best_gain = gain;
                best = Some(sensor);
            }
        }

        match best {
            Some(sensor) => {
                chosen.push(sensor);
                uncovered.difference_with(&coverage[sensor]);
            }
            // the remaining zones are not covered by any sensor
            None => break,
        }
    }

    (chosen, uncovered)
}

fn main() {
    let sizes = [50, 100, 200, 400, 800];
    let mut rng = StdRng::seed_from_u64(123);

    println!("sensor placement (greedy set cover)");
    println!("zones\tchosen\tuncovered\ttime(ms)");
    for &num_zones in &sizes {
        let coverage = generate_coverage(num_zones, 2, 0.2, &mut rng);

        let start = Instant::now();
        let (chosen, uncovered) = greedy_placement(num_zones, &coverage);
        let elapsed = start.elapsed();

        println!("{}\t{}\t{}\t{:.3}", num_zones, chosen.len(), uncovered.count_ones(..), elapsed.as_secs_f64() * 1000.0);
    }
}
