use flow_network::maximum_flow::dinic::Dinic;
use flow_network::maximum_flow::residual_network::ResidualNetwork;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

struct TaInstance {
    num_tas: usize,
    num_sections: usize,
    capacities: Vec<i64>,
    requirements: Vec<i64>,
    eligible: Vec<(usize, usize)>,
}

fn generate_instance(
    num_tas: usize,
    num_sections: usize,
    p_eligible: f64,
    capacities: (i64, i64),
    requirements: (i64, i64),
    rng: &mut StdRng,
) -> TaInstance {
    let capacities = (0..num_tas).map(|_| rng.gen_range(capacities.0..=capacities.1)).collect();
    let requirements = (0..num_sections).map(|_| rng.gen_range(requirements.0..=requirements.1)).collect();

    let mut eligible = Vec::new();
    for ta in 0..num_tas {
        for section in 0..num_sections {
            if rng.gen::<f64>() < p_eligible {
                eligible.push((ta, section));
            }
        }
    }

    TaInstance { num_tas, num_sections, capacities, requirements, eligible }
}

// source 0, then TA nodes, then section nodes, sink last
fn build_flow_network(instance: &TaInstance) -> (ResidualNetwork<i64>, usize, usize) {
    let source = 0;
    let ta_offset = 1;
    let section_offset = 1 + instance.num_tas;
    let sink = 1 + instance.num_tas + instance.num_sections;

    let mut network = ResidualNetwork::new(sink + 1);
    for (ta, &capacity) in instance.capacities.iter().enumerate() {
        network.add_edge(source, ta_offset + ta, capacity).unwrap();
    }
    for (section, &requirement) in instance.requirements.iter().enumerate() {
        network.add_edge(section_offset + section, sink, requirement).unwrap();
    }
    for &(ta, section) in &instance.eligible {
        network.add_edge(ta_offset + ta, section_offset + section, 1).unwrap();
    }

    (network, source, sink)
}

fn main() {
    env_logger::init();

    let sizes = [25, 50, 100, 200, 400];
    let mut rng = StdRng::seed_from_u64(42);

    println!("TA assignment (Dinic maximum flow)");
    println!("size\tflow\ttime(ms)");
    for &size in &sizes {
        let instance = generate_instance(size, size, 0.25, (1, 3), (1, 3), &mut rng);
        let (mut network, source, sink) = build_flow_network(&instance);

        let start = Instant::now();
        let flow = Dinic::default().solve(source, sink, &mut network).unwrap();
        let elapsed = start.elapsed();

        println!("{}\t{}\t{:.3}", size, flow, elapsed.as_secs_f64() * 1000.0);
    }
}
