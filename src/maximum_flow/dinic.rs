use crate::maximum_flow::error::Error;
use crate::maximum_flow::residual_network::ResidualNetwork;
use log::debug;
use num_traits::{Bounded, NumAssign};
use std::collections::VecDeque;
use std::fmt::Debug;

#[derive(Default)]
pub struct Dinic {
    level: Vec<usize>,
    current_edge: Vec<usize>,
    que: VecDeque<usize>,
    num_phases: usize,
}

impl Dinic {
    #[inline]
    pub fn num_phases(&self) -> usize {
        self.num_phases
    }

    pub fn solve<Flow>(&mut self, source: usize, sink: usize, network: &mut ResidualNetwork<Flow>) -> Result<Flow, Error>
    where
        Flow: NumAssign + Ord + Bounded + Copy + Debug,
    {
        let num_nodes = network.num_nodes();
        for u in [source, sink] {
            if u >= num_nodes {
                return Err(Error::NodeIndexOutOfRange { index: u, num_nodes });
            }
        }
        if source == sink {
            return Err(Error::SourceEqualsSink);
        }

        self.level.resize(num_nodes, num_nodes);
        self.current_edge.resize(num_nodes, 0);
        self.num_phases = 0;

        let mut flow = Flow::zero();
        while self.build_levels(source, sink, network) {
            self.num_phases += 1;
            self.current_edge.fill(0);

            let mut num_paths = 0;
            while let Some(delta) = self.dfs(source, sink, Flow::max_value(), network) {
                flow += delta;
                num_paths += 1;
            }
            debug!("phase {}: {} augmenting paths, flow={:?}", self.num_phases, num_paths, flow);
        }

        Ok(flow)
    }

    // O(n + m)
    fn build_levels<Flow>(&mut self, source: usize, sink: usize, network: &ResidualNetwork<Flow>) -> bool
    where
        Flow: NumAssign + Ord + Copy,
    {
        let unvisited = network.num_nodes();
        self.level.fill(unvisited);
        self.level[source] = 0;
        self.que.clear();
        self.que.push_back(source);

        while let Some(u) = self.que.pop_front() {
            for edge in network.neighbors(u) {
                if edge.residual_capacity() > Flow::zero() && self.level[edge.to] == unvisited {
                    self.level[edge.to] = self.level[u] + 1;
                    self.que.push_back(edge.to);
                }
            }
        }

        self.level[sink] < unvisited
    }

    // finds one augmenting path in the level graph and applies it on unwind
    fn dfs<Flow>(&mut self, u: usize, sink: usize, upper: Flow, network: &mut ResidualNetwork<Flow>) -> Option<Flow>
    where
        Flow: NumAssign + Ord + Copy,
    {
        if u == sink {
            return Some(upper);
        }

        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            while self.current_edge[u] < network.adjacency[u].len() {
                let slot = self.current_edge[u];
                let (to, residual_capacity) = {
                    let edge = &network.adjacency[u][slot];
                    (edge.to, edge.residual_capacity())
                };

                if residual_capacity > Flow::zero() && self.level[to] == self.level[u] + 1 {
                    if let Some(delta) = self.dfs(to, sink, upper.min(residual_capacity), network) {
                        network.push_flow(u, slot, delta);
                        return Some(delta);
                    }
                }

                // the subtree behind this edge cannot reach the sink in this phase
                self.current_edge[u] += 1;
            }

            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn build(num_nodes: usize, edges: &[(usize, usize, i64)]) -> ResidualNetwork<i64> {
        let mut network = ResidualNetwork::new(num_nodes);
        for &(from, to, upper) in edges {
            network.add_edge(from, to, upper).unwrap();
        }
        network
    }

    #[test]
    fn diamond_with_cross_edge_against_the_grain() {
        let mut network = build(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (2, 1, 1)]);
        let flow = Dinic::default().solve(0, 3, &mut network).unwrap();
        assert_eq!(flow, 4);
        assert_eq!(network.maximum_flow(0), 4);
    }

    #[test]
    fn diamond_with_cross_edge_opens_a_third_path() {
        let mut network = build(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (1, 2, 1)]);
        let flow = Dinic::default().solve(0, 3, &mut network).unwrap();
        assert_eq!(flow, 5);
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    fn single_edge_carries_its_capacity(#[case] capacity: i64) {
        let mut network = build(2, &[(0, 1, capacity)]);
        let mut dinic = Dinic::default();
        assert_eq!(dinic.solve(0, 1, &mut network), Ok(capacity));
        assert_eq!(dinic.num_phases(), 1);
    }

    #[test]
    fn zero_capacity_edge_carries_nothing() {
        let mut network = build(2, &[(0, 1, 0)]);
        let mut dinic = Dinic::default();
        assert_eq!(dinic.solve(0, 1, &mut network), Ok(0));
        assert_eq!(dinic.num_phases(), 0);
    }

    #[test]
    fn unreachable_sink_needs_no_augmentation() {
        let mut network = build(4, &[(0, 1, 10), (2, 3, 5)]);
        let mut dinic = Dinic::default();
        assert_eq!(dinic.solve(0, 3, &mut network), Ok(0));
        assert_eq!(dinic.num_phases(), 0);
    }

    #[test]
    fn edgeless_network_has_zero_flow() {
        let mut network = ResidualNetwork::<i64>::new(2);
        assert_eq!(Dinic::default().solve(0, 1, &mut network), Ok(0));
    }

    #[test]
    fn clrs_network() {
        let edges = [
            (0, 1, 16),
            (0, 2, 13),
            (1, 2, 10),
            (1, 3, 12),
            (2, 1, 4),
            (2, 4, 14),
            (3, 2, 9),
            (3, 5, 20),
            (4, 3, 7),
            (4, 5, 4),
        ];
        let mut network = build(6, &edges);
        assert_eq!(Dinic::default().solve(0, 5, &mut network), Ok(23));
    }

    #[test]
    fn layered_network() {
        let edges = [
            (0, 1, 10),
            (0, 2, 10),
            (1, 3, 4),
            (1, 4, 8),
            (2, 4, 9),
            (3, 5, 10),
            (4, 3, 6),
            (4, 5, 10),
        ];
        let mut network = build(6, &edges);
        assert_eq!(Dinic::default().solve(0, 5, &mut network), Ok(19));
    }

    #[test]
    fn unit_capacity_matching() {
        // complete bipartite 2x2, all capacities 1
        let edges = [(0, 1, 1), (0, 2, 1), (1, 3, 1), (1, 4, 1), (2, 3, 1), (2, 4, 1), (3, 5, 1), (4, 5, 1)];
        let mut network = build(6, &edges);
        assert_eq!(Dinic::default().solve(0, 5, &mut network), Ok(2));
    }

    #[test]
    fn self_loops_and_multi_edges_are_harmless() {
        let mut network = build(3, &[(0, 0, 9), (0, 1, 2), (0, 1, 3), (1, 1, 4), (1, 2, 4), (2, 0, 1)]);
        assert_eq!(Dinic::default().solve(0, 2, &mut network), Ok(4));
    }

    #[rstest]
    #[case(4, 1)]
    #[case(1, 4)]
    fn out_of_range_terminal_is_rejected(#[case] source: usize, #[case] sink: usize) {
        let mut network = build(3, &[(0, 1, 1)]);
        let index = if source >= 3 { source } else { sink };
        assert_eq!(
            Dinic::default().solve(source, sink, &mut network),
            Err(Error::NodeIndexOutOfRange { index, num_nodes: 3 })
        );
    }

    #[test]
    fn equal_terminals_are_rejected_without_touching_the_network() {
        let mut network = build(3, &[(0, 1, 1), (1, 2, 1)]);
        assert_eq!(Dinic::default().solve(1, 1, &mut network), Err(Error::SourceEqualsSink));
        for edge_id in 0..network.num_edges() {
            assert_eq!(network.get_edge(edge_id).unwrap().flow, 0);
        }
    }

    #[test]
    fn identical_builds_solve_identically() {
        let edges = [(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (1, 2, 1)];
        let (mut first, mut second) = (build(4, &edges), build(4, &edges));

        let (mut dinic_first, mut dinic_second) = (Dinic::default(), Dinic::default());
        let flow_first = dinic_first.solve(0, 3, &mut first).unwrap();
        let flow_second = dinic_second.solve(0, 3, &mut second).unwrap();

        assert_eq!(flow_first, flow_second);
        assert_eq!(dinic_first.num_phases(), dinic_second.num_phases());
    }

    #[test]
    fn second_run_continues_from_reduced_capacities() {
        let mut network = build(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (2, 1, 1)]);
        let mut dinic = Dinic::default();
        assert_eq!(dinic.solve(0, 3, &mut network), Ok(4));
        // the network keeps its reduced residuals, so nothing is left to push
        assert_eq!(dinic.solve(0, 3, &mut network), Ok(0));
    }

    #[test]
    fn cloned_network_solves_independently() {
        let original = build(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (2, 1, 1)]);
        let mut first = original.clone();
        let mut second = original.clone();

        assert_eq!(Dinic::default().solve(0, 3, &mut first), Ok(4));
        assert_eq!(Dinic::default().solve(0, 3, &mut second), Ok(4));
        assert_eq!(original.get_edge(0).unwrap().flow, 0);
    }

    #[test]
    fn long_chain_is_searched_to_full_depth() {
        let num_nodes = 500;
        let edges: Vec<(usize, usize, i64)> = (0..num_nodes - 1).map(|u| (u, u + 1, 2)).collect();
        let mut network = build(num_nodes, &edges);
        let mut dinic = Dinic::default();
        assert_eq!(dinic.solve(0, num_nodes - 1, &mut network), Ok(2));
        assert_eq!(dinic.num_phases(), 1);
    }
}
