use crate::maximum_flow::error::Error;
use num_traits::NumAssign;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::ops::Sub;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ResidualEdge<Flow> {
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
    pub rev: usize,
}

impl<Flow> ResidualEdge<Flow>
where
    Flow: Sub<Output = Flow> + Copy,
{
    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.upper - self.flow
    }
}

#[derive(Default, Clone)]
pub struct ResidualNetwork<Flow> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) adjacency: Vec<Vec<ResidualEdge<Flow>>>,
    positions: Vec<(usize, usize)>, // edge index -> (from, slot) of the forward edge
}

impl<Flow> ResidualNetwork<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    pub fn new(num_nodes: usize) -> Self {
        Self { num_nodes, num_edges: 0, adjacency: vec![Vec::new(); num_nodes], positions: Vec::new() }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_node(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.adjacency.extend((0..num_nodes).map(|_| Vec::new()));
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    pub fn add_edge(&mut self, from: usize, to: usize, upper: Flow) -> Result<usize, Error> {
        if upper < Flow::zero() {
            return Err(Error::NegativeCapacity);
        }
        if from >= self.num_nodes {
            return Err(Error::NodeIndexOutOfRange { index: from, num_nodes: self.num_nodes });
        }
        if to >= self.num_nodes {
            return Err(Error::NodeIndexOutOfRange { index: to, num_nodes: self.num_nodes });
        }

        // a self-loop's forward edge occupies a slot of the same list
        let rev_slot = self.adjacency[to].len() + usize::from(from == to);
        self.adjacency[from].push(ResidualEdge { to, flow: Flow::zero(), upper, rev: rev_slot });
        let forward_slot = self.adjacency[from].len() - 1;
        self.adjacency[to].push(ResidualEdge { to: from, flow: upper, upper, rev: forward_slot });

        self.positions.push((from, forward_slot));
        self.num_edges += 1;
        Ok(self.num_edges - 1)
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        let &(from, slot) = self.positions.get(edge_id)?;
        let edge = &self.adjacency[from][slot];
        Some(Edge { from, to: edge.to, flow: edge.flow, upper: edge.upper })
    }

    #[inline]
    pub fn neighbors(&self, u: usize) -> std::slice::Iter<ResidualEdge<Flow>> {
        self.adjacency[u].iter()
    }

    pub fn maximum_flow(&self, source: usize) -> Flow {
        (0..self.num_edges).fold(Flow::zero(), |mut flow, edge_index| {
            let edge = self.get_edge(edge_index).unwrap();
            if edge.from == source {
                flow += edge.flow;
            } else if edge.to == source {
                flow -= edge.flow;
            }
            flow
        })
    }

    // nodes reachable from source in the residual network
    pub fn minimum_cut(&self, source: usize) -> Vec<usize> {
        let mut cut = Vec::new();
        let mut visited = vec![false; self.num_nodes];
        let mut que = VecDeque::from([source]);
        visited[source] = true;

        while let Some(u) = que.pop_front() {
            cut.push(u);

            for e in self.neighbors(u) {
                if !visited[e.to] && e.residual_capacity() != Flow::zero() {
                    visited[e.to] = true;
                    que.push_back(e.to);
                }
            }
        }

        cut
    }

    #[inline]
    pub(crate) fn push_flow(&mut self, u: usize, slot: usize, flow: Flow) {
        let (to, rev) = {
            let edge = &self.adjacency[u][slot];
            (edge.to, edge.rev)
        };

        // update flow
        self.adjacency[u][slot].flow += flow;
        self.adjacency[to][rev].flow -= flow;
    }
}
