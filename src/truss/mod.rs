//! This module is devoted to truss decomposition of directed graphs.
//!
//! Every edge gets a minimal integer level such that the edge belongs to the
//! maximal subgraph where each edge participates in at least (level) qualifying
//! triangles. Peeling works as for cores but on triangle supports.
//!
//! See:
//!  - Cohen _Trusses: cohesive subgraphs for social network analysis_ 2008
//!  - Wang Cheng _Truss decomposition in massive networks_ [2012](https://arxiv.org/abs/1205.6693)
//!
//! Two triangle direction policies are provided for a directed graph:
//!  - cycle : a triangle over edge (u, v) is a w closing the directed 3-cycle
//!    u -> v -> w -> u
//!  - flow : the support of (u, v) sums three shapes distinguished by the edge
//!    directions at w : u -> w -> v, then w pointing at both u and v, then both
//!    u and v pointing at w.
//!
//! Both policies run the same peeling engine, they differ only in the seeding
//! of supports and in which sibling edges lose a triangle at each removal.


use cpu_time::ProcessTime;
use std::time::SystemTime;

use anyhow::anyhow;
use std::fmt;
use std::str::FromStr;

use crate::graph::csr::CsrGraph;
use crate::graph::triangles::common_third_vertices;

use self::peel::Peeler;

/// priority driven peeling engine
pub mod peel;


/// triangle direction policy
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrussType {
    Cycle,
    Flow,
} // end of enum TrussType


impl FromStr for TrussType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cycle" => Ok(TrussType::Cycle),
            "flow" => Ok(TrussType::Flow),
            _ => Err(anyhow!("unknown truss type : {}, expecting cycle or flow", s)),
        }
    }
} // end of impl FromStr


impl fmt::Display for TrussType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrussType::Cycle => write!(f, "cycle"),
            TrussType::Flow => write!(f, "flow"),
        }
    }
} // end of impl Display


/// The result of a decomposition run : one level per edge, in the canonical
/// sorted edge order of the graph the run was made on.
/// Level 0 means the edge had no triangle under the policy and was never
/// peeled; peeled edges get levels >= 1 in non decreasing removal order.
pub struct TrussDecomposition {
    levels: Vec<u32>,
} // end of struct TrussDecomposition


impl TrussDecomposition {
    fn new(levels: Vec<u32>) -> Self {
        TrussDecomposition { levels }
    }

    /// level of the edge at position e
    pub fn get_level(&self, e: usize) -> u32 { self.levels[e] }

    /// all levels in canonical edge order
    pub fn get_levels(&self) -> &[u32] { &self.levels }

    /// highest level assigned, 0 for a triangle free graph
    pub fn get_max_level(&self) -> u32 {
        self.levels.iter().max().copied().unwrap_or(0)
    }

    /// number of edges that got a level >= 1
    pub fn get_nb_leveled(&self) -> usize {
        self.levels.iter().filter(|&&l| l > 0).count()
    }
} // end of impl TrussDecomposition


/// runs the decomposition for the asked policy and returns the level of every
/// edge of the graph.
pub fn decompose(graph: &CsrGraph, truss_type: TrussType) -> TrussDecomposition {
    log::info!(
        "decompose, truss type : {}, nb_nodes : {}, nb_edges : {}",
        truss_type,
        graph.get_nb_nodes(),
        graph.get_nb_edges()
    );
    let decomposition = match truss_type {
        TrussType::Cycle => cycle_truss(graph),
        TrussType::Flow => flow_truss(graph),
    };
    log::info!(
        "decompose done, leveled edges : {}, max level : {}",
        decomposition.get_nb_leveled(),
        decomposition.get_max_level()
    );
    decomposition
} // end of decompose


// position of edge (a, b), which the policy guarantees is present : a miss
// means the index or the policy is wrong, not something a caller can cause.
fn edge_of(graph: &CsrGraph, a: usize, b: usize, triangle: (usize, usize, usize)) -> usize {
    match graph.edge_index(a, b) {
        Some(e) => e,
        None => panic!(
            "triangle ({}, {}, {}) refers to missing edge ({}, {})",
            triangle.0, triangle.1, triangle.2, a, b
        ),
    }
} // end of edge_of


fn cycle_truss(graph: &CsrGraph) -> TrussDecomposition {
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    //
    let transposed = graph.transpose();
    let nb_edges = graph.get_nb_edges();
    let mut supports = Vec::<u32>::with_capacity(nb_edges);
    for e in 0..nb_edges {
        let (u, v) = graph.edge(e);
        // u -> v -> w -> u
        supports.push(common_third_vertices(u, v, &transposed, graph).len() as u32);
    }
    //
    let levels = Peeler::new(supports).run(|e| {
        let (u, v) = graph.edge(e);
        let ws = common_third_vertices(u, v, &transposed, graph);
        let mut pairs = Vec::with_capacity(ws.len());
        for w in ws {
            // the cycle loses edges (w, u) and (v, w)
            pairs.push((edge_of(graph, w, u, (u, v, w)), edge_of(graph, v, w, (u, v, w))));
        }
        pairs
    });
    //
    log::info!(
        "cycle truss sys time(s) {:.2e} cpu time(s) {:.2e}",
        sys_start.elapsed().unwrap().as_secs(),
        cpu_start.elapsed().as_secs()
    );
    TrussDecomposition::new(levels)
} // end of cycle_truss


fn flow_truss(graph: &CsrGraph) -> TrussDecomposition {
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    //
    let transposed = graph.transpose();
    let nb_edges = graph.get_nb_edges();
    let mut supports = Vec::<u32>::with_capacity(nb_edges);
    for e in 0..nb_edges {
        let (u, v) = graph.edge(e);
        let mut s = common_third_vertices(u, v, graph, &transposed).len(); // u -> w -> v
        s += common_third_vertices(u, v, &transposed, &transposed).len(); // w -> u and w -> v
        s += common_third_vertices(u, v, graph, graph).len(); // u -> w and v -> w
        supports.push(s as u32);
    }
    //
    let levels = Peeler::new(supports).run(|e| {
        let (u, v) = graph.edge(e);
        let mut pairs = Vec::new();
        // u -> w -> v
        for w in common_third_vertices(u, v, graph, &transposed) {
            pairs.push((edge_of(graph, u, w, (u, v, w)), edge_of(graph, w, v, (u, v, w))));
        }
        // w -> u and w -> v
        for w in common_third_vertices(u, v, &transposed, &transposed) {
            pairs.push((edge_of(graph, w, u, (u, v, w)), edge_of(graph, w, v, (u, v, w))));
        }
        // u -> w and v -> w
        for w in common_third_vertices(u, v, graph, graph) {
            pairs.push((edge_of(graph, u, w, (u, v, w)), edge_of(graph, v, w, (u, v, w))));
        }
        pairs
    });
    //
    log::info!(
        "flow truss sys time(s) {:.2e} cpu time(s) {:.2e}",
        sys_start.elapsed().unwrap().as_secs(),
        cpu_start.elapsed().as_secs()
    );
    TrussDecomposition::new(levels)
} // end of flow_truss


//==========================================================================================================


#[cfg(test)]
mod tests {

    use super::*;

    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // Reference implementation recomputing supports from scratch after every
    // removal round. Slow but independent of the incremental bookkeeping.
    struct NaiveTruss {
        edges: Vec<(usize, usize)>,
        index: HashMap<(usize, usize), usize>,
        nb_nodes: usize,
    }

    impl NaiveTruss {
        // edges must be the canonical sorted sequence of a CsrGraph
        fn new(graph: &CsrGraph) -> Self {
            let edges = graph.get_edges().to_vec();
            let index = edges.iter().enumerate().map(|(e, &uv)| (uv, e)).collect();
            NaiveTruss { edges, index, nb_nodes: graph.get_nb_nodes() }
        }

        fn live(&self, removed: &[bool], a: usize, b: usize) -> bool {
            self.index.get(&(a, b)).map(|&e| !removed[e]).unwrap_or(false)
        }

        // support of edge e counting only triangles whose two other edges are live
        fn support(&self, removed: &[bool], e: usize, truss_type: TrussType) -> u32 {
            let (u, v) = self.edges[e];
            let mut s = 0u32;
            for w in 0..self.nb_nodes {
                if w == u || w == v {
                    continue;
                }
                match truss_type {
                    TrussType::Cycle => {
                        if self.live(removed, v, w) && self.live(removed, w, u) {
                            s += 1;
                        }
                    }
                    TrussType::Flow => {
                        if self.live(removed, u, w) && self.live(removed, w, v) {
                            s += 1;
                        }
                        if self.live(removed, w, u) && self.live(removed, w, v) {
                            s += 1;
                        }
                        if self.live(removed, u, w) && self.live(removed, v, w) {
                            s += 1;
                        }
                    }
                }
            }
            s
        } // end of support

        fn seeds(&self, truss_type: TrussType) -> Vec<u32> {
            let none = vec![false; self.edges.len()];
            (0..self.edges.len()).map(|e| self.support(&none, e, truss_type)).collect()
        }

        // peel to a fixpoint at each threshold, threshold + 1 when stable
        fn levels(&self, truss_type: TrussType) -> Vec<u32> {
            let nb_edges = self.edges.len();
            let mut removed = vec![false; nb_edges];
            let mut levels = vec![0u32; nb_edges];
            let seeds = self.seeds(truss_type);
            let mut k = 1u32;
            while (0..nb_edges).any(|e| !removed[e] && seeds[e] > 0) {
                loop {
                    let mut changed = false;
                    for e in 0..nb_edges {
                        if removed[e] || seeds[e] == 0 {
                            continue;
                        }
                        if self.support(&removed, e, truss_type) <= k {
                            removed[e] = true;
                            levels[e] = k;
                            changed = true;
                        }
                    }
                    if !changed {
                        break;
                    }
                }
                k += 1;
            }
            levels
        } // end of levels
    } // end of impl NaiveTruss

    fn random_digraph(seed: u64, nb_nodes: usize, p: f64) -> Vec<(usize, usize)> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut raw = Vec::new();
        for u in 0..nb_nodes {
            for v in 0..nb_nodes {
                if u != v && rng.gen_bool(p) {
                    raw.push((u, v));
                }
            }
        }
        raw
    } // end of random_digraph

    #[test]
    fn cycle_on_triangle() {
        log_init_test();
        let graph = CsrGraph::from_edges(&[(0, 1), (1, 2), (2, 0)]);
        let decomposition = decompose(&graph, TrussType::Cycle);
        assert_eq!(decomposition.get_levels(), &[1, 1, 1]);
        assert_eq!(decomposition.get_max_level(), 1);
        assert_eq!(decomposition.get_nb_leveled(), 3);
    } // end of cycle_on_triangle

    #[test]
    fn lone_edge_gets_no_level() {
        log_init_test();
        let graph = CsrGraph::from_edges(&[(0, 1)]);
        let decomposition = decompose(&graph, TrussType::Cycle);
        assert_eq!(decomposition.get_levels(), &[0]);
        let decomposition = decompose(&graph, TrussType::Flow);
        assert_eq!(decomposition.get_levels(), &[0]);
    } // end of lone_edge_gets_no_level

    #[test]
    fn disjoint_triangles_peel_independently() {
        log_init_test();
        let graph =
            CsrGraph::from_edges(&[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        let decomposition = decompose(&graph, TrussType::Cycle);
        assert_eq!(decomposition.get_levels(), &[1, 1, 1, 1, 1, 1]);
    } // end of disjoint_triangles_peel_independently

    #[test]
    fn cycle_on_complete_digraph() {
        log_init_test();
        // every ordered pair of 4 vertices : each edge (u, v) closes a cycle
        // through both remaining vertices, so all edges peel together at 2
        let mut raw = Vec::new();
        for u in 0..4 {
            for v in 0..4 {
                if u != v {
                    raw.push((u, v));
                }
            }
        }
        let graph = CsrGraph::from_edges(&raw);
        let decomposition = decompose(&graph, TrussType::Cycle);
        assert_eq!(decomposition.get_nb_leveled(), 12);
        assert!(decomposition.get_levels().iter().all(|&l| l == 2));
    } // end of cycle_on_complete_digraph

    #[test]
    fn flow_on_chorded_square() {
        log_init_test();
        // 4-cycle 0 -> 1 -> 2 -> 3 -> 0 with chord 0 -> 2
        let graph = CsrGraph::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let naive = NaiveTruss::new(&graph);
        // seeds must match the shape by shape enumeration
        let transposed = graph.transpose();
        let seeds = naive.seeds(TrussType::Flow);
        for e in 0..graph.get_nb_edges() {
            let (u, v) = graph.edge(e);
            let s = common_third_vertices(u, v, &graph, &transposed).len()
                + common_third_vertices(u, v, &transposed, &transposed).len()
                + common_third_vertices(u, v, &graph, &graph).len();
            assert_eq!(s as u32, seeds[e], "seed mismatch on edge ({}, {})", u, v);
        }
        // canonical edge order : (0,1) (0,2) (1,2) (2,3) (3,0)
        assert_eq!(seeds, vec![1, 1, 1, 0, 0]);
        //
        let decomposition = decompose(&graph, TrussType::Flow);
        assert_eq!(decomposition.get_levels(), naive.levels(TrussType::Flow).as_slice());
        assert_eq!(decomposition.get_levels(), &[1, 1, 1, 0, 0]);
    } // end of flow_on_chorded_square

    #[test]
    fn flow_seed_on_symmetric_graph() {
        log_init_test();
        // both directions of every pair of 4 vertices. Each undirected common
        // neighbour of (u, v) matches the three flow shapes, so the seed is
        // 3 times the 2 common neighbours of a complete graph on 4 vertices.
        let mut raw = Vec::new();
        for u in 0..4 {
            for v in 0..4 {
                if u != v {
                    raw.push((u, v));
                }
            }
        }
        let graph = CsrGraph::from_edges(&raw);
        let transposed = graph.transpose();
        for e in 0..graph.get_nb_edges() {
            let (u, v) = graph.edge(e);
            let s = common_third_vertices(u, v, &graph, &transposed).len()
                + common_third_vertices(u, v, &transposed, &transposed).len()
                + common_third_vertices(u, v, &graph, &graph).len();
            assert_eq!(s, 6);
        }
    } // end of flow_seed_on_symmetric_graph

    #[test]
    fn incremental_matches_naive_cycle() {
        log_init_test();
        for seed in 0..25u64 {
            let raw = random_digraph(seed, 10, 0.3);
            let graph = CsrGraph::from_edges(&raw);
            let naive = NaiveTruss::new(&graph);
            let decomposition = decompose(&graph, TrussType::Cycle);
            assert_eq!(
                decomposition.get_levels(),
                naive.levels(TrussType::Cycle).as_slice(),
                "divergence on seed {}",
                seed
            );
        }
    } // end of incremental_matches_naive_cycle

    #[test]
    fn incremental_matches_naive_flow() {
        log_init_test();
        for seed in 0..25u64 {
            let raw = random_digraph(seed, 10, 0.25);
            let graph = CsrGraph::from_edges(&raw);
            let naive = NaiveTruss::new(&graph);
            let decomposition = decompose(&graph, TrussType::Flow);
            assert_eq!(
                decomposition.get_levels(),
                naive.levels(TrussType::Flow).as_slice(),
                "divergence on seed {}",
                seed
            );
        }
    } // end of incremental_matches_naive_flow

    #[test]
    fn level_bounded_by_seed() {
        log_init_test();
        let raw = random_digraph(1139, 12, 0.3);
        let graph = CsrGraph::from_edges(&raw);
        let naive = NaiveTruss::new(&graph);
        for truss_type in [TrussType::Cycle, TrussType::Flow] {
            let seeds = naive.seeds(truss_type);
            let decomposition = decompose(&graph, truss_type);
            for e in 0..graph.get_nb_edges() {
                let level = decomposition.get_level(e);
                if seeds[e] == 0 {
                    assert_eq!(level, 0);
                } else {
                    assert!(level >= 1 && level <= seeds[e]);
                }
            }
        }
    } // end of level_bounded_by_seed

    #[test]
    fn decompose_is_deterministic() {
        log_init_test();
        let raw = random_digraph(4457, 12, 0.3);
        let graph = CsrGraph::from_edges(&raw);
        let first = decompose(&graph, TrussType::Flow);
        let second = decompose(&graph, TrussType::Flow);
        assert_eq!(first.get_levels(), second.get_levels());
    } // end of decompose_is_deterministic

    #[test]
    fn truss_type_parsing() {
        log_init_test();
        assert_eq!("cycle".parse::<TrussType>().unwrap(), TrussType::Cycle);
        assert_eq!("flow".parse::<TrussType>().unwrap(), TrussType::Flow);
        assert!("triangle".parse::<TrussType>().is_err());
        assert_eq!(format!("{}", TrussType::Flow), "flow");
    } // end of truss_type_parsing

} // end of mod tests
