//! Compact immutable index over a directed edge set.
//!
//! Edges are kept as one (source, target) sequence sorted lexicographically.
//! For each vertex u the slice `[offsets[u], offsets[u] + degrees[u])` holds the
//! out edges of u sorted by target, so adjacency tests and edge lookups are
//! binary searches over that slice.
//! The position of an edge in the sorted sequence is its stable identity for a
//! whole decomposition run.


/// The graph index. Built once from an edge set, never mutated afterwards.
pub struct CsrGraph {
    /// (source, target) pairs sorted lexicographically, deduplicated, no self loop
    edges: Vec<(usize, usize)>,
    /// offsets[u] : position of the first out edge of u in edges
    offsets: Vec<usize>,
    /// degrees[u] : number of out edges of u
    degrees: Vec<usize>,
    /// number of vertices
    nb_nodes: usize,
    /// number of edges
    nb_edges: usize,
} // end of struct CsrGraph


impl CsrGraph {
    /// build the index from raw (source, target) pairs.
    /// Self loops are dropped, duplicate pairs collapse to one edge.
    /// The number of vertices is 1 + the largest vertex id seen in the raw pairs
    /// (a vertex appearing only in a dropped self loop still counts).
    pub fn from_edges(raw: &[(usize, usize)]) -> Self {
        let nb_nodes = raw.iter().map(|&(u, v)| u.max(v) + 1).max().unwrap_or(0);
        let mut edges: Vec<(usize, usize)> = raw.iter().copied().filter(|&(u, v)| u != v).collect();
        edges.sort_unstable();
        edges.dedup();
        log::debug!(
            "CsrGraph::from_edges raw pairs : {}, kept edges : {}, nb_nodes : {}",
            raw.len(),
            edges.len(),
            nb_nodes
        );
        Self::from_sorted(edges, nb_nodes)
    } // end of from_edges


    // edges must already be sorted, deduplicated and free of self loops
    fn from_sorted(edges: Vec<(usize, usize)>, nb_nodes: usize) -> Self {
        let nb_edges = edges.len();
        let mut degrees = vec![0usize; nb_nodes];
        for &(u, _) in &edges {
            degrees[u] += 1;
        }
        let mut offsets = vec![0usize; nb_nodes];
        for u in 1..nb_nodes {
            offsets[u] = offsets[u - 1] + degrees[u - 1];
        }
        if nb_nodes > 0 {
            debug_assert_eq!(offsets[nb_nodes - 1] + degrees[nb_nodes - 1], nb_edges);
        }
        CsrGraph { edges, offsets, degrees, nb_nodes, nb_edges }
    } // end of from_sorted


    /// number of vertices
    pub fn get_nb_nodes(&self) -> usize { self.nb_nodes }

    /// number of edges
    pub fn get_nb_edges(&self) -> usize { self.nb_edges }

    /// the sorted edge sequence
    pub fn get_edges(&self) -> &[(usize, usize)] { &self.edges }

    /// out degree of u. A vertex id at or beyond nb_nodes has degree 0.
    pub fn degree(&self, u: usize) -> usize {
        if u < self.nb_nodes { self.degrees[u] } else { 0 }
    }

    // the out edge slice of u, empty when u is out of range
    fn out_slice(&self, u: usize) -> &[(usize, usize)] {
        if u >= self.nb_nodes {
            return &[];
        }
        &self.edges[self.offsets[u]..self.offsets[u] + self.degrees[u]]
    } // end of out_slice


    /// is there an edge from u to v?  O(log degree(u))
    pub fn adjacent(&self, u: usize, v: usize) -> bool {
        self.out_slice(u).binary_search(&(u, v)).is_ok()
    }

    /// the i-th out neighbour of u in sorted order
    pub fn neighbor(&self, u: usize, i: usize) -> usize {
        self.out_slice(u)[i].1
    }

    /// position of edge (u, v) in the sorted sequence, None if absent
    pub fn edge_index(&self, u: usize, v: usize) -> Option<usize> {
        match self.out_slice(u).binary_search(&(u, v)) {
            Ok(i) => Some(self.offsets[u] + i),
            Err(_) => None,
        }
    } // end of edge_index


    /// endpoints of the edge at position e
    pub fn edge(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    /// the index over reversed edges, same vertex set.
    /// Edge positions in the transpose are internal to it : to get the identity
    /// of a reversed edge, look it up with [edge_index](Self::edge_index) on the
    /// forward graph.
    pub fn transpose(&self) -> CsrGraph {
        let mut rev: Vec<(usize, usize)> = self.edges.iter().map(|&(u, v)| (v, u)).collect();
        rev.sort_unstable();
        Self::from_sorted(rev, self.nb_nodes)
    } // end of transpose

} // end of impl CsrGraph


//==========================================================================================================


// end of mod tests
