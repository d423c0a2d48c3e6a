//! Third vertices closing a triangle over an edge.
//!
//! The adjacency source for each endpoint is chosen by the caller : passing the
//! forward graph selects out neighbours, passing its transpose selects in
//! neighbours. The two choices are independent, which is what lets a single
//! query express the different triangle shapes of the truss policies.


use crate::graph::csr::CsrGraph;


/// All w distinct from u and v such that (u, w) is an edge of `ug` and (v, w)
/// an edge of `vg`.
///
/// The shorter of the two candidate lists is scanned linearly and each
/// candidate is probed in the other side by binary search, so the cost is
/// O(min(deg) * log(max(deg))). This matters : the same query is reissued for
/// every triangle touching an edge during peeling.
/// The result enumerates each qualifying w exactly once, in the scan order of
/// the shorter list.
pub fn common_third_vertices(u: usize, v: usize, ug: &CsrGraph, vg: &CsrGraph) -> Vec<usize> {
    let mut ws = Vec::new();
    if ug.degree(u) < vg.degree(v) {
        for i in 0..ug.degree(u) {
            let w = ug.neighbor(u, i);
            if w == u || w == v {
                continue;
            }
            if vg.adjacent(v, w) {
                ws.push(w);
            }
        }
    } else {
        for i in 0..vg.degree(v) {
            let w = vg.neighbor(v, i);
            if w == u || w == v {
                continue;
            }
            if ug.adjacent(u, w) {
                ws.push(w);
            }
        }
    }
    ws
} // end of common_third_vertices


//==========================================================================================================


// end of mod tests
