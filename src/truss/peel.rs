//! Generic priority driven peeling over per edge supports.
//!
//! The engine repeatedly finalizes the edges of minimum support and propagates
//! unit decrements to the edges that shared a triangle with them, which is a
//! generalized core peeling in the spirit of Batagelj Zaversnik
//! _Fast algorithms for determining generalized core in networks_
//! [2011](https://link.springer.com/article/10.1007/s11634-010-0079-y), run on
//! triangle supports instead of degrees.
//!
//! The heap has no decrease-key : a decrement pushes a fresh entry and the
//! entry it supersedes stays in the heap. Stale entries are recognized at pop
//! time by the removed flag and discarded. Correctness only depends on that
//! flag check, not on entry uniqueness.


use std::cmp::Reverse;
use std::collections::BinaryHeap;


/// Peeling state for one decomposition run. Created when the run starts,
/// consumed by [run](Self::run), so nothing survives between runs.
pub struct Peeler {
    /// current support of each edge, kept in sync with the decrements
    supports: Vec<u32>,
    /// edges already finalized
    removed: Vec<bool>,
    /// assigned levels, 0 until an edge is finalized
    levels: Vec<u32>,
    /// min heap of (support snapshot, edge) with lazily deleted entries
    heap: BinaryHeap<Reverse<(u32, usize)>>,
} // end of struct Peeler


impl Peeler {
    /// seed the engine with the initial supports. Edges of support 0 never
    /// enter the heap and keep level 0 for the whole run.
    pub fn new(supports: Vec<u32>) -> Self {
        let nb_edges = supports.len();
        let mut heap = BinaryHeap::with_capacity(nb_edges);
        for (e, &s) in supports.iter().enumerate() {
            if s > 0 {
                heap.push(Reverse((s, e)));
            }
        }
        Peeler {
            supports,
            removed: vec![false; nb_edges],
            levels: vec![0u32; nb_edges],
            heap,
        }
    } // end of new


    /// drain the heap and return the level of every edge.
    ///
    /// `sibling_pairs` gives, for a just finalized edge, one pair of edge
    /// positions per triangle containing it : the two edges that lose this
    /// triangle. A pair with an already removed member is a dead triangle and
    /// is skipped; otherwise both members lose one unit of support and are
    /// re-pushed under their new key.
    ///
    /// The threshold k grows one unit at a time and every entry with key <= k
    /// is drained before k moves, so levels come out in non decreasing removal
    /// order and each level is the minimum support at removal time.
    pub fn run<F>(mut self, mut sibling_pairs: F) -> Vec<u32>
    where
        F: FnMut(usize) -> Vec<(usize, usize)>,
    {
        let mut k = 1u32;
        while let Some(&Reverse((key, e))) = self.heap.peek() {
            if key > k {
                k += 1;
                continue;
            }
            let _ = self.heap.pop();
            if self.removed[e] {
                // superseded entry
                continue;
            }
            self.removed[e] = true;
            self.levels[e] = k;
            log::trace!("peeled edge {} at level {}", e, k);
            for (a, b) in sibling_pairs(e) {
                if self.removed[a] || self.removed[b] {
                    continue;
                }
                self.decrement(a);
                self.decrement(b);
            }
        }
        let nb_leveled = self.levels.iter().filter(|&&l| l > 0).count();
        log::debug!(
            "peeling done, leveled edges : {}, max level : {}",
            nb_leveled,
            self.levels.iter().max().copied().unwrap_or(0)
        );
        self.levels
    } // end of run


    // a decrement of an active edge. Support 0 here means the policy produced a
    // triangle the engine never accounted for, the index or the policy is wrong.
    fn decrement(&mut self, e: usize) {
        assert!(
            self.supports[e] > 0,
            "support underflow on edge {} : triangle unaccounted at seeding",
            e
        );
        self.supports[e] -= 1;
        self.heap.push(Reverse((self.supports[e], e)));
    } // end of decrement

} // end of impl Peeler


//==========================================================================================================


// end of mod tests
