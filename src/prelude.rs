//! To ease access to most frequently used items
//!


pub use crate::graph::csr::CsrGraph;
pub use crate::graph::triangles::common_third_vertices;

pub use crate::truss::{decompose, TrussDecomposition, TrussType};

pub use crate::io::edgelist::{load_edge_list, write_levels};
