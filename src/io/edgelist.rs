//! Construct a directed edge set from a text edge list, dump levels back.
//!
//! The expected format is the one of the Snap data sets
//! (<https://snap.stanford.edu/data/index.html>) : one `source target` pair of
//! 0-based vertex ids per line, lines beginning with `#` are comments.
//! A record that is not exactly two integers is a hard error carrying the line
//! number : silently patching a bad line would corrupt the graph without any
//! warning downstream.


use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::anyhow;

use csv::ReaderBuilder;

use crate::graph::csr::CsrGraph;
use crate::truss::TrussDecomposition;


/// read raw (source, target) pairs from filepath with the given field
/// delimiter. Self loop and duplicate filtering is left to
/// [CsrGraph::from_edges], this function only parses.
pub fn load_edge_list(filepath: &Path, delim: u8) -> anyhow::Result<Vec<(usize, usize)>> {
    //
    let fileres = OpenOptions::new().read(true).open(filepath);
    if fileres.is_err() {
        log::error!("load_edge_list : could not open file {:?}", filepath.as_os_str());
        return Err(anyhow!("load_edge_list : could not open file {:?}", filepath));
    }
    let file = fileres.unwrap();
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(false)
        .from_reader(file);
    //
    let mut edges = Vec::<(usize, usize)>::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() != 2 {
            return Err(anyhow!(
                "line {} : expected 2 fields, got {}",
                line,
                record.len()
            ));
        }
        let u = record[0]
            .parse::<usize>()
            .map_err(|_| anyhow!("line {} : cannot parse vertex id {:?}", line, &record[0]))?;
        let v = record[1]
            .parse::<usize>()
            .map_err(|_| anyhow!("line {} : cannot parse vertex id {:?}", line, &record[1]))?;
        edges.push((u, v));
    }
    log::debug!("load_edge_list read {} pairs from {:?}", edges.len(), filepath);
    Ok(edges)
} // end of load_edge_list


/// dump one `source target level` line per edge, in the canonical sorted edge
/// order of the graph. Level 0 marks an edge that is in no triangle under the
/// policy the decomposition ran with.
pub fn write_levels<W: Write>(
    out: &mut W,
    graph: &CsrGraph,
    decomposition: &TrussDecomposition,
) -> anyhow::Result<()> {
    for e in 0..graph.get_nb_edges() {
        let (u, v) = graph.edge(e);
        writeln!(out, "{} {} {}", u, v, decomposition.get_level(e))?;
    }
    Ok(())
} // end of write_levels


//==========================================================================================================


// end of mod tests
