//! an executable computing a truss decomposition of a directed graph
//! example usage:
//! ktruss --graph "p2p-Gnutella09.txt" --truss cycle
//! ktruss --graph "p2p-Gnutella09.txt" --truss flow
//!
//! The graph file is a Snap style edge list : one `source target` pair per
//! line, `#` starts a comment line. The output stream gets one
//! `source target level` line per edge, level 0 meaning the edge is in no
//! triangle under the asked policy.


use anyhow::anyhow;
use clap::{Arg, Command};

use std::path::Path;

use ktruss::prelude::*;


pub fn main() {
    //
    let _ = env_logger::builder().try_init();
    log::info!("logger initialized");
    //
    let matches = Command::new("ktruss")
        .arg(
            Arg::new("graph")
                .long("graph")
                .short('g')
                .takes_value(true)
                .required(true)
                .help("expecting an edge list file"),
        )
        .arg(
            Arg::new("truss_type")
                .long("truss")
                .short('t')
                .takes_value(true)
                .default_value("cycle")
                .help("truss type : cycle or flow"),
        )
        .get_matches();

    // decode args

    let fname = matches.value_of("graph").unwrap();
    let truss_type = match matches.value_of("truss_type").unwrap().parse::<TrussType>() {
        Ok(t) => t,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    //
    let path = Path::new(fname);
    let delimiters = [b'\t', b' ', b','];
    let mut res: anyhow::Result<Vec<(usize, usize)>> = Err(anyhow!("not initialized"));
    for delim in delimiters {
        log::info!("trying to read {:?} with delimiter {}", path, delim);
        res = load_edge_list(path, delim);
        if res.is_err() {
            log::error!(
                "load_edge_list failed reading {:?} with delimiter {}",
                path,
                delim
            );
        } else {
            break;
        }
    }
    if res.is_err() {
        log::error!("error : {:?}", res.as_ref().err());
        log::error!("could not load graph from {:?}", path);
        std::process::exit(1);
    }
    let edges = res.unwrap();
    //
    let graph = CsrGraph::from_edges(&edges);
    log::info!(
        "graph loaded, nb_nodes : {}, nb_edges : {}",
        graph.get_nb_nodes(),
        graph.get_nb_edges()
    );
    //
    let decomposition = decompose(&graph, truss_type);
    //
    println!("# G = {}", fname);
    println!("# truss_type = {}", truss_type);
    let stdout = std::io::stdout();
    if let Err(e) = write_levels(&mut stdout.lock(), &graph, &decomposition) {
        log::error!("error writing levels : {:?}", e);
        std::process::exit(1);
    }
} // end of main
