//! Gathers every vector of a mock IVF index into one buffer, three ways.

use ivfcopy::{init_tracing, CorpusConfig, Harness, HarnessConfig, InvLists};
use std::io::{self, Write};

const LOG_LEVEL: &str = "info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(LOG_LEVEL);
    let corpus = CorpusConfig::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Creating mock data...")?;
    writeln!(out, "ntotal={}, nlist={}, d={}", corpus.ntotal, corpus.nlist, corpus.dim)?;
    writeln!(out, "Destination: {} elements", corpus.total_elements()?)?;
    let lists = InvLists::random(&corpus)?;
    writeln!(out, "Total vectors check: {} (should be {})", lists.ntotal(), corpus.ntotal)?;
    writeln!(out, "Mock data created successfully.")?;

    let harness = Harness::new(HarnessConfig::default())?;
    harness.run(&lists, &mut out)?;
    out.flush()?;
    Ok(())
}
