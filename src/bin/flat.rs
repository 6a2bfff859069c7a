//! Copies one large flat f64 buffer, three ways.

use ivfcopy::{config::FLAT_LEN, init_tracing, FlatBuffer, Harness, HarnessConfig};
use std::io::{self, Write};

const LOG_LEVEL: &str = "info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(LOG_LEVEL);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let source = FlatBuffer::linear(FLAT_LEN);
    writeln!(out, "Array size: {} elements ({} MB)", source.len(), source.size_in_mib())?;

    Harness::new(HarnessConfig::flat())?.run(&source, &mut out)?;
    out.flush()?;
    Ok(())
}
