pub mod config;
pub mod corpus;
pub mod error;
pub mod harness;
pub mod strategy;

pub use config::{CorpusConfig, HarnessConfig, Resolution};
pub use corpus::{FlatBuffer, InvLists, Source};
pub use error::{Error, Result};
pub use harness::{Harness, Report, StrategyReport};
pub use strategy::Strategy;

/// Untyped copy of `src` into `dst`, moved as raw bytes.
#[inline(always)]
pub fn memcpy<T>(dst: &mut [T], src: &[T])
where
    T: Copy,
{
    assert_eq!(dst.len(), src.len(), "source and destination slices must have equal lengths");
    // SAFETY: lengths are equal and `&mut` rules out overlap
    unsafe {
        core::ptr::copy_nonoverlapping(
            src.as_ptr().cast::<u8>(),
            dst.as_mut_ptr().cast::<u8>(),
            core::mem::size_of_val(src),
        );
    }
}

/// Installs a stderr `fmt` subscriber filtered at `level`, falling back to `info`.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = match EnvFilter::try_new(level) {
        Ok(f) => f,
        Err(_) => EnvFilter::new("info"),
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
