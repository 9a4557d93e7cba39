//! Scores open-source packages for reuse-worthiness.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use reuse_score::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host bound to the real process.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() {
    run(&mut RealHost, std::env::args()).await;
}
