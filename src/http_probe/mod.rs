pub mod probe;
pub mod result;
pub mod runner;

pub mod prelude {
    pub use super::probe::probe_check;
    pub use super::result::ProbeResult;
    pub use super::runner::ProbeRunner;
}

use std::fmt::Write;

/// Flattens an error and its source chain into a single details line.
pub(crate) fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
