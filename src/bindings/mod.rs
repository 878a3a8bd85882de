mod kaleidoscope;

pub use kaleidoscope::*;

use pyo3::prelude::*;
use pyo3::types::PyModule;

/// Kaleidoscope folding engine for triangle groups
#[pymodule]
pub fn kaleidoscope_fold(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    kaleidoscope::register(m)?;
    Ok(())
}
