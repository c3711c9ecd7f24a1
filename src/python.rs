use algasea_core::python::core;
use pyo3::prelude::*;
use pyo3::wrap_pymodule;
use std::ffi::CString;

#[pymodule]
#[pyo3(name = "_lib")]
fn algasea(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_wrapped(wrap_pymodule!(core))?;

    set_path(m, "algasea._lib.core", "core")?;

    Ok(())
}

/// Register a submodule in `sys.modules` so `import algasea._lib.core` works.
fn set_path(m: &Bound<'_, PyModule>, path: &str, module: &str) -> PyResult<()> {
    let code = CString::new(format!(
        "\
import sys
sys.modules['{path}'] = {module}
    "
    ))?;
    m.py().run(code.as_c_str(), None, Some(&m.dict()))
}
