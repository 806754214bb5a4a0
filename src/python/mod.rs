//! Python bindings for the selector.
//!
//! # Quick Start
//!
//! ```python
//! import deck_quota as dq
//!
//! rows = [
//!     ("Sol Ring", {"ramp": True}),
//!     ("Crop Rotation", {"tutor": True, "tutor-land": True}),
//!     ("Demonic Tutor", {"tutor": True}),
//! ]
//! rules = {"ramp": 1, "tutor": {"min": 1, "max": 2}}
//! exclusions = {"tutor": ["tutor-land"]}
//!
//! result = dq.select(rows, rules, exclusions)
//! assert result.selected == ["Sol Ring", "Demonic Tutor"]
//! ```

use pyo3::prelude::*;

mod py_select;

pub use py_select::*;

/// deck_quota: quota-constrained greedy card selection.
#[pymodule]
fn deck_quota(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySelectorConfig>()?;
    m.add_class::<PySelection>()?;
    m.add_function(wrap_pyfunction!(select, m)?)?;
    Ok(())
}
