//! Selector bindings for Python.

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{AttributeKey, Error};
use crate::rules::{Rule, RuleSet, RuleSpec};
use crate::select::{ExclusionMode, SelectionResult, Selector, SelectorConfig};
use crate::table::{AttributeRow, AttributeTable};

fn to_py_err(e: Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// A rule value: `min`, `(min, max)` with `max` possibly `None`, or a
/// `{"min": .., "max": ..}` dict.
#[derive(FromPyObject)]
enum PyRuleSpec {
    Min(u32),
    Bounds(u32, Option<u32>),
    Fields(HashMap<String, Option<u32>>),
}

/// Python wrapper for SelectorConfig.
#[pyclass(name = "SelectorConfig")]
#[derive(Clone)]
pub struct PySelectorConfig(pub SelectorConfig);

#[pymethods]
impl PySelectorConfig {
    /// Create a selector configuration.
    ///
    /// # Arguments
    /// - uniform_exclusions: apply exclusions to extra contributions too (default: True)
    /// - record_trace: keep a per-row trace (default: True)
    #[new]
    #[pyo3(signature = (uniform_exclusions = true, record_trace = true))]
    fn new(uniform_exclusions: bool, record_trace: bool) -> Self {
        let mode = if uniform_exclusions {
            ExclusionMode::Uniform
        } else {
            ExclusionMode::PrimaryOnly
        };
        Self(
            SelectorConfig::default()
                .with_exclusion_mode(mode)
                .with_trace(record_trace),
        )
    }

    #[getter]
    fn uniform_exclusions(&self) -> bool {
        self.0.exclusion_mode == ExclusionMode::Uniform
    }

    #[getter]
    fn record_trace(&self) -> bool {
        self.0.record_trace
    }

    fn __repr__(&self) -> String {
        format!(
            "SelectorConfig(uniform_exclusions={}, record_trace={})",
            self.uniform_exclusions(),
            self.0.record_trace
        )
    }
}

/// Python wrapper for SelectionResult.
#[pyclass(name = "Selection")]
pub struct PySelection(pub SelectionResult);

#[pymethods]
impl PySelection {
    /// Selected card names, in table order.
    #[getter]
    fn selected(&self) -> Vec<String> {
        self.0.selected.clone()
    }

    /// Final `(attribute, count)` pairs, in rule order.
    #[getter]
    fn tally(&self) -> Vec<(String, u32)> {
        self.0
            .tally
            .iter()
            .map(|(k, c)| (k.as_str().to_owned(), c))
            .collect()
    }

    /// Unmet minimums as `(attribute, have, need)`.
    #[getter]
    fn unmet(&self) -> Vec<(String, u32, u32)> {
        self.0
            .unmet
            .iter()
            .map(|s| (s.attribute.as_str().to_owned(), s.have, s.need))
            .collect()
    }

    /// Whether every minimum was met.
    #[getter]
    fn satisfied(&self) -> bool {
        self.0.is_satisfied()
    }

    /// One formatted line per scanned row.
    #[getter]
    fn trace(&self) -> Vec<String> {
        self.0.trace.iter().map(ToString::to_string).collect()
    }

    fn __len__(&self) -> usize {
        self.0.selected.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Selection(selected={}, scanned={}, satisfied={})",
            self.0.selected.len(),
            self.0.scanned,
            self.0.is_satisfied()
        )
    }
}

/// Run the greedy selector.
///
/// # Arguments
/// - rows: list of `(name, {attribute: bool})` in selection order
/// - rules: dict of attribute to `min`, `(min, max)` or `{"min": .., "max": ..}`;
///   dict order is kept
/// - exclusions: dict of attribute to list of vetoing attributes
/// - config: optional SelectorConfig
#[pyfunction]
#[pyo3(signature = (rows, rules, exclusions = None, config = None))]
pub fn select(
    rows: Vec<(String, HashMap<String, bool>)>,
    rules: &Bound<'_, PyDict>,
    exclusions: Option<HashMap<String, Vec<String>>>,
    config: Option<PySelectorConfig>,
) -> PyResult<PySelection> {
    let table = AttributeTable::from_rows(rows.into_iter().map(|(id, flags)| {
        flags
            .into_iter()
            .fold(AttributeRow::new(id), |row, (k, v)| row.with_flag(k, v))
    }))
    .map_err(to_py_err)?;

    let mut set = RuleSet::new();
    for (key, value) in rules.iter() {
        let attribute = AttributeKey::new(key.extract::<String>()?);
        let rule = match value.extract::<PyRuleSpec>()? {
            PyRuleSpec::Min(min) => Rule::at_least(min),
            PyRuleSpec::Bounds(min, max) => Rule::new(&attribute, min, max).map_err(to_py_err)?,
            PyRuleSpec::Fields(fields) => RuleSpec::from_fields(fields)
                .and_then(|spec| spec.into_rule(&attribute))
                .map_err(to_py_err)?,
        };
        set.insert(attribute, rule).map_err(to_py_err)?;
    }
    for (attribute, vetoed_by) in exclusions.unwrap_or_default() {
        for by in vetoed_by {
            set = set.exclude(attribute.as_str(), by).map_err(to_py_err)?;
        }
    }

    let config = config.map(|c| c.0).unwrap_or_default();
    Ok(PySelection(Selector::with_config(&set, config).select(&table)))
}
