use crate::compiler::FormCompiler;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// A compiled connector specification.
///
/// The specification is validated and compiled once on construction. The form
/// model can then be fetched for a fresh configuration or re-opened against any
/// number of saved configurations.
#[pyclass(name = "Katachi")]
struct KatachiPy {
    compiler: FormCompiler,
}

#[pymethods]
impl KatachiPy {
    /// Validates a connector specification.
    ///
    /// Args:
    ///     spec_json (str): The connector specification, either the bare
    ///         connection schema or the registry envelope that wraps it.
    ///
    /// Raises:
    ///     ValueError: If the document is not valid JSON or its root is not an
    ///         object schema. Malformed individual properties do not raise;
    ///         they are listed by `diagnostics()`.
    #[new]
    fn new(spec_json: &str) -> PyResult<Self> {
        let compiler = FormCompiler::new(spec_json)
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
        Ok(KatachiPy { compiler })
    }

    /// Returns the form model for a new configuration as a JSON string.
    fn form(&self) -> PyResult<String> {
        self.compiler
            .compile()
            .to_json()
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))
    }

    /// Returns the form model re-opened against a saved configuration.
    ///
    /// Args:
    ///     config_json (str): The stored configuration as a JSON object.
    fn edit(&self, config_json: &str) -> PyResult<String> {
        let config: serde_json::Value = serde_json::from_str(config_json)
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
        self.compiler
            .compile_for_edit(&config)
            .model
            .to_json()
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))
    }

    /// Messages for properties that were skipped as malformed.
    fn diagnostics(&self) -> Vec<String> {
        self.compiler
            .specification()
            .diagnostics
            .iter()
            .map(|e| e.to_string())
            .collect()
    }
}

/// Connector specification form engine.
#[pymodule]
fn katachi(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<KatachiPy>()?;
    Ok(())
}
