//! The capability contract between drivers and user models
//!
//! A model is a mutable bag of named attributes plus a fixed set of named
//! zero-argument output operations, each a pure function of current
//! attribute state. Drivers only ever touch a model through the four
//! operations on [`Model`]; they never assume anything about its structure.
//!
//! Name dispatch is a plain `match` inside each implementation rather than
//! any form of reflection. All model state must be owned data, so the
//! `Clone` supertrait yields a full structural copy with no aliasing back
//! to the original; that per-call copy is what isolates a driver's
//! mutations from the caller's model instance.

use rustc_hash::FxHashMap;

use crate::error::ModelError;
use crate::value::Value;

/// Snapshot of a model's full attribute state, name to value
pub type AttributeMap = FxHashMap<String, Value>;

/// Capability contract any user model must satisfy.
///
/// Output operations must be re-evaluable any number of times with no side
/// effects other than reading attributes.
pub trait Model: Clone {
    /// Names of every mutable attribute, used to snapshot baseline state
    fn attribute_names(&self) -> &'static [&'static str];

    /// Read the named attribute
    fn get_attribute(&self, name: &str) -> Result<Value, ModelError>;

    /// Overwrite the named attribute
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ModelError>;

    /// Look up and evaluate the named output operation
    fn invoke_output(&self, name: &str) -> Result<Value, ModelError>;
}

/// Capture the full attribute state of a model as a name → value map
pub fn snapshot<M: Model>(model: &M) -> Result<AttributeMap, ModelError> {
    let mut attrs = AttributeMap::default();
    for &name in model.attribute_names() {
        attrs.insert(name.to_string(), model.get_attribute(name)?);
    }
    Ok(attrs)
}
