//! Named transformer functions.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::builtins;
use crate::error::TransformError;
use crate::frame::RowView;

/// A transformer: reads the named source columns of one row and returns the
/// target value, `None` meaning missing.
pub type TransformFn =
    Arc<dyn Fn(&RowView<'_>, &[String]) -> Result<Option<String>, TransformError> + Send + Sync>;

/// Lookup table from function name to transformer.
#[derive(Clone, Default)]
pub struct TransformerRegistry {
    functions: IndexMap<String, TransformFn>,
}

impl TransformerRegistry {
    /// Registry with no functions at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in transformers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(builtins::PASS_THROUGH, builtins::pass_through);
        registry.register(
            builtins::TRANSFORM_INPUT_SEX_TO_STD_SEX,
            builtins::transform_input_sex_to_std_sex,
        );
        registry.register(
            builtins::TRANSFORM_AGE_TO_LIFE_STAGE,
            builtins::transform_age_to_life_stage,
        );
        registry.register(
            builtins::TRANSFORM_DATE_TO_FORMATTED_DATE,
            builtins::transform_date_to_formatted_date,
        );
        registry
    }

    /// Registers `function` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&RowView<'_>, &[String]) -> Result<Option<String>, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
    }

    /// Copies every entry of `other` in, overriding same-named entries.
    pub fn extend(&mut self, other: &TransformerRegistry) {
        for (name, function) in &other.functions {
            self.functions.insert(name.clone(), Arc::clone(function));
        }
    }

    pub fn get(&self, name: &str) -> Option<&TransformFn> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
