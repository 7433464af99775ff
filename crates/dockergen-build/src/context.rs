use std::collections::BTreeMap;

use serde::Serialize;

/// A value bound to a template variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    String(String),
    List(Vec<String>),
    Map(BTreeMap<String, ContextValue>),
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Vec<String>> for ContextValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, ContextValue>> for ContextValue {
    fn from(value: BTreeMap<String, ContextValue>) -> Self {
        Self::Map(value)
    }
}

/// Variables available to one template render.
///
/// Built fresh for every render; templates fail on any variable that is not
/// set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext {
    vars: BTreeMap<String, ContextValue>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ContextValue>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.vars.get(name)
    }

    /// String value of `name`, if set and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.vars.get(name)? {
            ContextValue::String(s) => Some(s),
            ContextValue::List(_) | ContextValue::Map(_) => None,
        }
    }
}
