use std::collections::HashMap;
use std::env::VarError;

/// Read access to environment variables.
///
/// Image overrides are looked up through this seam so resolution can be
/// tested without mutating the process environment.
pub trait EnvLookup {
    /// Value of `key`; unset and empty variables are both `None`.
    fn var(&self, key: &str) -> Result<Option<String>, EnvError>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Result<Option<String>, EnvError> {
        non_empty(key, std::env::var(key))
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, key: &str) -> Result<Option<String>, EnvError> {
        Ok(self.get(key).filter(|v| !v.is_empty()).cloned())
    }
}

fn non_empty(key: &str, value: Result<String, VarError>) -> Result<Option<String>, EnvError> {
    match value {
        Ok(v) if v.is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(EnvError::NotUnicode {
            name: key.to_owned(),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("environment variable {name} is not valid UTF-8")]
    NotUnicode { name: String },
}

/// Environment variable that overrides the reference of image `image_name`.
///
/// `knative-serving-controller` → `KNATIVE_SERVING_CONTROLLER`.
pub fn override_var_name(image_name: &str) -> String {
    image_name.to_uppercase().replace('-', "_")
}
