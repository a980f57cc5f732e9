//! Access to the process environment variable table.
//!
//! The gates write to the environment through [`EnvTable`] so tests can hand
//! them an in-memory map instead of mutating the test process.

use std::collections::HashMap;

/// A mutable table of environment variables.
pub trait EnvTable {
    /// Read a variable, if set and valid unicode.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable for the rest of the process (and its children).
    fn set(&mut self, key: &str, value: &str);
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvTable for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

impl EnvTable for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}
