//! Engine configuration.
//!
//! Two knobs: which number implementation new contexts use, and which
//! plugins stay disabled on load. Both are read at startup and on every
//! [`Abacus::reload`](crate::Abacus::reload).

use rustc_hash::FxHashSet;

/// Environment variable naming the number implementation.
pub const NUMBER_ENV: &str = "ABACUS_NUMBER";

/// Implementation used when nothing else is configured.
pub const DEFAULT_NUMBER_IMPLEMENTATION: &str = "naive";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub number_implementation: String,
    pub disabled_plugins: FxHashSet<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            number_implementation: DEFAULT_NUMBER_IMPLEMENTATION.to_string(),
            disabled_plugins: FxHashSet::default(),
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for [`NUMBER_ENV`].
    /// Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut configuration = Self::default();
        if let Some(name) = lookup(NUMBER_ENV) {
            let name = name.trim();
            if !name.is_empty() {
                configuration.number_implementation = name.to_string();
            }
        }
        configuration
    }

    #[must_use]
    pub fn with_number_implementation(mut self, name: impl Into<String>) -> Self {
        self.number_implementation = name.into();
        self
    }

    #[must_use]
    pub fn with_disabled_plugin(mut self, id: impl Into<String>) -> Self {
        self.disabled_plugins.insert(id.into());
        self
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled_plugins.contains(id)
    }

    /// Apply one `--number=` or `--disable=` flag. Returns `false` for
    /// anything else so the caller can handle it.
    pub fn apply_flag(&mut self, arg: &str) -> bool {
        if let Some(name) = arg.strip_prefix("--number=") {
            self.number_implementation = name.to_string();
        } else if let Some(ids) = arg.strip_prefix("--disable=") {
            self.disabled_plugins.extend(
                ids.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string),
            );
        } else {
            return false;
        }
        true
    }
}
