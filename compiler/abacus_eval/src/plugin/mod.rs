//! Plugin lifecycle.
//!
//! ```text
//! Unloaded --load--> Loaded --unload--> Unloaded
//! ```
//!
//! `load` enables every plugin not in the disabled set, rebuilds the
//! promotion table, then tells each listener once. `unload` tells the
//! listeners first (the names are still registered at that point), disables
//! the plugins that were enabled, and clears the registry with its caches.
//! `reload` is `unload` followed by `load`.

use abacus_ir::GrammarListener;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::Registry;

/// A bundle of registrations.
pub trait Plugin: Send {
    /// Stable identifier, used for de-duplication and the disabled set.
    fn id(&self) -> &str;

    fn on_enable(&self, registry: &mut Registry);

    /// Registrations are dropped by the manager after this returns; override
    /// only to release resources of your own.
    fn on_disable(&self, _registry: &mut Registry) {}
}

#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
    registry: Registry,
    /// Ids enabled by the last `load`, in enable order.
    enabled: Vec<String>,
    loaded: bool,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin. A second plugin with an id already present is ignored.
    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) -> bool {
        if self.plugins.iter().any(|p| p.id() == plugin.id()) {
            debug!(id = plugin.id(), "plugin already added");
            return false;
        }
        self.plugins.push(plugin);
        true
    }

    /// Remove a plugin by id. Takes effect on the next load.
    pub fn remove_plugin(&mut self, id: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|p| p.id() != id);
        self.plugins.len() != before
    }

    pub fn plugin_ids(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.id()).collect()
    }

    pub fn enabled_plugin_ids(&self) -> &[String] {
        &self.enabled
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load(
        &mut self,
        disabled: &FxHashSet<String>,
        listeners: &mut [&mut dyn GrammarListener],
    ) {
        if self.loaded {
            warn!("load requested while already loaded; ignoring");
            return;
        }
        for plugin in &self.plugins {
            if disabled.contains(plugin.id()) {
                debug!(id = plugin.id(), "plugin disabled");
                continue;
            }
            plugin.on_enable(&mut self.registry);
            self.enabled.push(plugin.id().to_string());
        }
        self.registry.rebuild_promotions();
        self.loaded = true;
        for listener in listeners.iter_mut() {
            listener.on_load(&self.registry);
        }
        debug!(enabled = ?self.enabled, "plugins loaded");
    }

    pub fn unload(&mut self, listeners: &mut [&mut dyn GrammarListener]) {
        if !self.loaded {
            return;
        }
        for listener in listeners.iter_mut() {
            listener.on_unload(&self.registry);
        }
        for plugin in &self.plugins {
            if self.enabled.iter().any(|id| id == plugin.id()) {
                plugin.on_disable(&mut self.registry);
            }
        }
        self.registry.clear();
        self.enabled.clear();
        self.loaded = false;
        debug!("plugins unloaded");
    }

    pub fn reload(
        &mut self,
        disabled: &FxHashSet<String>,
        listeners: &mut [&mut dyn GrammarListener],
    ) {
        self.unload(listeners);
        self.load(disabled, listeners);
    }
}
