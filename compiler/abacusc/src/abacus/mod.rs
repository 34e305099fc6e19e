//! The `Abacus` facade.
//!
//! Owns the plugin manager, the tree builder that mirrors its grammar, the
//! configuration, and the context that persists between calculations.
//! Evaluation never mutates that context directly: a result carries its own
//! context and only [`Abacus::apply_to_context`] commits it.

use std::time::Duration;

use abacus_diagnostic::{timed_out, AbacusResult};
use abacus_eval::{
    evaluate, CancellationToken, Documentation, DocumentationKind, EvalResult, EvaluationContext,
    EvaluationResult, Plugin, PluginManager, Registry,
};
use abacus_ir::TreeNode;
use abacus_parse::{Token, TreeBuilder};
use abacus_std::StandardPlugin;
use crossbeam::channel;
use tracing::{debug, warn};

use crate::config::{Configuration, DEFAULT_NUMBER_IMPLEMENTATION};

pub struct Abacus {
    configuration: Configuration,
    plugins: PluginManager,
    builder: TreeBuilder,
    context: EvaluationContext,
}

impl Abacus {
    /// An engine with the standard plugin, loaded under `configuration`.
    pub fn new(configuration: Configuration) -> Self {
        Self::with_plugins(configuration, vec![Box::new(StandardPlugin)])
    }

    /// An engine with exactly `plugins`, loaded under `configuration`.
    pub fn with_plugins(configuration: Configuration, plugins: Vec<Box<dyn Plugin>>) -> Self {
        let mut manager = PluginManager::new();
        for plugin in plugins {
            manager.add_plugin(plugin);
        }
        let mut abacus = Abacus {
            configuration,
            plugins: manager,
            builder: TreeBuilder::new(),
            context: EvaluationContext::new(),
        };
        abacus.reload();
        abacus
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Replace the configuration and reload with it.
    pub fn set_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
        self.reload();
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    pub fn registry(&self) -> &Registry {
        self.plugins.registry()
    }

    /// Add a plugin. It takes effect on the next [`reload`](Self::reload).
    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) -> bool {
        self.plugins.add_plugin(plugin)
    }

    /// Remove a plugin. Its registrations stay until the next reload.
    pub fn remove_plugin(&mut self, id: &str) -> bool {
        self.plugins.remove_plugin(id)
    }

    pub fn context(&self) -> &EvaluationContext {
        &self.context
    }

    /// Unload every plugin, load again under the current configuration and
    /// reset the context.
    ///
    /// Variables and definitions are dropped since they may refer to names
    /// that no longer exist.
    pub fn reload(&mut self) {
        self.plugins
            .reload(&self.configuration.disabled_plugins, &mut [&mut self.builder]);
        self.context = EvaluationContext::new();
        match self.resolve_implementation() {
            Some(name) => self.context.set_number_implementation(name),
            None => warn!("no number implementation registered; evaluation will fail"),
        }
        debug!(
            implementation = ?self.context.number_implementation(),
            plugins = ?self.plugins.enabled_plugin_ids(),
            "reloaded"
        );
    }

    /// The configured implementation if registered, else the default, else
    /// any registered one.
    fn resolve_implementation(&self) -> Option<String> {
        let wanted = &self.configuration.number_implementation;
        let registered = self.registry().number_implementation_names();
        if registered.iter().any(|name| name == wanted) {
            return Some(wanted.clone());
        }
        let fallback = if registered.iter().any(|name| name == DEFAULT_NUMBER_IMPLEMENTATION) {
            Some(DEFAULT_NUMBER_IMPLEMENTATION.to_string())
        } else {
            registered.into_iter().next()
        };
        if let Some(name) = &fallback {
            warn!(wanted = %wanted, using = %name, "unknown number implementation");
        }
        fallback
    }

    pub fn tokenize(&self, text: &str) -> AbacusResult<Vec<Token>> {
        self.builder.tokenize(text)
    }

    pub fn parse(&self, text: &str) -> AbacusResult<TreeNode> {
        self.builder.parse(text)
    }

    /// Evaluate against a copy of the current context.
    pub fn evaluate(&self, tree: &TreeNode) -> AbacusResult<EvaluationResult> {
        self.evaluate_with_token(tree, CancellationToken::new())
    }

    /// Evaluate, stopping at the next check once `token` is cancelled.
    pub fn evaluate_with_token(
        &self,
        tree: &TreeNode,
        token: CancellationToken,
    ) -> AbacusResult<EvaluationResult> {
        evaluate(self.registry(), &self.context, tree, token)
    }

    /// Evaluate on a worker thread, cancelling it once `timeout` passes.
    ///
    /// Returns only after the worker has stopped, so a timed out call still
    /// waits out the cancellation latency of whatever primitive is running.
    pub fn evaluate_with_timeout(
        &self,
        tree: &TreeNode,
        timeout: Duration,
    ) -> AbacusResult<EvaluationResult> {
        let token = CancellationToken::new();
        let registry = self.registry();
        let context = &self.context;
        std::thread::scope(|scope| {
            let (sender, receiver) = channel::bounded(1);
            let worker_token = token.clone();
            scope.spawn(move || {
                // The receiver is gone once the deadline passed.
                sender
                    .send(evaluate(registry, context, tree, worker_token))
                    .ok();
            });
            match receiver.recv_timeout(timeout) {
                Ok(result) => result,
                Err(_) => {
                    token.cancel();
                    debug!(millis = timeout.as_millis(), "evaluation timed out");
                    Err(timed_out(timeout.as_millis()))
                }
            }
        })
    }

    /// Merge the bindings of `result` into the persistent context.
    pub fn apply_to_context(&mut self, result: &EvaluationResult) {
        self.context.apply(&result.context);
    }

    /// Parse, evaluate and commit on success. A failure leaves the context
    /// as it was.
    pub fn calculate(&mut self, text: &str) -> EvalResult {
        let tree = self.parse(text)?;
        let result = self.evaluate(&tree)?;
        self.apply_to_context(&result);
        Ok(result.value)
    }

    /// [`calculate`](Self::calculate) under a deadline.
    pub fn calculate_with_timeout(&mut self, text: &str, timeout: Duration) -> EvalResult {
        let tree = self.parse(text)?;
        let result = self.evaluate_with_timeout(&tree, timeout)?;
        self.apply_to_context(&result);
        Ok(result.value)
    }

    /// Documentation for `name`, trying functions before tree-value
    /// functions.
    pub fn documentation(&self, name: &str) -> Option<&Documentation> {
        let registry = self.registry();
        registry
            .documentation(name, DocumentationKind::Function)
            .or_else(|| registry.documentation(name, DocumentationKind::TreeValueFunction))
    }

    /// Every documentation entry mentioning `query`.
    pub fn search_documentation(&self, query: &str) -> Vec<&Documentation> {
        self.registry()
            .all_documentation()
            .iter()
            .filter(|entry| entry.matches(query))
            .collect()
    }
}

impl Default for Abacus {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

#[cfg(test)]
mod tests;
