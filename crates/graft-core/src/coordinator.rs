//! Lifecycle coordinator
//!
//! Runs the whole pipeline once:
//!
//! ```text
//! documents ─▶ inventory ─▶ extensions ─▶ bootstrap ─▶ translate ─▶ dispose
//! ```
//!
//! The container is disposed exactly once after a successful bootstrap,
//! whether translation succeeds or not. Definitions registered before a
//! translation failure are left in the target registry.

use crate::bootstrap::{Bootstrapped, Bootstrapper};
use crate::config::GraftConfig;
use crate::error::{Stage, TranslationFailure};
use crate::locator::ResourceLocator;
use crate::runtime::SourceRuntime;
use graft_namespace::{
    scan_documents, ExtensionLoader, ExtensionRegistry, Manifest, NamespaceConflict,
    NamespaceError, Resource,
};
use graft_translate::{
    ComponentErrorPolicy, ComponentTranslator, SourceContainer, TargetRegistry, TranslationReport,
};
use indexmap::IndexSet;

/// Disposes the wrapped container when dropped
struct DisposeGuard(Box<dyn SourceContainer>);

impl Drop for DisposeGuard {
    fn drop(&mut self) {
        tracing::debug!("Disposing source container");
        self.0.dispose();
    }
}

/// Drives one graph translation from documents to target registry
#[derive(Debug)]
pub struct LifecycleCoordinator<'a, R> {
    extensions: &'a ExtensionRegistry,
    bootstrapper: Bootstrapper<R>,
    translator: ComponentTranslator,
    conflict: NamespaceConflict,
    dump_components: bool,
}

impl<'a, R: SourceRuntime> LifecycleCoordinator<'a, R> {
    /// Create coordinator with default policies
    #[must_use]
    pub fn new(extensions: &'a ExtensionRegistry, runtime: R) -> Self {
        Self {
            extensions,
            bootstrapper: Bootstrapper::new(runtime),
            translator: ComponentTranslator::new(),
            conflict: NamespaceConflict::default(),
            dump_components: false,
        }
    }

    /// Create coordinator with the policies in `config`
    #[must_use]
    pub fn from_config(
        extensions: &'a ExtensionRegistry,
        runtime: R,
        config: &GraftConfig,
    ) -> Self {
        Self::new(extensions, runtime)
            .with_translator(
                ComponentTranslator::new()
                    .with_internal_marker(config.internal_marker.clone())
                    .with_placeholder(config.placeholder.clone())
                    .with_error_policy(config.component_errors),
            )
            .with_conflict(config.namespace_conflict)
            .with_dump_components(config.dump_components)
    }

    /// With translator
    #[inline]
    #[must_use]
    pub fn with_translator(mut self, translator: ComponentTranslator) -> Self {
        self.translator = translator;
        self
    }

    /// With namespace conflict policy
    #[inline]
    #[must_use]
    pub fn with_conflict(mut self, conflict: NamespaceConflict) -> Self {
        self.conflict = conflict;
        self
    }

    /// With component error policy
    #[inline]
    #[must_use]
    pub fn with_error_policy(mut self, policy: ComponentErrorPolicy) -> Self {
        self.translator = self.translator.with_error_policy(policy);
        self
    }

    /// With component dump after bootstrap
    #[inline]
    #[must_use]
    pub fn with_dump_components(mut self, dump: bool) -> Self {
        self.dump_components = dump;
        self
    }

    /// Translate the graph described by `documents` into `registry`
    ///
    /// # Errors
    /// Returns a [`TranslationFailure`] naming the failed stage and
    /// wrapping the original cause
    pub fn run<T>(
        &self,
        documents: &[Resource],
        manifests: &[Manifest],
        registry: &mut T,
    ) -> Result<TranslationReport, TranslationFailure>
    where
        T: TargetRegistry + ?Sized,
    {
        let inventory = scan_documents(documents).map_err(|e| {
            TranslationFailure::new(Stage::Inventory, NamespaceError::from(e))
        })?;
        tracing::info!(
            "Scanned {} document(s): {} namespace(s)",
            documents.len(),
            inventory.len()
        );

        let handlers = ExtensionLoader::new(self.extensions)
            .with_conflict(self.conflict)
            .load(manifests, &inventory)
            .map_err(|e| {
                TranslationFailure::new(Stage::Extensions, NamespaceError::from(e))
            })?;

        let Bootstrapped {
            container,
            component_ids,
        } = self
            .bootstrapper
            .bootstrap(documents, &inventory, &handlers)
            .map_err(|e| TranslationFailure::new(Stage::Bootstrap, e))?;

        let guard = DisposeGuard(container);
        if self.dump_components {
            dump(&*guard.0, &component_ids);
        }

        let result = self.translator.translate(&*guard.0, &component_ids, registry);
        drop(guard);

        let report = result.map_err(|e| TranslationFailure::new(Stage::Translate, e))?;
        tracing::info!(
            "Registered {} of {} component(s)",
            report.registered.len(),
            report.total()
        );
        Ok(report)
    }

    /// Locate documents and manifests per `config`, then [`run`](Self::run)
    ///
    /// # Errors
    /// Returns a [`TranslationFailure`]; locating problems are reported as
    /// [`Stage::Resources`]
    pub fn run_located<T>(
        &self,
        config: &GraftConfig,
        registry: &mut T,
    ) -> Result<TranslationReport, TranslationFailure>
    where
        T: TargetRegistry + ?Sized,
    {
        let locator = ResourceLocator::from_config(config);
        let documents = locator
            .documents(config)
            .map_err(|e| TranslationFailure::new(Stage::Resources, e))?;
        let manifests = locator
            .manifests(config)
            .map_err(|e| TranslationFailure::new(Stage::Resources, e))?;
        tracing::info!(
            "Located {} document(s) and {} manifest(s)",
            documents.len(),
            manifests.len()
        );
        self.run(&documents, &manifests, registry)
    }
}

fn dump(container: &dyn SourceContainer, component_ids: &IndexSet<String>) {
    for component_id in component_ids {
        match container.instance(component_id) {
            Some(instance) => tracing::trace!("{} {}", component_id, instance.type_name()),
            None => tracing::trace!("{} <no instance>", component_id),
        }
    }
}
