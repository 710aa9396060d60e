//! Container disposal is observed through mocks: expectations are verified
//! when the mock is dropped, so `times(1)` fails the test on zero or two
//! calls.

use graft_core::{BootstrapError, LifecycleCoordinator, SourceRuntime, Stage};
use graft_model::{BeanArgument, BeanMetadata, ComponentMetadata, NamespaceInventory};
use graft_namespace::{ExtensionRegistry, NamespaceHandlerSet, Resource};
use graft_test_utils::{blueprint_document, StaticInstance};
use graft_translate::{ComponentInstance, DefinitionStore, SourceContainer, TranslateError};
use indexmap::IndexSet;
use mockall::mock;
use std::sync::{Arc, Mutex};

mock! {
    Container {}
    impl SourceContainer for Container {
        fn component_ids(&self) -> IndexSet<String>;
        fn instance(&self, component_id: &str) -> Option<Arc<dyn ComponentInstance>>;
        fn metadata(&self, component_id: &str) -> Option<ComponentMetadata>;
        fn dispose(&mut self);
    }
}

struct MockRuntime {
    container: Mutex<Option<MockContainer>>,
}

impl MockRuntime {
    fn new(container: MockContainer) -> Self {
        Self {
            container: Mutex::new(Some(container)),
        }
    }
}

impl SourceRuntime for MockRuntime {
    fn builtin_namespaces(&self) -> NamespaceInventory {
        [graft_model::BLUEPRINT_CORE_NAMESPACE].into_iter().collect()
    }

    fn create_container(
        &self,
        _documents: &[Resource],
        _handlers: &NamespaceHandlerSet,
    ) -> Result<Box<dyn SourceContainer>, BootstrapError> {
        self.container
            .lock()
            .unwrap()
            .take()
            .map(|c| Box::new(c) as Box<dyn SourceContainer>)
            .ok_or_else(|| BootstrapError::runtime("container already handed out"))
    }
}

fn ids(ids: &[&str]) -> IndexSet<String> {
    ids.iter().map(|id| (*id).to_string()).collect()
}

fn instance(type_name: &'static str) -> Option<Arc<dyn ComponentInstance>> {
    let instance: Arc<dyn ComponentInstance> = Arc::new(StaticInstance::new(type_name));
    Some(instance)
}

#[test]
fn dispose_once_after_success() {
    let mut container = MockContainer::new();
    container
        .expect_component_ids()
        .times(1)
        .returning(|| ids(&["a", "b"]));
    container.expect_instance().returning(|id| match id {
        "a" => instance("com.acme.A"),
        "b" => instance("com.acme.B"),
        _ => None,
    });
    container.expect_metadata().returning(|id| match id {
        "a" => Some(BeanMetadata::new().into()),
        "b" => Some(
            BeanMetadata::new()
                .with_argument(BeanArgument::reference("a", Some("java.lang.Object")))
                .into(),
        ),
        _ => None,
    });
    container.expect_dispose().times(1).return_const(());

    let extensions = ExtensionRegistry::with_defaults().unwrap();
    let mut store = DefinitionStore::new();
    let report = LifecycleCoordinator::new(&extensions, MockRuntime::new(container))
        .run(&[blueprint_document(&[])], &[], &mut store)
        .unwrap();

    assert_eq!(report.registered.len(), 2);
    assert_eq!(
        store.get("b").unwrap().constructor_args[0].type_name.as_deref(),
        Some("com.acme.A")
    );
}

#[test]
fn dispose_once_after_translation_failure() {
    let mut container = MockContainer::new();
    container
        .expect_component_ids()
        .returning(|| ids(&["orphan"]));
    container
        .expect_instance()
        .returning(|_| instance("com.acme.Orphan"));
    container.expect_metadata().returning(|_| None);
    container.expect_dispose().times(1).return_const(());

    let extensions = ExtensionRegistry::with_defaults().unwrap();
    let failure = LifecycleCoordinator::new(&extensions, MockRuntime::new(container))
        .run(&[blueprint_document(&[])], &[], &mut DefinitionStore::new())
        .unwrap_err();

    assert_eq!(failure.stage(), Stage::Translate);
    assert!(matches!(
        failure.cause(),
        graft_core::GraftError::Translate(TranslateError::MissingMetadata(_))
    ));
}

#[test]
fn internal_components_are_never_registered() {
    let mut container = MockContainer::new();
    container
        .expect_component_ids()
        .returning(|| ids(&["blueprintBundleContext", "user"]));
    container.expect_instance().returning(|id| match id {
        "blueprintBundleContext" => instance("org.apache.aries.blueprint.BundleContextImpl"),
        _ => instance("com.acme.User"),
    });
    container
        .expect_metadata()
        .times(1)
        .returning(|id| (id == "user").then(|| BeanMetadata::new().into()));
    container.expect_dispose().times(1).return_const(());

    let extensions = ExtensionRegistry::with_defaults().unwrap();
    let mut store = DefinitionStore::new();
    let report = LifecycleCoordinator::new(&extensions, MockRuntime::new(container))
        .run(&[blueprint_document(&[])], &[], &mut store)
        .unwrap();

    assert_eq!(report.internal, vec!["blueprintBundleContext"]);
    assert_eq!(store.ids().collect::<Vec<_>>(), vec!["user"]);
}
