//! Component graph translator
//!
//! Walks a bootstrapped source container and registers one target
//! definition per user component.
//!
//! # Classification
//! - instance type contains the internal marker → internal, skipped
//! - metadata not bean-shaped → skipped
//! - everything else → translated
//!
//! # Type repair
//! Constructor references declared with the untyped placeholder are retyped
//! to the referenced instance's concrete type so the target registry can
//! pick a constructor overload unambiguously.

use crate::error::TranslateError;
use crate::registry::TargetRegistry;
use crate::report::{SkippedComponent, TranslationReport};
use crate::source::SourceContainer;
use graft_model::{
    AutowireMode, BeanMetadata, ComponentMetadata, DefinitionBuilder, MetadataValue, Scope,
    TargetDefinition, Wiring, INTERNAL_TYPE_MARKER, UNTYPED_PLACEHOLDER,
};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// What a failing component does to the rest of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentErrorPolicy {
    /// First failure stops translation
    #[default]
    Abort,

    /// Failing components are logged, recorded and skipped
    SkipComponent,
}

/// Translates source components into target definitions
#[derive(Debug, Clone)]
pub struct ComponentTranslator {
    placeholder: String,
    internal_marker: String,
    error_policy: ComponentErrorPolicy,
}

impl Default for ComponentTranslator {
    fn default() -> Self {
        Self {
            placeholder: UNTYPED_PLACEHOLDER.to_string(),
            internal_marker: INTERNAL_TYPE_MARKER.to_string(),
            error_policy: ComponentErrorPolicy::default(),
        }
    }
}

enum Outcome {
    Definition(TargetDefinition),
    Internal(String),
    NotBean(String),
}

impl ComponentTranslator {
    /// Create translator with default placeholder and marker
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With untyped placeholder type name
    #[inline]
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// With internal-type marker
    #[inline]
    #[must_use]
    pub fn with_internal_marker(mut self, marker: impl Into<String>) -> Self {
        self.internal_marker = marker.into();
        self
    }

    /// With component error policy
    #[inline]
    #[must_use]
    pub fn with_error_policy(mut self, policy: ComponentErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Translate every component in `component_ids` into `registry`
    ///
    /// Definitions registered before a failure stay registered.
    ///
    /// # Errors
    /// Under [`ComponentErrorPolicy::Abort`], returns the first component error
    pub fn translate<C, R>(
        &self,
        container: &C,
        component_ids: &IndexSet<String>,
        registry: &mut R,
    ) -> Result<TranslationReport, TranslateError>
    where
        C: SourceContainer + ?Sized,
        R: TargetRegistry + ?Sized,
    {
        let mut report = TranslationReport::default();

        for component_id in component_ids {
            let result = self
                .translate_component(container, component_ids, component_id)
                .and_then(|outcome| match outcome {
                    Outcome::Definition(definition) => {
                        registry.register_definition(component_id, definition)?;
                        report.registered.push(component_id.clone());
                        Ok(())
                    }
                    Outcome::Internal(type_name) => {
                        tracing::debug!("Skipping component {} {}", component_id, type_name);
                        report.internal.push(component_id.clone());
                        Ok(())
                    }
                    Outcome::NotBean(shape) => {
                        tracing::debug!("Not translating {} component {}", shape, component_id);
                        report.not_bean.push(component_id.clone());
                        Ok(())
                    }
                });

            if let Err(error) = result {
                match self.error_policy {
                    ComponentErrorPolicy::Abort => return Err(error),
                    ComponentErrorPolicy::SkipComponent => {
                        tracing::warn!("Skipping component {}: {}", component_id, error);
                        report.failed.push(SkippedComponent {
                            component_id: component_id.clone(),
                            reason: error.to_string(),
                        });
                    }
                }
            }
        }

        tracing::info!(
            "Translated {} component(s), skipped {} internal, {} non-bean, {} failed",
            report.registered.len(),
            report.internal.len(),
            report.not_bean.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn translate_component<C>(
        &self,
        container: &C,
        component_ids: &IndexSet<String>,
        component_id: &str,
    ) -> Result<Outcome, TranslateError>
    where
        C: SourceContainer + ?Sized,
    {
        let instance = container
            .instance(component_id)
            .ok_or_else(|| TranslateError::MissingInstance(component_id.to_string()))?;
        if instance.type_name().contains(&self.internal_marker) {
            return Ok(Outcome::Internal(instance.type_name().to_string()));
        }

        let metadata = container
            .metadata(component_id)
            .ok_or_else(|| TranslateError::MissingMetadata(component_id.to_string()))?;
        let bean = match metadata {
            ComponentMetadata::Bean(bean) => bean,
            ComponentMetadata::Other { shape } => return Ok(Outcome::NotBean(shape)),
        };

        let implementation_type = bean
            .class_name
            .clone()
            .or_else(|| bean.runtime_class.clone())
            .unwrap_or_else(|| instance.type_name().to_string());
        tracing::debug!("Translating {} as {}", component_id, implementation_type);

        let builder = DefinitionBuilder::new(implementation_type)
            .autowire(AutowireMode::ByName)
            .scope(Scope::Singleton)
            .init_method(bean.init_method.clone());
        let builder = self.wire_properties(builder, &bean, component_ids, component_id)?;
        let builder = self.wire_arguments(builder, &bean, container, component_ids, component_id)?;
        Ok(Outcome::Definition(builder.build()))
    }

    fn wire_properties(
        &self,
        mut builder: DefinitionBuilder,
        bean: &BeanMetadata,
        component_ids: &IndexSet<String>,
        component_id: &str,
    ) -> Result<DefinitionBuilder, TranslateError> {
        for property in &bean.properties {
            let wiring = match &property.value {
                MetadataValue::Reference { component_id: target } => {
                    if !component_ids.contains(target) {
                        return Err(TranslateError::unresolved(component_id, target));
                    }
                    Wiring::reference(target)
                }
                MetadataValue::Literal { value, .. } => Wiring::literal(value),
                MetadataValue::Other { shape } => {
                    return Err(TranslateError::unsupported(
                        component_id,
                        format!("property '{}'", property.name),
                        shape,
                    ))
                }
            };
            builder = builder.property(&property.name, wiring);
        }
        Ok(builder)
    }

    fn wire_arguments<C>(
        &self,
        mut builder: DefinitionBuilder,
        bean: &BeanMetadata,
        container: &C,
        component_ids: &IndexSet<String>,
        component_id: &str,
    ) -> Result<DefinitionBuilder, TranslateError>
    where
        C: SourceContainer + ?Sized,
    {
        for (index, argument) in bean.arguments.iter().enumerate() {
            builder = match &argument.value {
                MetadataValue::Reference { component_id: target } => {
                    if !component_ids.contains(target) {
                        return Err(TranslateError::unresolved(component_id, target));
                    }
                    let type_name = if argument.value_type.as_deref() == Some(&*self.placeholder) {
                        let referenced = container
                            .instance(target)
                            .ok_or_else(|| TranslateError::unresolved(component_id, target))?;
                        tracing::trace!(
                            "Retyped argument {} of {} to {}",
                            index,
                            component_id,
                            referenced.type_name()
                        );
                        Some(referenced.type_name().to_string())
                    } else {
                        argument.value_type.clone()
                    };
                    builder.constructor_arg(type_name, Wiring::reference(target))
                }
                MetadataValue::Literal { value, type_name } => builder.constructor_arg(
                    argument.value_type.clone().or_else(|| type_name.clone()),
                    Wiring::literal(value),
                ),
                MetadataValue::Other { shape } => {
                    return Err(TranslateError::unsupported(
                        component_id,
                        format!("argument {index}"),
                        shape,
                    ))
                }
            };
        }
        Ok(builder)
    }
}
