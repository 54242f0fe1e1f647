//! Compilation of method metadata into link templates.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::accessor::ParamAccessor;
use crate::charset::SegmentKind;
use crate::encoder::Encoder;
use crate::error::CompileError;
use crate::invocation::InvocationRecord;
use crate::mapping::{AnnotationMappingDiscoverer, MappingDiscoverer, variable_names};
use crate::meta::{BindingRole, BoundParameter, MethodMeta};
use crate::template::{Component, LinkTemplate};

/// Which binding wins when two path-variable bindings share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicateNames {
    /// The later-declared parameter wins
    #[default]
    LastWins,
    /// The first-declared parameter wins
    FirstWins,
}

/// Compiles an invocation's method into a [`LinkTemplate`].
///
/// The outcome depends only on method metadata and the number of resolved
/// object arguments, never on argument values.
pub struct LinkTemplateCompiler {
    discoverer: Box<dyn MappingDiscoverer>,
    duplicate_names: DuplicateNames,
}

impl Default for LinkTemplateCompiler {
    fn default() -> Self {
        Self::new(Box::new(AnnotationMappingDiscoverer))
    }
}

impl LinkTemplateCompiler {
    /// Creates a compiler resolving mappings with `discoverer`.
    #[must_use]
    pub fn new(discoverer: Box<dyn MappingDiscoverer>) -> Self {
        Self {
            discoverer,
            duplicate_names: DuplicateNames::default(),
        }
    }

    /// Sets the duplicate path-variable name policy.
    #[must_use]
    pub const fn with_duplicate_names(mut self, policy: DuplicateNames) -> Self {
        self.duplicate_names = policy;
        self
    }

    /// Compiles the template for the method of `invocation`.
    ///
    /// Each `{variable}` of the mapping, in order of appearance, is bound to
    /// the next unused resolved object argument if one remains, otherwise to
    /// the path-variable parameter of that name. Every query-parameter
    /// binding becomes a query component in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the method has no mapping, the mapping is
    /// malformed, or a variable cannot be bound.
    pub fn compile(&self, invocation: &InvocationRecord<'_>) -> Result<LinkTemplate, CompileError> {
        let method = invocation.method();
        let mapping = self.discoverer.mapping(invocation.target_type(), method)?;
        let variables = variable_names(&mapping)?;

        let path = self.path_components(
            &mapping,
            &variables,
            invocation.object_arguments().len(),
            method,
        )?;
        let query = query_components(method);

        Ok(LinkTemplate::new(path, query))
    }

    fn path_components(
        &self,
        mapping: &str,
        variables: &[String],
        object_count: usize,
        method: &MethodMeta,
    ) -> Result<Vec<Component>, CompileError> {
        let bound = self.index(method.bound_parameters(BindingRole::PathVariable));
        let mut components = Vec::with_capacity(variables.len() * 2 + 1);
        let mut objects_used = 0;
        let mut start = 0;

        for variable in variables {
            let token = format!("{{{variable}}}");
            let idx = mapping[start..]
                .find(&token)
                .map(|offset| start + offset)
                .ok_or_else(|| CompileError::TokenNotFound {
                    variable: variable.clone(),
                    mapping: mapping.to_string(),
                })?;

            if idx > start {
                components.push(Component::Literal(mapping[start..idx].to_string()));
            }

            if objects_used < object_count {
                components.push(Component::PathValue {
                    variable: variable.clone(),
                    accessor: ParamAccessor::Object(objects_used),
                    encoder: Encoder::Direct(SegmentKind::PathSegment),
                });
                objects_used += 1;
            } else if let Some(parameter) = bound.get(variable.as_str()) {
                components.push(Component::PathValue {
                    variable: variable.clone(),
                    accessor: ParamAccessor::Argument(parameter.index),
                    encoder: Encoder::for_parameter(
                        parameter.param.descriptor(),
                        SegmentKind::PathSegment,
                    ),
                });
            } else {
                return Err(CompileError::VariableNotFound {
                    variable: variable.clone(),
                    method: method.signature().to_string(),
                });
            }

            start = idx + token.len();
        }

        if start < mapping.len() {
            components.push(Component::Literal(mapping[start..].to_string()));
        }

        Ok(components)
    }

    fn index<'a>(
        &self,
        parameters: impl Iterator<Item = BoundParameter<'a>>,
    ) -> HashMap<&'a str, BoundParameter<'a>> {
        let mut names = HashMap::new();
        for parameter in parameters {
            match self.duplicate_names {
                DuplicateNames::LastWins => {
                    names.insert(parameter.name, parameter);
                }
                DuplicateNames::FirstWins => {
                    names.entry(parameter.name).or_insert(parameter);
                }
            }
        }
        names
    }
}

fn query_components(method: &MethodMeta) -> Vec<Component> {
    method
        .bound_parameters(BindingRole::QueryParameter)
        .map(|parameter| Component::QueryValue {
            name: parameter.name.to_string(),
            accessor: ParamAccessor::Argument(parameter.index),
            encoder: Encoder::for_parameter(parameter.param.descriptor(), SegmentKind::QueryParam),
        })
        .collect()
}

impl std::fmt::Debug for LinkTemplateCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkTemplateCompiler")
            .field("duplicate_names", &self.duplicate_names)
            .finish_non_exhaustive()
    }
}
