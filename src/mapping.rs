//! Route mapping discovery and template variable parsing.

use crate::error::CompileError;
use crate::meta::{ControllerMeta, MethodMeta};

/// Resolves the raw route template of a method invoked on a target type.
pub trait MappingDiscoverer: Send + Sync {
    /// Returns the mapping, e.g. `/sample/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NoMapping`] if the method is not routed.
    fn mapping(&self, target: &ControllerMeta, method: &MethodMeta) -> Result<String, CompileError>;
}

/// Composes the target type's mapping with the method's mapping.
///
/// # Examples
///
/// ```
/// use fast_links::{AnnotationMappingDiscoverer, ControllerMeta, MappingDiscoverer, MethodMeta};
///
/// let target = ControllerMeta::new("People").with_mapping("/people/");
/// let method = MethodMeta::builder("People", "show").mapping("/{id}").build();
///
/// let mapping = AnnotationMappingDiscoverer.mapping(&target, &method).unwrap();
/// assert_eq!(mapping, "/people/{id}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationMappingDiscoverer;

impl MappingDiscoverer for AnnotationMappingDiscoverer {
    fn mapping(&self, target: &ControllerMeta, method: &MethodMeta) -> Result<String, CompileError> {
        match (target.mapping(), method.mapping()) {
            (None, None) => Err(CompileError::NoMapping {
                type_name: target.name().to_string(),
                method: method.name().to_string(),
            }),
            (Some(type_mapping), None) => Ok(type_mapping.to_string()),
            (None, Some(method_mapping)) => Ok(method_mapping.to_string()),
            (Some(type_mapping), Some(method_mapping)) => Ok(join(type_mapping, method_mapping)),
        }
    }
}

impl<F> MappingDiscoverer for F
where
    F: Fn(&ControllerMeta, &MethodMeta) -> Result<String, CompileError> + Send + Sync,
{
    fn mapping(&self, target: &ControllerMeta, method: &MethodMeta) -> Result<String, CompileError> {
        self(target, method)
    }
}

fn join(type_mapping: &str, method_mapping: &str) -> String {
    let head = type_mapping.trim_end_matches('/');
    let tail = method_mapping.trim_start_matches('/');
    if tail.is_empty() {
        return type_mapping.to_string();
    }
    format!("{head}/{tail}")
}

/// Extracts the variable names of a mapping, left to right.
///
/// Repeated variables are reported once per occurrence. A `:pattern`
/// suffix is not part of the name, and braces nested inside a variable
/// belong to its pattern.
///
/// # Errors
///
/// Returns [`CompileError::UnclosedVariable`] if a `{` is never closed.
///
/// # Examples
///
/// ```
/// use fast_links::variable_names;
///
/// let names = variable_names("/sample/{id}/{date}/{id}").unwrap();
/// assert_eq!(names, vec!["id", "date", "id"]);
///
/// let names = variable_names("/codes/{code:[a-z]{3}}").unwrap();
/// assert_eq!(names, vec!["code"]);
/// ```
pub fn variable_names(mapping: &str) -> Result<Vec<String>, CompileError> {
    let mut names = Vec::new();
    let mut level = 0usize;
    let mut start = 0usize;

    for (i, c) in mapping.char_indices() {
        match c {
            '{' => {
                if level == 0 {
                    start = i;
                }
                level += 1;
            }
            '}' if level > 0 => {
                level -= 1;
                if level == 0 {
                    let body = &mapping[start + 1..i];
                    let name = body.split_once(':').map_or(body, |(name, _)| name).trim();
                    names.push(name.to_string());
                }
            }
            _ => {}
        }
    }

    if level > 0 {
        return Err(CompileError::UnclosedVariable {
            mapping: mapping.to_string(),
            position: start,
        });
    }

    Ok(names)
}
