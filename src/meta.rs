//! Explicit controller and method metadata.
//!
//! These types describe what a link needs to know about a handler method:
//! its route mapping, the declared type of each parameter, and which
//! parameters are bound to path variables or query parameters. They are
//! registered once and shared by every invocation of the method.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Declared type of a method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamType {
    /// Text
    String,
    /// Boolean
    Bool,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// Enumeration, by type name
    Enum(String),
    /// Array of the element type
    Array(Box<ParamType>),
    /// Ordered collection of the element type
    Collection(Box<ParamType>),
    /// Keyed dictionary, by type name
    Map(String),
    /// Calendar date
    Date,
    /// Instant with offset
    DateTime,
    /// Any other named type
    Other(String),
}

impl ParamType {
    /// Returns true if values of this type are stringified directly.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Bool
                | Self::Int
                | Self::Long
                | Self::Enum(_)
                | Self::Array(_)
                | Self::Collection(_)
        )
    }

    /// Returns true if values of this type can never be encoded into a link.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns a stable name for this type.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::Bool => write!(f, "Boolean"),
            Self::Int => write!(f, "Integer"),
            Self::Long => write!(f, "Long"),
            Self::Enum(name) | Self::Map(name) | Self::Other(name) => write!(f, "{name}"),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Collection(element) => write!(f, "List<{element}>"),
            Self::Date => write!(f, "Date"),
            Self::DateTime => write!(f, "DateTime"),
        }
    }
}

/// ISO-8601 format hint for temporal parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IsoFormat {
    /// `yyyy-MM-dd`
    Date,
    /// `yyyy-MM-ddTHH:mm:ss.SSSZ`
    DateTime,
}

/// A parameter type plus the conversion hints attached to the parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDescriptor {
    /// The declared type
    pub ty: ParamType,
    /// Optional date format hint
    pub format: Option<IsoFormat>,
}

impl TypeDescriptor {
    /// Creates a descriptor without hints.
    #[must_use]
    pub const fn new(ty: ParamType) -> Self {
        Self { ty, format: None }
    }

    /// Attaches a date format hint.
    #[must_use]
    pub fn with_format(mut self, format: IsoFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl From<ParamType> for TypeDescriptor {
    fn from(ty: ParamType) -> Self {
        Self::new(ty)
    }
}

/// Whether a parameter supplies a path variable or a query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BindingRole {
    /// Substituted into a `{variable}` of the mapping
    PathVariable,
    /// Appended as `name=value` to the query string
    QueryParameter,
}

/// The binding of a parameter to a link variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binding {
    /// The binding role
    pub role: BindingRole,
    /// External name; defaults to the parameter name
    pub name: Option<String>,
}

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMeta {
    name: String,
    descriptor: TypeDescriptor,
    binding: Option<Binding>,
}

impl ParamMeta {
    /// Creates an unbound parameter.
    pub fn new(name: impl Into<String>, descriptor: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            binding: None,
        }
    }

    /// Creates a parameter bound to the path variable of the same name.
    pub fn path_variable(name: impl Into<String>, descriptor: impl Into<TypeDescriptor>) -> Self {
        Self::new(name, descriptor).bind(BindingRole::PathVariable, None)
    }

    /// Creates a parameter bound to the query parameter of the same name.
    pub fn request_param(name: impl Into<String>, descriptor: impl Into<TypeDescriptor>) -> Self {
        Self::new(name, descriptor).bind(BindingRole::QueryParameter, None)
    }

    /// Binds the parameter, optionally under an external name.
    #[must_use]
    pub fn bind(mut self, role: BindingRole, name: Option<&str>) -> Self {
        self.binding = Some(Binding {
            role,
            name: name.map(str::to_string),
        });
        self
    }

    /// Renames the external variable of an already bound parameter.
    #[must_use]
    pub fn named(mut self, external: &str) -> Self {
        if let Some(binding) = self.binding.as_mut() {
            binding.name = Some(external.to_string());
        }
        self
    }

    /// Returns the declared parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Returns the binding, if any.
    #[must_use]
    pub const fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    /// Returns the external variable name if bound in `role`.
    #[must_use]
    pub fn external_name(&self, role: BindingRole) -> Option<&str> {
        self.binding
            .as_ref()
            .filter(|b| b.role == role)
            .map(|b| b.name.as_deref().unwrap_or(&self.name))
    }
}

/// A parameter bound in a given role, with its declared position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundParameter<'a> {
    /// External variable name
    pub name: &'a str,
    /// Position among the method's declared parameters
    pub index: usize,
    /// The declared parameter
    pub param: &'a ParamMeta,
}

/// The type a method was invoked on, with its type-level mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerMeta {
    name: Arc<str>,
    mapping: Option<String>,
}

impl ControllerMeta {
    /// Creates a controller without a type-level mapping.
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            mapping: None,
        }
    }

    /// Sets the type-level mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: impl Into<String>) -> Self {
        self.mapping = Some(mapping.into());
        self
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type-level mapping, if any.
    #[must_use]
    pub fn mapping(&self) -> Option<&str> {
        self.mapping.as_deref()
    }
}

/// A handler method.
///
/// # Examples
///
/// ```
/// use fast_links::{BindingRole, MethodMeta, ParamMeta, ParamType};
///
/// let method = MethodMeta::builder("SampleController", "sample_method")
///     .mapping("/sample/{id}")
///     .param(ParamMeta::path_variable("id", ParamType::Long))
///     .param(ParamMeta::request_param("id1", ParamType::Long))
///     .build();
///
/// assert_eq!(method.signature(), "SampleController#sample_method(Long,Long)");
/// let query: Vec<_> = method.bound_parameters(BindingRole::QueryParameter).collect();
/// assert_eq!(query[0].name, "id1");
/// assert_eq!(query[0].index, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMeta {
    declaring_type: String,
    name: String,
    mapping: Option<String>,
    params: Vec<ParamMeta>,
    signature: Arc<str>,
}

impl MethodMeta {
    /// Starts building a method declared on `declaring_type`.
    pub fn builder(declaring_type: impl Into<String>, name: impl Into<String>) -> MethodMetaBuilder {
        MethodMetaBuilder {
            declaring_type: declaring_type.into(),
            name: name.into(),
            mapping: None,
            params: Vec::new(),
        }
    }

    /// Returns the declaring type name.
    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the method-level mapping, if any.
    #[must_use]
    pub fn mapping(&self) -> Option<&str> {
        self.mapping.as_deref()
    }

    /// Returns the declared parameters in order.
    #[must_use]
    pub fn params(&self) -> &[ParamMeta] {
        &self.params
    }

    /// Returns `Declaring#name(Type,...)`.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Returns the parameters bound in `role`, in declaration order.
    pub fn bound_parameters(&self, role: BindingRole) -> impl Iterator<Item = BoundParameter<'_>> {
        self.params.iter().enumerate().filter_map(move |(index, param)| {
            param
                .external_name(role)
                .map(|name| BoundParameter { name, index, param })
        })
    }
}

/// Builder for [`MethodMeta`].
#[derive(Debug, Clone)]
pub struct MethodMetaBuilder {
    declaring_type: String,
    name: String,
    mapping: Option<String>,
    params: Vec<ParamMeta>,
}

impl MethodMetaBuilder {
    /// Sets the method-level mapping.
    #[must_use]
    pub fn mapping(mut self, mapping: impl Into<String>) -> Self {
        self.mapping = Some(mapping.into());
        self
    }

    /// Appends a declared parameter.
    #[must_use]
    pub fn param(mut self, param: ParamMeta) -> Self {
        self.params.push(param);
        self
    }

    /// Builds the method metadata.
    #[must_use]
    pub fn build(self) -> MethodMeta {
        let types: Vec<String> = self
            .params
            .iter()
            .map(|p| p.descriptor.ty.type_name())
            .collect();
        let signature = format!("{}#{}({})", self.declaring_type, self.name, types.join(","));

        MethodMeta {
            declaring_type: self.declaring_type,
            name: self.name,
            mapping: self.mapping,
            params: self.params,
            signature: Arc::from(signature),
        }
    }
}

/// Structural identity of an invoked method, used as the template cache key.
///
/// Includes the target type because the type-level mapping of the target,
/// not of the declaring type, is part of the link. Includes the number of
/// resolved object arguments because they bind path variables ahead of the
/// named parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    target_type: Arc<str>,
    signature: Arc<str>,
    object_count: usize,
}

impl MethodKey {
    /// Derives the key for `method` invoked on `target` with `object_count`
    /// resolved object arguments.
    #[must_use]
    pub fn new(target: &ControllerMeta, method: &MethodMeta, object_count: usize) -> Self {
        Self {
            target_type: Arc::clone(&target.name),
            signature: Arc::clone(&method.signature),
            object_count,
        }
    }

    /// Returns the number of resolved object arguments.
    #[must_use]
    pub const fn object_count(&self) -> usize {
        self.object_count
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.target_type, self.signature)?;
        if self.object_count > 0 {
            write!(f, "+{}obj", self.object_count)?;
        }
        Ok(())
    }
}
