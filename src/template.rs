//! Precompiled link templates.
//!
//! A [`LinkTemplate`] is a flat list of render steps built once per method.
//! Rendering it only fetches argument values, encodes them and appends text;
//! the structure was validated when the template was compiled.

use std::fmt::{self, Write as _};

use crate::accessor::ParamAccessor;
use crate::constants::{PARAM_SEPARATOR, QUERY_SEPARATOR};
use crate::convert::ValueConverter;
use crate::encoder::Encoder;
use crate::error::{EncodeError, LinkError};
use crate::invocation::InvocationRecord;
use crate::value::ArgValue;

/// One render step of a link template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Literal mapping text
    Literal(String),
    /// A path variable, substituted with one encoded value
    PathValue {
        /// Variable name from the mapping
        variable: String,
        /// Where the value comes from
        accessor: ParamAccessor,
        /// How the value is encoded
        encoder: Encoder,
    },
    /// A query parameter, emitted as `name=value` (repeated for collections)
    QueryValue {
        /// External parameter name
        name: String,
        /// Where the value comes from
        accessor: ParamAccessor,
        /// How each value is encoded
        encoder: Encoder,
    },
}

impl Component {
    /// Appends this component to `buf`.
    ///
    /// Returns whether anything was appended.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] if a value is missing, out of range, or cannot
    /// be encoded.
    pub fn append(
        &self,
        buf: &mut String,
        invocation: &InvocationRecord<'_>,
        converter: &dyn ValueConverter,
    ) -> Result<bool, LinkError> {
        match self {
            Self::Literal(text) => {
                buf.push_str(text);
                Ok(true)
            }
            Self::PathValue {
                variable,
                accessor,
                encoder,
            } => {
                let value = accessor.get(invocation)?;
                match encode(encoder, value, variable, converter)? {
                    Some(text) => {
                        buf.push_str(&text);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            Self::QueryValue {
                name,
                accessor,
                encoder,
            } => {
                let value = accessor.get(invocation)?;
                if let Some(elements) = value.elements() {
                    append_all(buf, name, elements, encoder, converter)
                } else {
                    match encode(encoder, value, name, converter)? {
                        Some(text) => {
                            append_pair(buf, name, &text);
                            Ok(true)
                        }
                        None => Ok(false),
                    }
                }
            }
        }
    }
}

fn encode(
    encoder: &Encoder,
    value: &ArgValue,
    parameter: &str,
    converter: &dyn ValueConverter,
) -> Result<Option<String>, LinkError> {
    encoder
        .encode(value, converter)
        .map_err(|source| LinkError::Encode {
            parameter: parameter.to_string(),
            source,
        })
}

fn append_all(
    buf: &mut String,
    name: &str,
    elements: &[ArgValue],
    encoder: &Encoder,
    converter: &dyn ValueConverter,
) -> Result<bool, LinkError> {
    for (i, element) in elements.iter().enumerate() {
        let text = encode(encoder, element, name, converter)?.ok_or_else(|| LinkError::Encode {
            parameter: name.to_string(),
            source: EncodeError::NullElement,
        })?;
        if i > 0 {
            buf.push(PARAM_SEPARATOR);
        }
        append_pair(buf, name, &text);
    }
    Ok(!elements.is_empty())
}

fn append_pair(buf: &mut String, name: &str, value: &str) {
    buf.push_str(name);
    buf.push('=');
    buf.push_str(value);
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{text}"),
            Self::PathValue { accessor, .. } => write!(f, "{{{accessor}}}"),
            Self::QueryValue { name, accessor, .. } => write!(f, "{name}={{{accessor}}}"),
        }
    }
}

/// A compiled, reusable plan for rendering the link to one method.
///
/// Templates hold no mutable state and are shared across threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fast_links::{
///     ControllerMeta, FormattingConverter, InvocationRecord, LinkTemplateCompiler,
///     MethodInvocation, MethodMeta, ParamMeta, ParamType,
/// };
///
/// let method = MethodMeta::builder("Sample", "show")
///     .mapping("/sample/{id}")
///     .param(ParamMeta::path_variable("id", ParamType::Long))
///     .build();
/// let invocation = MethodInvocation::new(
///     Arc::new(ControllerMeta::new("Sample")),
///     Arc::new(method),
///     vec![1_i64.into()],
/// );
/// let record = InvocationRecord::new(&invocation, &[]);
///
/// let template = LinkTemplateCompiler::default().compile(&record).unwrap();
/// assert_eq!(template.to_string(), "/sample/{arg0}");
///
/// let link = template.render(&record, "http://localhost", &FormattingConverter).unwrap();
/// assert_eq!(link, "http://localhost/sample/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkTemplate {
    path: Vec<Component>,
    query: Vec<Component>,
}

impl LinkTemplate {
    /// Creates a template from its path and query components.
    #[must_use]
    pub const fn new(path: Vec<Component>, query: Vec<Component>) -> Self {
        Self { path, query }
    }

    /// Returns the path components in render order.
    #[must_use]
    pub fn path_components(&self) -> &[Component] {
        &self.path
    }

    /// Returns the query components in render order.
    #[must_use]
    pub fn query_components(&self) -> &[Component] {
        &self.query
    }

    /// Renders the absolute link for `invocation` below `base_uri`.
    ///
    /// Null query values are skipped; a null path value fails the link.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::ArgumentMismatch`] for a null path value,
    /// [`LinkError::Encode`] for a value that cannot be encoded, and
    /// [`LinkError::AccessorOutOfRange`] if the invocation does not belong
    /// to the method this template was compiled for.
    pub fn render(
        &self,
        invocation: &InvocationRecord<'_>,
        base_uri: &str,
        converter: &dyn ValueConverter,
    ) -> Result<String, LinkError> {
        let mut buf = String::with_capacity(base_uri.len() + 64);
        buf.push_str(base_uri);

        for component in &self.path {
            if !component.append(&mut buf, invocation, converter)? {
                return Err(LinkError::ArgumentMismatch {
                    component: component.to_string(),
                });
            }
        }

        buf.push(QUERY_SEPARATOR);
        for component in &self.query {
            if component.append(&mut buf, invocation, converter)? {
                buf.push(PARAM_SEPARATOR);
            }
        }

        // trailing '?' or '&'
        buf.pop();

        Ok(buf)
    }
}

impl fmt::Display for LinkTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.path {
            write!(f, "{component}")?;
        }
        for (i, component) in self.query.iter().enumerate() {
            f.write_char(if i == 0 { QUERY_SEPARATOR } else { PARAM_SEPARATOR })?;
            write!(f, "{component}")?;
        }
        Ok(())
    }
}
