//! Fast, cached links to controller methods.
//!
//! This crate turns a captured method invocation into an absolute link by
//! substituting the call's arguments into the method's request mapping.
//!
//! # Overview
//!
//! Building a link the naive way walks the method's metadata, parses its
//! mapping and resolves every parameter on each call. Here that work happens
//! once per method: the mapping is compiled into a [`LinkTemplate`], a flat
//! list of literal text and value slots, and cached. Later calls only fetch
//! the arguments, encode them and append them to a buffer.
//!
//! ```text
//! /sample/{id}?q={q}   +   show(7, "abc")   =>   http://localhost/sample/7?q=abc
//! ```
//!
//! Values are validated, never escaped: a value containing a character that
//! is not allowed in its URI component fails the link with
//! [`EncodeError::Rejected`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use fast_links::{link_to, ControllerMeta, MethodInvocation, MethodMeta, ParamMeta, ParamType};
//!
//! // Describe the controller method once
//! let method = Arc::new(
//!     MethodMeta::builder("SampleController", "list")
//!         .mapping("/sample/list")
//!         .param(ParamMeta::request_param("id", ParamType::Long))
//!         .param(ParamMeta::request_param("ids", ParamType::Collection(Box::new(ParamType::Long))))
//!         .build(),
//! );
//! let controller = Arc::new(ControllerMeta::new("SampleController"));
//!
//! // Link to a recorded call
//! let call = MethodInvocation::new(controller, method, vec![1_i64.into(), vec![2_i64, 3, 4].into()]);
//! assert_eq!(
//!     link_to(&call).unwrap(),
//!     "http://localhost/sample/list?id=1&ids=2&ids=3&ids=4"
//! );
//! ```
//!
//! # Binding Rules
//!
//! | Mapping element | Value source |
//! |-----------------|--------------|
//! | `{variable}` | next unused object argument, else the path-variable parameter of that name |
//! | query parameter | the bound argument; null is skipped, collections repeat `name=value` |
//!
//! Use [`FastLinks`] directly to configure the base URI, the mapping
//! discovery or the conversion of typed values.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod accessor;
mod base_uri;
mod cache;
mod charset;
mod compiler;
mod config;
mod constants;
mod convert;
mod encoder;
mod error;
mod invocation;
mod links;
mod mapping;
mod meta;
pub mod prelude;
mod template;
mod value;

pub use accessor::{ArgSource, ParamAccessor};
pub use base_uri::{BaseUriResolver, FixedBaseUri};
pub use cache::TemplateCache;
pub use charset::{SegmentKind, is_pchar, is_sub_delim, is_unreserved};
pub use compiler::{DuplicateNames, LinkTemplateCompiler};
pub use config::LinkConfig;
pub use constants::{DEFAULT_BASE_URI, ELEMENT_SEPARATOR, PARAM_SEPARATOR, QUERY_SEPARATOR};
pub use convert::{FormattingConverter, ValueConverter};
pub use encoder::Encoder;
pub use error::{CompileError, ConfigError, ConversionError, EncodeError, LinkError};
pub use invocation::{CapturedCall, InvocationCapture, InvocationRecord, MethodInvocation};
pub use links::{FastLinks, link_to};
pub use mapping::{AnnotationMappingDiscoverer, MappingDiscoverer, variable_names};
pub use meta::{
    Binding, BindingRole, BoundParameter, ControllerMeta, IsoFormat, MethodKey, MethodMeta,
    MethodMetaBuilder, ParamMeta, ParamType, TypeDescriptor,
};
pub use template::{Component, LinkTemplate};
pub use value::{ArgValue, EnumValue};
