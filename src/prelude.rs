//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for describing controller methods
//! and linking to recorded calls:
//!
//! ```rust
//! use std::sync::Arc;
//! use fast_links::prelude::*;
//!
//! let method = MethodMeta::builder("Sample", "all").mapping("/sample").build();
//! let call = MethodInvocation::new(Arc::new(ControllerMeta::new("Sample")), Arc::new(method), vec![]);
//! assert_eq!(link_to(&call).unwrap(), "http://localhost/sample");
//! ```
//!
//! Template internals (`Component`, `Encoder`, `ParamAccessor`) are
//! intentionally excluded.

pub use crate::{
    // Facade
    FastLinks, LinkConfig, link_to,
    // Metadata
    ControllerMeta, EnumValue, IsoFormat, MethodMeta, ParamMeta, ParamType, TypeDescriptor,
    // Invocations
    ArgValue, CapturedCall, InvocationCapture, MethodInvocation,
    // Collaborators
    BaseUriResolver, FixedBaseUri, FormattingConverter, MappingDiscoverer, ValueConverter,
    // Errors
    CompileError, ConfigError, ConversionError, EncodeError, LinkError,
};
