//! Captured method invocations.
//!
//! Recording a call without executing it is left to the caller; this module
//! only defines the record such a mechanism produces and the trait through
//! which the link facade reads it.

use std::sync::Arc;

use crate::meta::{ControllerMeta, MethodKey, MethodMeta};
use crate::value::ArgValue;

/// A recorded call: target type, method and raw arguments.
#[derive(Debug, Clone)]
pub struct MethodInvocation {
    target_type: Arc<ControllerMeta>,
    method: Arc<MethodMeta>,
    arguments: Vec<ArgValue>,
}

impl MethodInvocation {
    /// Creates an invocation record; `arguments` holds one value per declared parameter.
    #[must_use]
    pub const fn new(
        target_type: Arc<ControllerMeta>,
        method: Arc<MethodMeta>,
        arguments: Vec<ArgValue>,
    ) -> Self {
        Self {
            target_type,
            method,
            arguments,
        }
    }

    /// Returns the type the method was invoked on.
    #[must_use]
    pub fn target_type(&self) -> &ControllerMeta {
        &self.target_type
    }

    /// Returns the invoked method.
    #[must_use]
    pub fn method(&self) -> &MethodMeta {
        &self.method
    }

    /// Returns the raw arguments in declaration order.
    #[must_use]
    pub fn arguments(&self) -> &[ArgValue] {
        &self.arguments
    }

    /// Returns the structural cache key of the invoked method, without
    /// object arguments.
    #[must_use]
    pub fn key(&self) -> MethodKey {
        MethodKey::new(&self.target_type, &self.method, 0)
    }
}

/// Anything that may carry a captured invocation.
///
/// Implemented by recording proxies. Values that do not carry an invocation
/// return `None` and are rejected by the link facade.
pub trait InvocationCapture {
    /// Returns the last recorded invocation.
    fn last_invocation(&self) -> Option<&MethodInvocation>;

    /// Returns path values already resolved out of band, consumed before
    /// any named path variable.
    fn object_parameters(&self) -> &[ArgValue] {
        &[]
    }
}

impl InvocationCapture for MethodInvocation {
    fn last_invocation(&self) -> Option<&MethodInvocation> {
        Some(self)
    }
}

impl<C: InvocationCapture> InvocationCapture for Option<C> {
    fn last_invocation(&self) -> Option<&MethodInvocation> {
        self.as_ref().and_then(|capture| capture.last_invocation())
    }

    fn object_parameters(&self) -> &[ArgValue] {
        match self {
            Some(capture) => capture.object_parameters(),
            None => &[],
        }
    }
}

impl<C: InvocationCapture + ?Sized> InvocationCapture for &C {
    fn last_invocation(&self) -> Option<&MethodInvocation> {
        (**self).last_invocation()
    }

    fn object_parameters(&self) -> &[ArgValue] {
        (**self).object_parameters()
    }
}

/// An invocation together with its resolved object arguments.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fast_links::{CapturedCall, ControllerMeta, InvocationCapture, MethodInvocation, MethodMeta};
///
/// let method = MethodMeta::builder("Orders", "show").mapping("/orders/{id}").build();
/// let invocation = MethodInvocation::new(
///     Arc::new(ControllerMeta::new("Orders")),
///     Arc::new(method),
///     Vec::new(),
/// );
/// let call = CapturedCall::new(invocation).with_object_parameters(vec![42_i64.into()]);
/// assert_eq!(call.object_parameters().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CapturedCall {
    invocation: MethodInvocation,
    object_parameters: Vec<ArgValue>,
}

impl CapturedCall {
    /// Wraps an invocation without object arguments.
    #[must_use]
    pub const fn new(invocation: MethodInvocation) -> Self {
        Self {
            invocation,
            object_parameters: Vec::new(),
        }
    }

    /// Sets the resolved object arguments.
    #[must_use]
    pub fn with_object_parameters(mut self, object_parameters: Vec<ArgValue>) -> Self {
        self.object_parameters = object_parameters;
        self
    }
}

impl InvocationCapture for CapturedCall {
    fn last_invocation(&self) -> Option<&MethodInvocation> {
        Some(&self.invocation)
    }

    fn object_parameters(&self) -> &[ArgValue] {
        &self.object_parameters
    }
}

/// Read-only snapshot of a captured call, as seen by compiler and renderer.
#[derive(Debug, Clone, Copy)]
pub struct InvocationRecord<'a> {
    invocation: &'a MethodInvocation,
    object_parameters: &'a [ArgValue],
}

impl<'a> InvocationRecord<'a> {
    /// Takes the snapshot, or returns `None` if `capture` carries no invocation.
    pub fn from_capture<C: InvocationCapture + ?Sized>(capture: &'a C) -> Option<Self> {
        capture.last_invocation().map(|invocation| Self {
            invocation,
            object_parameters: capture.object_parameters(),
        })
    }

    /// Creates a snapshot from its two data sources.
    #[must_use]
    pub const fn new(invocation: &'a MethodInvocation, object_parameters: &'a [ArgValue]) -> Self {
        Self {
            invocation,
            object_parameters,
        }
    }

    /// Returns the target type.
    #[must_use]
    pub fn target_type(&self) -> &'a ControllerMeta {
        self.invocation.target_type()
    }

    /// Returns the invoked method.
    #[must_use]
    pub fn method(&self) -> &'a MethodMeta {
        self.invocation.method()
    }

    /// Returns the raw arguments.
    #[must_use]
    pub fn raw_arguments(&self) -> &'a [ArgValue] {
        self.invocation.arguments()
    }

    /// Returns the resolved object arguments.
    #[must_use]
    pub const fn object_arguments(&self) -> &'a [ArgValue] {
        self.object_parameters
    }

    /// Returns the structural cache key, including the object argument count.
    #[must_use]
    pub fn key(&self) -> MethodKey {
        MethodKey::new(
            self.target_type(),
            self.method(),
            self.object_parameters.len(),
        )
    }
}
