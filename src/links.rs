//! The link facade.

use std::sync::{Arc, LazyLock};

use crate::base_uri::{BaseUriResolver, FixedBaseUri};
use crate::cache::TemplateCache;
use crate::compiler::{DuplicateNames, LinkTemplateCompiler};
use crate::config::LinkConfig;
use crate::convert::{FormattingConverter, ValueConverter};
use crate::error::{ConfigError, LinkError};
use crate::invocation::{InvocationCapture, InvocationRecord};
use crate::mapping::MappingDiscoverer;
use crate::template::LinkTemplate;

static LINKS: LazyLock<FastLinks> = LazyLock::new(FastLinks::default);

/// Builds the absolute link to a captured call using the process-wide
/// default instance (base URI `http://localhost`).
///
/// # Errors
///
/// See [`FastLinks::link_to`].
pub fn link_to<C: InvocationCapture + ?Sized>(capture: &C) -> Result<String, LinkError> {
    LINKS.link_to(capture)
}

/// Turns captured method invocations into absolute links.
///
/// Each method is compiled into a [`LinkTemplate`] once; later calls only
/// render the cached template with the new arguments. Safe to share across
/// threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fast_links::{
///     ControllerMeta, FastLinks, LinkConfig, MethodInvocation, MethodMeta, ParamMeta, ParamType,
/// };
///
/// let links = FastLinks::new(LinkConfig::new().with_base_uri("https://api.example.com")).unwrap();
///
/// let method = Arc::new(
///     MethodMeta::builder("Orders", "show")
///         .mapping("/orders/{id}")
///         .param(ParamMeta::path_variable("id", ParamType::Long))
///         .param(ParamMeta::request_param("expand", ParamType::Bool))
///         .build(),
/// );
/// let controller = Arc::new(ControllerMeta::new("Orders"));
///
/// let call = MethodInvocation::new(controller, method, vec![7_i64.into(), true.into()]);
/// assert_eq!(
///     links.link_to(&call).unwrap(),
///     "https://api.example.com/orders/7?expand=true"
/// );
/// ```
pub struct FastLinks {
    cache: TemplateCache,
    converter: Arc<dyn ValueConverter>,
    base_uri: Arc<dyn BaseUriResolver>,
    duplicate_names: DuplicateNames,
}

impl FastLinks {
    /// Creates an instance from `config` with the default collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured base URI is invalid.
    pub fn new(config: LinkConfig) -> Result<Self, ConfigError> {
        let base_uri = FixedBaseUri::parse(&config.base_uri)?;
        Ok(Self::with_parts(
            LinkTemplateCompiler::default().with_duplicate_names(config.duplicate_names),
            Arc::new(base_uri),
            config.duplicate_names,
        ))
    }

    fn with_parts(
        compiler: LinkTemplateCompiler,
        base_uri: Arc<dyn BaseUriResolver>,
        duplicate_names: DuplicateNames,
    ) -> Self {
        Self {
            cache: TemplateCache::new(compiler),
            converter: Arc::new(FormattingConverter),
            base_uri,
            duplicate_names,
        }
    }

    /// Replaces the mapping discoverer.
    ///
    /// Starts from an empty template cache.
    #[must_use]
    pub fn with_mapping_discoverer(mut self, discoverer: impl MappingDiscoverer + 'static) -> Self {
        let compiler = LinkTemplateCompiler::new(Box::new(discoverer))
            .with_duplicate_names(self.duplicate_names);
        self.cache = TemplateCache::new(compiler);
        self
    }

    /// Replaces the value converter used for typed parameters.
    #[must_use]
    pub fn with_converter(mut self, converter: impl ValueConverter + 'static) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    /// Replaces the base URI resolver.
    #[must_use]
    pub fn with_base_uri_resolver(mut self, resolver: impl BaseUriResolver + 'static) -> Self {
        self.base_uri = Arc::new(resolver);
        self
    }

    /// Builds the absolute link to the call recorded in `capture`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotAnInvocation`] if `capture` carries no
    /// invocation, [`LinkError::Compile`] if the method cannot be compiled,
    /// and the render errors of [`LinkTemplate::render`].
    pub fn link_to<C: InvocationCapture + ?Sized>(&self, capture: &C) -> Result<String, LinkError> {
        let record = InvocationRecord::from_capture(capture).ok_or(LinkError::NotAnInvocation)?;
        let template = self.cache.get(&record)?;
        let base_uri = self.base_uri.base_uri();
        template.render(&record, &base_uri, self.converter.as_ref())
    }

    /// Returns the compiled template for the call recorded in `capture`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotAnInvocation`] or [`LinkError::Compile`].
    pub fn template<C: InvocationCapture + ?Sized>(
        &self,
        capture: &C,
    ) -> Result<Arc<LinkTemplate>, LinkError> {
        let record = InvocationRecord::from_capture(capture).ok_or(LinkError::NotAnInvocation)?;
        Ok(self.cache.get(&record)?)
    }

    /// Returns the template cache.
    #[must_use]
    pub const fn cache(&self) -> &TemplateCache {
        &self.cache
    }
}

impl Default for FastLinks {
    fn default() -> Self {
        Self::with_parts(
            LinkTemplateCompiler::default(),
            Arc::new(FixedBaseUri::default()),
            DuplicateNames::default(),
        )
    }
}

impl std::fmt::Debug for FastLinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastLinks")
            .field("cache", &self.cache)
            .field("base_uri", &self.base_uri.base_uri())
            .finish_non_exhaustive()
    }
}
