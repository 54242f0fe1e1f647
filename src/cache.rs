//! Process-lifetime cache of compiled link templates.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::compiler::LinkTemplateCompiler;
use crate::error::CompileError;
use crate::invocation::InvocationRecord;
use crate::meta::MethodKey;
use crate::template::LinkTemplate;

/// Compiled templates keyed by method identity.
///
/// Lookups never block each other across shards. A miss compiles outside
/// any lock; when two threads miss the same key concurrently both compile,
/// the first to store wins, and both return the stored template. Failed
/// compilations are not cached. Entries are never evicted.
#[derive(Debug)]
pub struct TemplateCache {
    compiler: LinkTemplateCompiler,
    templates: DashMap<MethodKey, Arc<LinkTemplate>>,
}

impl TemplateCache {
    /// Creates an empty cache compiling with `compiler`.
    #[must_use]
    pub fn new(compiler: LinkTemplateCompiler) -> Self {
        Self {
            compiler,
            templates: DashMap::new(),
        }
    }

    /// Returns the template for the invoked method, compiling it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the method cannot be compiled.
    pub fn get(&self, invocation: &InvocationRecord<'_>) -> Result<Arc<LinkTemplate>, CompileError> {
        let key = invocation.key();
        if let Some(template) = self.templates.get(&key) {
            tracing::trace!(method = %key, "link template cache hit");
            return Ok(Arc::clone(template.value()));
        }

        let compiled = Arc::new(self.compiler.compile(invocation)?);
        tracing::debug!(
            method = %key,
            path_components = compiled.path_components().len(),
            query_components = compiled.query_components().len(),
            "compiled link template"
        );

        let stored = match self.templates.entry(key) {
            Entry::Occupied(entry) => {
                tracing::debug!(method = %entry.key(), "link template compiled concurrently, keeping stored one");
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => Arc::clone(entry.insert(compiled).value()),
        };
        Ok(stored)
    }

    /// Returns the number of cached templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if nothing has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new(LinkTemplateCompiler::default())
    }
}
