//! The deprecation emitter facade.
//!
//! A [`Deprecation`] is bound to one namespace and orchestrates the full
//! per-invocation sequence: capture the caller frame, fingerprint the
//! (entity, site) pair, claim it in the seen-set, and — on first claim only —
//! render and hand exactly one chunk to the sink.

use crate::application::capture::FrameCapture;
use crate::application::cache::{CallSiteCache, SiteState};
use crate::application::ports::{Clock, DiagnosticSink, StackProvider, Storage};
use crate::application::wrap::DeprecatedFn;
use crate::domain::entity::EntityDescriptor;
use crate::domain::fingerprint::Fingerprint;
use crate::domain::message::synthesize;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::format::{render, RenderOptions};
use crate::infrastructure::sink::StderrSink;
use crate::infrastructure::stack::BacktraceProvider;
use crate::infrastructure::storage::ShardedStorage;
use std::env;
use std::io;
use std::sync::Arc;

/// Frames between a public entry point and the provider's capture point.
///
/// Approximate: inlining folds internal frames unpredictably, so
/// [`FrameCapture`] additionally filters machinery frames by symbol prefix.
const INTERNAL_FRAME_SKIP: usize = 3;

/// Environment variable suppressing warnings for listed namespaces.
const NO_DEPRECATION: &str = "NO_DEPRECATION";

/// Environment variable enabling stack traces for listed namespaces.
const TRACE_DEPRECATION: &str = "TRACE_DEPRECATION";

/// Error returned when emitter construction fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A namespace is required and must be non-empty
    EmptyNamespace,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyNamespace => {
                write!(f, "namespace is required and must be non-empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The default seen-set storage.
pub type DefaultStorage = Arc<ShardedStorage<Fingerprint, SiteState>>;

/// A deprecation emitter bound to a library namespace.
///
/// Cheap to clone; clones share the seen-set, so a call site warned through
/// one clone stays warned through all of them.
///
/// # Examples
///
/// ```no_run
/// use depwarn::Deprecation;
///
/// let deprecate = Deprecation::new("my-lib").unwrap();
/// deprecate.warn("my-lib::old_api is deprecated, use new_api instead").ok();
/// ```
#[derive(Debug, Clone)]
pub struct Deprecation<S = DefaultStorage>
where
    S: Storage<Fingerprint, SiteState> + Clone,
{
    namespace: Arc<str>,
    cache: CallSiteCache<S>,
    capture: FrameCapture,
    sink: Arc<dyn DiagnosticSink>,
    clock: Arc<dyn Clock>,
    bare_entity: Arc<EntityDescriptor>,
    labels: Arc<ShardedStorage<String, Arc<EntityDescriptor>>>,
    suppressed: bool,
    traced: bool,
}

impl Deprecation<DefaultStorage> {
    /// Create an emitter with the production adapters (stderr sink, backtrace
    /// stack provider, system clock, fresh seen-set).
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyNamespace`] if `namespace` is empty.
    pub fn new(namespace: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(namespace).build()
    }

    /// Start building an emitter with injected adapters.
    pub fn builder(namespace: impl Into<String>) -> DeprecationBuilder {
        DeprecationBuilder {
            namespace: namespace.into(),
            sink: None,
            stack_provider: None,
            clock: None,
            storage: None,
            suppressed: None,
            traced: None,
        }
    }
}

impl<S> Deprecation<S>
where
    S: Storage<Fingerprint, SiteState> + Clone,
{
    /// Warn with an explicit message, keyed by the caller's location.
    ///
    /// The first call from each distinct source location writes one warning;
    /// repeats from the same location are silent no-ops. Returns the sink's
    /// write error on a first emission that fails; a deduplicated call never
    /// fails.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let entity = Arc::clone(&self.bare_entity);
        self.emit_for(&entity, Some(message))
    }

    /// Warn with a declaration-site label instead of a message.
    ///
    /// The label (typically an object/property path such as
    /// `"my-lib.oldProperty"`) goes through message synthesis verbatim.
    /// Each label maps to one stable entity, shared across clones, so
    /// repeated calls from one site collapse to a single warning.
    pub fn warn_label(&self, label: &str) -> io::Result<()> {
        let entity = self.labels.with_entry_mut(
            label.to_string(),
            || Arc::new(EntityDescriptor::bare_labeled(label)),
            |entity| Arc::clone(entity),
        );
        self.emit_for(&entity, None)
    }

    /// Wrap a function so each call site warns once, with a synthesized
    /// message derived from `entity`.
    ///
    /// The wrapper forwards arguments, the return value, and panics
    /// unchanged; deprecation logging is purely observational.
    pub fn function<F>(&self, f: F, entity: EntityDescriptor) -> DeprecatedFn<F, S> {
        DeprecatedFn::new(self.clone(), Arc::new(entity), None, f)
    }

    /// Wrap a function with an explicit message overriding synthesis.
    pub fn function_with_message<F>(
        &self,
        f: F,
        entity: EntityDescriptor,
        message: impl Into<String>,
    ) -> DeprecatedFn<F, S> {
        DeprecatedFn::new(self.clone(), Arc::new(entity), Some(message.into()), f)
    }

    /// The namespace this emitter is bound to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether this namespace is suppressed (`NO_DEPRECATION`).
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Whether emissions carry a stack trace (`TRACE_DEPRECATION`).
    pub fn is_traced(&self) -> bool {
        self.traced
    }

    /// Number of distinct (entity, call site) pairs warned so far.
    pub fn seen_sites(&self) -> usize {
        self.cache.len()
    }

    /// Forget all seen call sites. Intended for test isolation.
    pub fn reset_seen(&self) {
        self.cache.reset();
    }

    /// One invocation of a deprecated entity: capture, claim, render, write.
    pub(crate) fn emit_for(
        &self,
        entity: &EntityDescriptor,
        explicit: Option<&str>,
    ) -> io::Result<()> {
        if self.suppressed {
            return Ok(());
        }

        let frame = self.capture.caller_frame(INTERNAL_FRAME_SKIP);
        let key = Fingerprint::new(entity.id(), &frame);

        let claimed = self.cache.claim(key, || match explicit {
            Some(message) => message.to_string(),
            None => synthesize(entity, &frame),
        });
        let Some(message) = claimed else {
            // Already warned from this site.
            return Ok(());
        };

        let color = self.sink.color_capable();
        let options = RenderOptions {
            color,
            timestamp: (!color).then(|| self.clock.now_utc()),
            trace: self
                .traced
                .then(|| self.capture.user_frames(INTERNAL_FRAME_SKIP)),
        };

        let chunk = render(&self.namespace, &message, &frame, &options);
        self.sink.write_chunk(&chunk)
    }
}

/// Builder for a [`Deprecation`] emitter.
///
/// Every port is injectable; anything not supplied defaults to the
/// production adapter. Suppression and tracing default to the process
/// environment (`NO_DEPRECATION`, `TRACE_DEPRECATION`) and can be overridden
/// explicitly for tests.
#[derive(Debug)]
pub struct DeprecationBuilder {
    namespace: String,
    sink: Option<Arc<dyn DiagnosticSink>>,
    stack_provider: Option<Arc<dyn StackProvider>>,
    clock: Option<Arc<dyn Clock>>,
    storage: Option<DefaultStorage>,
    suppressed: Option<bool>,
    traced: Option<bool>,
}

impl DeprecationBuilder {
    /// Use a custom diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use a custom stack provider.
    pub fn with_stack_provider(mut self, provider: Arc<dyn StackProvider>) -> Self {
        self.stack_provider = Some(provider);
        self
    }

    /// Use a custom clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use an existing seen-set, shared with other emitters.
    pub fn with_storage(mut self, storage: DefaultStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Override environment-derived suppression.
    pub fn suppressed(mut self, suppressed: bool) -> Self {
        self.suppressed = Some(suppressed);
        self
    }

    /// Override environment-derived stack tracing.
    pub fn traced(mut self, traced: bool) -> Self {
        self.traced = Some(traced);
        self
    }

    /// Validate and build the emitter.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyNamespace`] if the namespace is empty.
    pub fn build(self) -> Result<Deprecation<DefaultStorage>, ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }

        let suppressed = self
            .suppressed
            .unwrap_or_else(|| namespace_listed(NO_DEPRECATION, &self.namespace));
        let traced = self
            .traced
            .unwrap_or_else(|| namespace_listed(TRACE_DEPRECATION, &self.namespace));

        let provider: Arc<dyn StackProvider> = self
            .stack_provider
            .unwrap_or_else(|| Arc::new(BacktraceProvider::new()));
        let sink: Arc<dyn DiagnosticSink> =
            self.sink.unwrap_or_else(|| Arc::new(StderrSink::new()));
        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(ShardedStorage::new()));

        Ok(Deprecation {
            namespace: self.namespace.into(),
            cache: CallSiteCache::new(storage),
            capture: FrameCapture::new(provider),
            sink,
            clock,
            bare_entity: Arc::new(EntityDescriptor::bare()),
            labels: Arc::new(ShardedStorage::new()),
            suppressed,
            traced,
        })
    }
}

/// Whether `namespace` appears in the list held by the environment variable
/// `var`. An unset variable lists nothing.
fn namespace_listed(var: &str, namespace: &str) -> bool {
    env::var(var)
        .map(|list| list_matches(&list, namespace))
        .unwrap_or(false)
}

/// Whether `namespace` appears in a comma/space-separated `list`. A `*`
/// entry matches every namespace; matching ignores ASCII case.
fn list_matches(list: &str, namespace: &str) -> bool {
    list.split([',', ' '])
        .filter(|entry| !entry.is_empty())
        .any(|entry| entry == "*" || entry.eq_ignore_ascii_case(namespace))
}
