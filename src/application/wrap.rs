//! The function-wrapping combinator.
//!
//! [`DeprecatedFn`] wraps a function so that every call first runs the
//! capture/dedup/render sequence, then forwards all arguments to the inner
//! function and returns its result unchanged. Wrapping never alters the
//! return value or panic behavior of the wrapped function.

use crate::application::cache::SiteState;
use crate::application::emitter::Deprecation;
use crate::application::ports::Storage;
use crate::domain::entity::EntityDescriptor;
use crate::domain::fingerprint::Fingerprint;
use std::sync::Arc;

/// Calling a function with an argument tuple.
///
/// Implemented for plain functions and closures of arity 0 through 6, so
/// [`DeprecatedFn::call`] can forward any argument list as one tuple:
/// arity 0 takes `()`, arity 1 takes `(a,)`, arity 2 takes `(a, b)`, and
/// so on.
pub trait FnArgs<Args> {
    /// The wrapped function's return type.
    type Output;

    /// Invoke with the given argument tuple.
    fn call_args(&self, args: Args) -> Self::Output;
}

macro_rules! impl_fn_args {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg),*> FnArgs<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Ret,
        {
            type Output = Ret;

            #[allow(non_snake_case)]
            fn call_args(&self, ($($arg,)*): ($($arg,)*)) -> Ret {
                (self)($($arg),*)
            }
        }
    };
}

impl_fn_args!();
impl_fn_args!(A1);
impl_fn_args!(A1, A2);
impl_fn_args!(A1, A2, A3);
impl_fn_args!(A1, A2, A3, A4);
impl_fn_args!(A1, A2, A3, A4, A5);
impl_fn_args!(A1, A2, A3, A4, A5, A6);

/// A deprecated function: the original plus per-call-site warning.
///
/// Created by [`Deprecation::function`] and
/// [`Deprecation::function_with_message`]. Each invocation through
/// [`call`](Self::call) warns at most once per distinct call site, keyed by
/// this wrapper's entity identity, then forwards to the inner function.
///
/// # Examples
///
/// ```no_run
/// use depwarn::{Deprecation, EntityDescriptor};
///
/// let deprecate = Deprecation::new("my-lib").unwrap();
/// let oldfn = deprecate.function(
///     |a: i32, b: i32| b,
///     EntityDescriptor::named("oldfn").with_arity(2),
/// );
///
/// assert_eq!(oldfn.call((1, 2)), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DeprecatedFn<F, S = crate::application::emitter::DefaultStorage>
where
    S: Storage<Fingerprint, SiteState> + Clone,
{
    emitter: Deprecation<S>,
    entity: Arc<EntityDescriptor>,
    message: Option<String>,
    inner: F,
}

impl<F, S> DeprecatedFn<F, S>
where
    S: Storage<Fingerprint, SiteState> + Clone,
{
    pub(crate) fn new(
        emitter: Deprecation<S>,
        entity: Arc<EntityDescriptor>,
        message: Option<String>,
        inner: F,
    ) -> Self {
        Self {
            emitter,
            entity,
            message,
            inner,
        }
    }

    /// Invoke the wrapped function, warning on the first call from each
    /// distinct call site.
    ///
    /// Arguments are forwarded as a tuple and the inner function's result is
    /// returned unchanged; panics from the inner function (or from a
    /// panicking sink) propagate untouched. Sink write errors in this path
    /// stay with the sink adapter so the wrapped signature is preserved.
    pub fn call<Args>(&self, args: Args) -> F::Output
    where
        F: FnArgs<Args>,
    {
        let _ = self
            .emitter
            .emit_for(&self.entity, self.message.as_deref());
        self.inner.call_args(args)
    }

    /// Declared argument count of the wrapped function.
    pub fn arity(&self) -> usize {
        self.entity.arity()
    }

    /// The entity descriptor this wrapper warns for.
    pub fn entity(&self) -> &EntityDescriptor {
        &self.entity
    }

    /// Unwrap, returning the inner function.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::frame::CallFrame;
    use crate::infrastructure::mocks::{MockSink, MockStackProvider};

    fn emitter(sink: &MockSink, frames: Vec<CallFrame>) -> Deprecation {
        Deprecation::builder("my-lib")
            .with_sink(Arc::new(sink.clone()))
            .with_stack_provider(Arc::new(MockStackProvider::returning(frames)))
            .suppressed(false)
            .traced(false)
            .build()
            .unwrap()
    }

    fn caller(line: u32, column: u32) -> CallFrame {
        CallFrame::new("caller.rs", line, column).with_display_name("callold")
    }

    #[test]
    fn test_forwards_arguments_and_result() {
        let sink = MockSink::plain();
        let emitter = emitter(&sink, vec![caller(10, 1)]);
        let oldfn = emitter.function(
            |_a: i32, b: i32| b,
            EntityDescriptor::named("oldfn").with_arity(2),
        );

        assert_eq!(oldfn.call((1, 2)), 2);
        assert_eq!(sink.count(), 1);
        assert!(sink.single_chunk().contains("oldfn"));
    }

    #[test]
    fn test_zero_arity_call() {
        let sink = MockSink::plain();
        let emitter = emitter(&sink, vec![caller(10, 1)]);
        let oldfn = emitter.function(|| 7, EntityDescriptor::named("oldfn"));

        assert_eq!(oldfn.call(()), 7);
    }

    #[test]
    fn test_warns_once_per_site_across_calls() {
        let sink = MockSink::plain();
        let emitter = emitter(&sink, vec![caller(10, 1)]);
        let oldfn = emitter.function(|x: u32| x + 1, EntityDescriptor::named("oldfn").with_arity(1));

        for i in 0..5 {
            assert_eq!(oldfn.call((i,)), i + 1);
        }

        assert_eq!(sink.count(), 1);
    }

    #[test]
    fn test_two_wrappers_same_site_warn_separately() {
        // Same source location, different entities: two warnings.
        let sink = MockSink::plain();
        let emitter = emitter(&sink, vec![caller(10, 1)]);
        let old = emitter.function(|| 1, EntityDescriptor::named("old"));
        let old2 = emitter.function(|| 2, EntityDescriptor::named("old2"));

        old.call(());
        old2.call(());

        assert_eq!(sink.count(), 2);
    }

    #[test]
    fn test_explicit_message_overrides_synthesis() {
        let sink = MockSink::plain();
        let emitter = emitter(&sink, vec![caller(10, 1)]);
        let oldfn = emitter.function_with_message(
            || 0,
            EntityDescriptor::named("oldfn"),
            "use newfn instead",
        );

        oldfn.call(());

        let chunk = sink.single_chunk();
        assert!(chunk.contains("use newfn instead"));
    }

    #[test]
    fn test_arity_reports_declared_count() {
        let sink = MockSink::plain();
        let emitter = emitter(&sink, vec![caller(10, 1)]);
        let oldfn = emitter.function(
            |_a: i32, _b: i32| (),
            EntityDescriptor::named("oldfn").with_arity(2),
        );

        assert_eq!(oldfn.arity(), 2);
    }

    #[test]
    fn test_panic_propagates_after_warning() {
        let sink = MockSink::plain();
        let emitter = emitter(&sink, vec![caller(10, 1)]);
        let oldfn = emitter.function(
            || -> i32 { panic!("inner failure") },
            EntityDescriptor::named("oldfn"),
        );

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| oldfn.call(())));

        assert!(result.is_err());
        assert_eq!(sink.count(), 1);
    }

    #[test]
    fn test_into_inner_returns_wrapped_fn() {
        let sink = MockSink::plain();
        let emitter = emitter(&sink, vec![caller(10, 1)]);
        let oldfn = emitter.function(|x: i32| x * 2, EntityDescriptor::named("oldfn"));

        let inner = oldfn.into_inner();
        assert_eq!(inner(21), 42);
        // Unwrapped calls bypass the warning machinery entirely.
        assert_eq!(sink.count(), 0);
    }
}
