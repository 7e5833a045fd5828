//! Tracing shim for the graph operations.
//!
//! With the `tracing` feature enabled, `info_span!` and `debug!` are the
//! `tracing` macros and [`init_tracing`] installs a layer that totals span
//! timings per [`TimingScope`].  Without it, the macros expand to no-ops.
//! Nothing here installs a subscriber unless a caller asks for one.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::{BTreeMap, HashMap},
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing_subscriber::{
        Layer, Registry, layer::Context, layer::SubscriberExt, registry::LookupSpan,
        util::SubscriberInitExt,
    };

    type SpanTotals = BTreeMap<&'static str, (Duration, usize)>;

    thread_local! {
        static TIMINGS: RefCell<HashMap<TimingScope, SpanTotals>> = RefCell::new(HashMap::new());
        static CURRENT_SCOPE: RefCell<TimingScope> = const { RefCell::new(TimingScope::Operation) };
    }

    /// Bucket that closed spans are charged to.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TimingScope {
        /// Graph operations exercised by a test.
        Operation,
        /// Work done by the consistency checker.
        Consistency,
    }

    /// Restores the previous scope when dropped.
    pub struct TimingScopeGuard {
        previous: TimingScope,
    }

    impl Drop for TimingScopeGuard {
        fn drop(&mut self) {
            CURRENT_SCOPE.with(|scope| *scope.borrow_mut() = self.previous);
        }
    }

    pub fn set_timing_scope(scope: TimingScope) -> TimingScopeGuard {
        let previous = CURRENT_SCOPE.with(|current| current.replace(scope));
        TimingScopeGuard { previous }
    }

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(elapsed) = span.extensions().get::<Instant>().map(Instant::elapsed) else {
                return;
            };
            let name = span.metadata().name();
            let scope = CURRENT_SCOPE.with(|scope| *scope.borrow());
            TIMINGS.with(|timings| {
                let mut timings = timings.borrow_mut();
                let entry = timings
                    .entry(scope)
                    .or_default()
                    .entry(name)
                    .or_insert((Duration::ZERO, 0));
                entry.0 += elapsed;
                entry.1 += 1;
            });
        }
    }

    /// Installs the timing layer as the global subscriber, once.  Does
    /// nothing if another subscriber is already installed.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = Registry::default().with(TimingLayer).try_init();
        });
    }

    /// Gets the total time and call count of each span closed in `scope`
    /// on this thread.
    pub fn span_timings(scope: TimingScope) -> Vec<(&'static str, Duration, usize)> {
        TIMINGS.with(|timings| {
            timings
                .borrow()
                .get(&scope)
                .map(|totals| {
                    totals
                        .iter()
                        .map(|(name, (total, count))| (*name, *total, *count))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    #[doc(hidden)]
    pub fn dump_span_timings() {
        for scope in [TimingScope::Operation, TimingScope::Consistency] {
            let mut entries = span_timings(scope);
            entries.sort_by(|a, b| b.1.cmp(&a.1));
            eprintln!("{scope:?} timings (desc):");
            for (name, total, count) in entries {
                eprintln!("  {name}: {total:?} ({count}x)");
            }
        }
    }

    #[doc(hidden)]
    pub fn reset_span_timings() {
        init_tracing();
        TIMINGS.with(|timings| timings.borrow_mut().clear());
    }

    pub use tracing::{debug, info_span};
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use std::time::Duration;

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TimingScope {
        Operation,
        Consistency,
    }

    pub struct TimingScopeGuard;

    pub fn set_timing_scope(_scope: TimingScope) -> TimingScopeGuard {
        TimingScopeGuard
    }

    pub fn init_tracing() {}

    pub fn span_timings(_scope: TimingScope) -> Vec<(&'static str, Duration, usize)> {
        Vec::new()
    }

    #[doc(hidden)]
    pub fn dump_span_timings() {}

    #[doc(hidden)]
    pub fn reset_span_timings() {}

    #[macro_export]
    macro_rules! info_span {
        ($($fields:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    #[macro_export]
    macro_rules! debug {
        ($($fields:tt)*) => {{}};
    }

    pub use {debug, info_span};

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
