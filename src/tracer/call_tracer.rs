//! Call tracer for wrapping functions with call logging
//!
//! This module provides [`CallTracer`], which binds a logging backend, and
//! [`Traced`], the wrapped callable it produces. Every call through a
//! [`Traced`] emits a `calling` record before the wrapped function runs and a
//! `returned` or `threw exception` record after it.

use super::backend::{CallEvent, CallLogger};
use super::call_site::{display_name, CallSite, TraceLine};
use super::callable::Callable;
use super::config::TracerConfig;
use super::log_logger::LogLogger;
use super::null_logger::NullLogger;
use super::render::{ArgList, Outcome, TraceArgs, TraceOutput};
use super::tracing_logger::TracingLogger;
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Binds a logging backend and wraps callables with it
///
/// The backend is chosen once, here, and shared by every callable wrapped
/// afterwards.
#[derive(Clone)]
pub struct CallTracer {
    logger: Arc<dyn CallLogger>,
    config: TracerConfig,
}

impl CallTracer {
    /// A tracer on the process-default logger ([`LogLogger::root`])
    pub fn new() -> Self {
        Self::with_logger(LogLogger::root())
    }

    /// A tracer emitting to the given backend
    pub fn with_logger(logger: impl CallLogger + 'static) -> Self {
        Self::from_shared(Arc::new(logger))
    }

    /// A tracer emitting to an already shared backend
    pub fn from_shared(logger: Arc<dyn CallLogger>) -> Self {
        Self {
            logger,
            config: TracerConfig::default(),
        }
    }

    /// A tracer on a named conventional logger
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_logger(LogLogger::new(name))
    }

    /// A tracer on a named structured logger
    pub fn structured(name: impl Into<String>) -> Self {
        Self::with_logger(TracingLogger::new(name))
    }

    /// A tracer that wraps but never emits
    pub fn silent() -> Self {
        Self::with_logger(NullLogger)
    }

    pub fn with_config(mut self, config: TracerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn capture_panics(mut self, capture: bool) -> Self {
        self.config.capture_panics = capture;
        self
    }

    pub fn qualified_names(mut self, qualified: bool) -> Self {
        self.config.qualified_names = qualified;
        self
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn logger(&self) -> &Arc<dyn CallLogger> {
        &self.logger
    }

    /// Wrap a callable
    ///
    /// The display name is derived from the callable's type: `foo` for a
    /// function, `Type::method` for a method, `<closure>` for a closure.
    /// Wrapping a [`Traced`] keeps the name derived for the inner callable.
    /// Use [`Traced::named`] to override it.
    pub fn wrap<F>(&self, f: F) -> Traced<F> {
        let name = display_name(unwrap_traced(type_name::<F>()), self.config.qualified_names);
        Traced {
            inner: f,
            name: Cow::Owned(name),
            logger: Arc::clone(&self.logger),
            config: self.config,
        }
    }
}

impl Default for CallTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallTracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallTracer").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Wrap a callable on the process-default logger
///
/// Shorthand for `CallTracer::new().wrap(f)`.
pub fn funclog<F>(f: F) -> Traced<F> {
    CallTracer::new().wrap(f)
}

/// Strip our own `Traced<...>` layers from a type name
fn unwrap_traced(mut name: &str) -> &str {
    let marker = type_name::<Traced<()>>();
    let prefix = marker.strip_suffix("<()>").unwrap_or(marker);

    while let Some(inner) = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('<'))
        .and_then(|rest| rest.strip_suffix('>'))
    {
        name = inner;
    }
    name
}

thread_local! {
    /// Payload address of the last panic raised by a backend on this thread
    static BACKEND_PANIC: Cell<Option<usize>> = const { Cell::new(None) };
}

fn payload_address(payload: &(dyn Any + Send)) -> usize {
    payload as *const (dyn Any + Send) as *const () as usize
}

fn is_backend_panic(payload: &(dyn Any + Send)) -> bool {
    BACKEND_PANIC.with(|slot| slot.get() == Some(payload_address(payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

/// A callable wrapped with call logging
///
/// Invoke it with [`Traced::call`], passing the arguments as a tuple. The
/// wrapped callable, its display name and the bound backend stay reachable.
pub struct Traced<F> {
    inner: F,
    name: Cow<'static, str>,
    logger: Arc<dyn CallLogger>,
    config: TracerConfig,
}

impl<F> Traced<F> {
    /// Override the display name used in trace lines
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }

    pub fn logger(&self) -> &Arc<dyn CallLogger> {
        &self.logger
    }

    /// Wrap this traced callable again with another tracer's backend
    ///
    /// The outer wrapper keeps this wrapper's display name, including one set
    /// with [`Traced::named`].
    pub fn traced_by(self, tracer: &CallTracer) -> Traced<Self> {
        let name = self.name.clone();
        tracer.wrap(self).named(name)
    }

    /// Invoke the wrapped callable, logging the call and its outcome
    ///
    /// The `calling` record is emitted first. A normal return (or `Ok`) is
    /// logged as `returned`; an `Err` or a panic is logged as
    /// `threw exception`. The return value, `Err` included, is handed back
    /// untouched and a panic is resumed with its original payload.
    #[track_caller]
    pub fn call<A>(&self, args: A) -> F::Output
    where
        F: Callable<A>,
        A: TraceArgs,
        F::Output: TraceOutput,
    {
        self.call_at(CallSite::caller(), args)
    }

    fn call_at<A>(&self, site: CallSite, args: A) -> F::Output
    where
        F: Callable<A>,
        A: TraceArgs,
        F::Output: TraceOutput,
    {
        let mut rendered = ArgList::new();
        args.record_all(&mut rendered);
        let trace = TraceLine::new(&site, &self.name, &rendered);

        BACKEND_PANIC.with(|slot| slot.set(None));
        self.emit(&CallEvent::Calling { trace: &trace });

        let output = if self.config.capture_panics {
            match panic::catch_unwind(AssertUnwindSafe(|| self.inner.invoke_at(site, args))) {
                Ok(output) => output,
                Err(payload) => {
                    // a nested wrapper's backend failed; not ours to report
                    if !is_backend_panic(payload.as_ref()) {
                        let message = panic_message(payload.as_ref());
                        self.emit(&CallEvent::Threw {
                            trace: &trace,
                            error: &message,
                        });
                    }
                    panic::resume_unwind(payload);
                }
            }
        } else {
            self.inner.invoke_at(site, args)
        };

        match output.outcome() {
            Outcome::Returned(result) => self.emit(&CallEvent::Returned {
                trace: &trace,
                result: &result,
            }),
            Outcome::Failed(error) => self.emit(&CallEvent::Threw {
                trace: &trace,
                error: &error,
            }),
        }

        output
    }

    /// Hand an event to the backend, marking any panic it raises
    fn emit(&self, event: &CallEvent<'_>) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| self.logger.emit(event))) {
            BACKEND_PANIC.with(|slot| slot.set(Some(payload_address(payload.as_ref()))));
            panic::resume_unwind(payload);
        }
    }
}

impl<F, A> Callable<A> for Traced<F>
where
    F: Callable<A>,
    A: TraceArgs,
    F::Output: TraceOutput,
{
    type Output = F::Output;

    #[track_caller]
    fn invoke(&self, args: A) -> F::Output {
        self.call_at(CallSite::caller(), args)
    }

    fn invoke_at(&self, site: CallSite, args: A) -> F::Output {
        self.call_at(site, args)
    }
}

impl<F: Clone> Clone for Traced<F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name.clone(),
            logger: Arc::clone(&self.logger),
            config: self.config,
        }
    }
}

impl<F> fmt::Debug for Traced<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traced")
            .field("name", &self.name)
            .field("callable", &type_name::<F>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
