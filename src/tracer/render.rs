//! Rendering of argument and result values into trace text
//!
//! Every argument of a traced call is turned into text through [`TraceValue`].
//! Textual values (`str`, `String`, `char`, `Cow<str>`) are wrapped in single
//! quotes when they appear as arguments; everything else uses its default
//! representation. Results are always rendered unquoted.
//!
//! Named arguments are expressed with [`Kw`], which renders as `name=value`.

use super::call_site::short_type_name;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

/// A value that can appear in a trace line
///
/// The default `fmt_value` renders an opaque object as
/// `<TypeName object at 0x...>`, so an empty `impl TraceValue for MyType {}`
/// is enough to pass `MyType` (or `&MyType`) through a traced call.
pub trait TraceValue {
    /// Write the default representation of the value
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} object at {:p}>",
            short_type_name(std::any::type_name::<Self>()),
            self
        )
    }

    /// Whether the value is quoted when rendered as an argument
    fn is_textual(&self) -> bool {
        false
    }
}

struct ValueDisplay<'a, T: ?Sized>(&'a T);

impl<T: TraceValue + ?Sized> Display for ValueDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_value(f)
    }
}

/// Render a value through its default representation, never quoted
pub fn render_value<T: TraceValue + ?Sized>(value: &T) -> String {
    ValueDisplay(value).to_string()
}

/// Render a value the way it appears in an argument list
pub fn render_arg<T: TraceValue + ?Sized>(value: &T) -> String {
    if value.is_textual() {
        format!("'{}'", ValueDisplay(value))
    } else {
        render_value(value)
    }
}

macro_rules! display_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TraceValue for $ty {
                fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    Display::fmt(self, f)
                }
            }
        )*
    };
}

display_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool);

// Debug keeps the decimal point on whole floats (`6.0`, not `6`).
macro_rules! float_value {
    ($($ty:ty),*) => {
        $(
            impl TraceValue for $ty {
                fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    Debug::fmt(self, f)
                }
            }
        )*
    };
}

float_value!(f32, f64);

macro_rules! textual_value {
    ($($ty:ty),*) => {
        $(
            impl TraceValue for $ty {
                fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    Display::fmt(self, f)
                }

                fn is_textual(&self) -> bool {
                    true
                }
            }
        )*
    };
}

textual_value!(str, String, char);

impl TraceValue for Cow<'_, str> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }

    fn is_textual(&self) -> bool {
        true
    }
}

impl TraceValue for () {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("()")
    }
}

impl<T: TraceValue> TraceValue for Option<T> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.fmt_value(f),
            None => f.write_str("None"),
        }
    }

    fn is_textual(&self) -> bool {
        self.as_ref().is_some_and(TraceValue::is_textual)
    }
}

impl<T: TraceValue> TraceValue for [T] {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if item.is_textual() {
                write!(f, "'{}'", ValueDisplay(item))?;
            } else {
                item.fmt_value(f)?;
            }
        }
        f.write_str("]")
    }
}

impl<T: TraceValue, const N: usize> TraceValue for [T; N] {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt_value(f)
    }
}

impl<T: TraceValue> TraceValue for Vec<T> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt_value(f)
    }
}

macro_rules! forward_value {
    ($($ptr:ty),*) => {
        $(
            impl<T: TraceValue + ?Sized> TraceValue for $ptr {
                fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    (**self).fmt_value(f)
                }

                fn is_textual(&self) -> bool {
                    (**self).is_textual()
                }
            }
        )*
    };
}

forward_value!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

/// Renders the wrapped value through its `Display` impl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shown<T>(pub T);

impl<T: Display> TraceValue for Shown<T> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Renders the wrapped value through its `Debug` impl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debugged<T>(pub T);

impl<T: Debug> TraceValue for Debugged<T> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

/// Rendered arguments of a single invocation
///
/// Positional arguments keep call order. Keyword arguments always follow the
/// positional ones and are sorted by name; keywords sharing a name keep their
/// relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList {
    positional: Vec<String>,
    keywords: Vec<(&'static str, String)>,
}

impl ArgList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_positional(&mut self, rendered: String) {
        self.positional.push(rendered);
    }

    pub fn push_keyword(&mut self, name: &'static str, rendered: String) {
        self.keywords.push((name, rendered));
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Join everything into the comma separated form used inside a trace line
    pub fn render(&self) -> String {
        let mut keywords: Vec<&(&'static str, String)> = self.keywords.iter().collect();
        keywords.sort_by_key(|(name, _)| *name);

        self.positional
            .iter()
            .cloned()
            .chain(keywords.into_iter().map(|(name, value)| format!("{}={}", name, value)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One argument of a traced call
pub trait TraceArg {
    fn record(&self, args: &mut ArgList);
}

impl<T: TraceValue> TraceArg for T {
    fn record(&self, args: &mut ArgList) {
        args.push_positional(render_arg(self));
    }
}

/// A named argument
///
/// Rust has no keyword arguments, so a parameter that should be traced as
/// `name=value` takes a `Kw<T>`. It dereferences to the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kw<T> {
    name: &'static str,
    value: T,
}

impl<T> Kw<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Kw<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: TraceValue> TraceArg for Kw<T> {
    fn record(&self, args: &mut ArgList) {
        args.push_keyword(self.name, render_arg(&self.value));
    }
}

/// Shorthand for [`Kw::new`]
pub fn kw<T>(name: &'static str, value: T) -> Kw<T> {
    Kw::new(name, value)
}

/// The full argument tuple of a traced call
pub trait TraceArgs {
    fn record_all(&self, args: &mut ArgList);
}

/// What a call produced, as seen by the tracer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Returned(String),
    Failed(String),
}

/// How a return value maps onto an [`Outcome`]
///
/// `Err` values of a `Result` count as failures; anything else is a normal
/// return. A failure is rendered with its whole `source()` chain.
pub trait TraceOutput {
    fn outcome(&self) -> Outcome;
}

impl<T: TraceValue> TraceOutput for T {
    fn outcome(&self) -> Outcome {
        Outcome::Returned(render_value(self))
    }
}

impl<T: TraceValue, E: Error> TraceOutput for Result<T, E> {
    fn outcome(&self) -> Outcome {
        match self {
            Ok(value) => Outcome::Returned(render_value(value)),
            Err(e) => Outcome::Failed(render_error(e)),
        }
    }
}

/// Render an error followed by one `caused by:` line per source
pub fn render_error<E: Error + ?Sized>(error: &E) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str("\ncaused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl TraceValue for Widget {}

    fn rendered<A: TraceArg>(arg: A) -> String {
        let mut list = ArgList::new();
        arg.record(&mut list);
        list.render()
    }

    #[test]
    fn test_numbers_render_plainly() {
        assert_eq!(rendered(12), "12");
        assert_eq!(rendered(-3i64), "-3");
        assert_eq!(rendered(7u8), "7");
        assert_eq!(rendered(true), "true");
    }

    #[test]
    fn test_floats_keep_decimal_point() {
        assert_eq!(render_value(&6.0f64), "6.0");
        assert_eq!(render_value(&0.5f32), "0.5");
    }

    #[test]
    fn test_text_is_quoted_as_argument() {
        assert_eq!(rendered("hello"), "'hello'");
        assert_eq!(rendered(String::from("a")), "'a'");
        assert_eq!(rendered('x'), "'x'");
        assert_eq!(rendered(Cow::Borrowed("cow")), "'cow'");
    }

    #[test]
    fn test_text_result_is_not_quoted() {
        assert_eq!(render_value("hello"), "hello");
        assert_eq!(TraceOutput::outcome(&"done"), Outcome::Returned("done".to_string()));
    }

    #[test]
    fn test_option_rendering() {
        assert_eq!(rendered(None::<i64>), "None");
        assert_eq!(rendered(Some(6)), "6");
        assert_eq!(rendered(Some("a")), "'a'");
    }

    #[test]
    fn test_sequences_quote_text_items() {
        assert_eq!(rendered(vec![1, 2, 3]), "[1, 2, 3]");
        assert_eq!(rendered(["a", "b"]), "['a', 'b']");
        assert_eq!(rendered(Vec::<i32>::new()), "[]");
    }

    #[test]
    fn test_pointers_forward() {
        let boxed: Box<str> = "boxed".into();
        assert_eq!(rendered(&boxed), "'boxed'");
        assert_eq!(rendered(Arc::new(5)), "5");
        assert_eq!(rendered(Rc::new("rc")), "'rc'");
    }

    #[test]
    fn test_unit_rendering() {
        assert_eq!(render_value(&()), "()");
    }

    #[test]
    fn test_opaque_object_rendering() {
        let widget = Widget;
        let text = rendered(&widget);
        assert!(text.starts_with("<Widget object at 0x"), "got {}", text);
        assert!(text.ends_with('>'));
    }

    #[test]
    fn test_adapters() {
        assert_eq!(rendered(Shown(std::net::Ipv4Addr::LOCALHOST)), "127.0.0.1");
        assert_eq!(rendered(Debugged(vec!["a"])), "[\"a\"]");
    }

    #[test]
    fn test_keyword_argument() {
        assert_eq!(rendered(kw("c", 6)), "c=6");
        assert_eq!(rendered(kw("c", "hello")), "c='hello'");
        assert_eq!(rendered(kw("c", None::<i32>)), "c=None");
    }

    #[test]
    fn test_kw_derefs_to_value() {
        let c = kw("c", 6);
        assert_eq!(*c + 1, 7);
        assert_eq!(c.name(), "c");
        assert_eq!(c.into_inner(), 6);
    }

    #[test]
    fn test_arg_list_orders_keywords_after_positionals() {
        let mut list = ArgList::new();
        list.push_keyword("b", "1".to_string());
        list.push_positional("12".to_string());
        list.push_keyword("a", "'a'".to_string());
        list.push_positional("3".to_string());

        assert_eq!(list.render(), "12, 3, a='a', b=1");
    }

    #[test]
    fn test_empty_arg_list() {
        let list = ArgList::new();
        assert!(list.is_empty());
        assert_eq!(list.render(), "");
    }

    #[derive(Debug)]
    struct Layered {
        message: &'static str,
        source: Option<Box<Layered>>,
    }

    impl Display for Layered {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl Error for Layered {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.source.as_deref().map(|s| s as &(dyn Error + 'static))
        }
    }

    #[test]
    fn test_result_outcomes() {
        let ok: std::result::Result<f64, std::fmt::Error> = Ok(2.0);
        assert_eq!(ok.outcome(), Outcome::Returned("2.0".to_string()));

        let err: std::result::Result<f64, std::fmt::Error> = Err(std::fmt::Error);
        assert_eq!(err.outcome(), Outcome::Failed(std::fmt::Error.to_string()));
    }

    #[test]
    fn test_failure_includes_source_chain() {
        let err: std::result::Result<i64, Layered> = Err(Layered {
            message: "config rejected",
            source: Some(Box::new(Layered {
                message: "bad port",
                source: Some(Box::new(Layered {
                    message: "digit expected",
                    source: None,
                })),
            })),
        });

        assert_eq!(
            err.outcome(),
            Outcome::Failed(
                "config rejected\ncaused by: bad port\ncaused by: digit expected".to_string()
            )
        );
    }
}
