//! Uniform invocation of functions of any arity
//!
//! A traced call receives its arguments as one tuple. [`Callable`] spreads
//! that tuple back into the wrapped function, and [`TraceArgs`] renders it.
//! Both are implemented for tuples of up to eight elements.

use super::call_site::CallSite;
use super::render::{ArgList, TraceArg, TraceArgs};

/// Something that can be invoked with an argument tuple
///
/// Implemented for every `Fn` of arity 0..=8 and for already traced
/// callables, which is what lets a traced function be wrapped again.
pub trait Callable<Args> {
    type Output;

    fn invoke(&self, args: Args) -> Self::Output;

    /// Invoke on behalf of a call made at `site`
    ///
    /// Plain functions ignore the site. Traced callables use it instead of
    /// their own caller, so nested wrappers all report the original call.
    fn invoke_at(&self, _site: CallSite, args: Args) -> Self::Output {
        self.invoke(args)
    }
}

macro_rules! impl_callable {
    ($($ty:ident),*) => {
        impl<Func, Out, $($ty,)*> Callable<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) -> Out,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn invoke(&self, ($($ty,)*): ($($ty,)*)) -> Out {
                (self)($($ty),*)
            }
        }

        impl<$($ty: TraceArg,)*> TraceArgs for ($($ty,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn record_all(&self, args: &mut ArgList) {
                let ($($ty,)*) = self;
                $($ty.record(args);)*
            }
        }
    };
}

impl_callable!();
impl_callable!(A1);
impl_callable!(A1, A2);
impl_callable!(A1, A2, A3);
impl_callable!(A1, A2, A3, A4);
impl_callable!(A1, A2, A3, A4, A5);
impl_callable!(A1, A2, A3, A4, A5, A6);
impl_callable!(A1, A2, A3, A4, A5, A6, A7);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::render::kw;

    fn rendered<A: TraceArgs>(args: A) -> String {
        let mut list = ArgList::new();
        args.record_all(&mut list);
        list.render()
    }

    fn add(a: i64, b: i64) -> i64 {
        a + b
    }

    #[test]
    fn test_invoke_spreads_tuple() {
        assert_eq!(add.invoke((2, 3)), 5);
        assert_eq!((|| 7).invoke(()), 7);
        assert_eq!((|s: &str| s.len()).invoke(("abc",)), 3);
    }

    #[test]
    fn test_invoke_at_ignores_site_for_plain_functions() {
        let site = CallSite::new("elsewhere.rs", 1);
        assert_eq!(add.invoke_at(site, (4, 4)), 8);
    }

    #[test]
    fn test_eight_arguments() {
        let sum = |a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8| {
            [a, b, c, d, e, f, g, h].iter().map(|&x| x as u32).sum::<u32>()
        };
        assert_eq!(sum.invoke((1, 2, 3, 4, 5, 6, 7, 8)), 36);
    }

    #[test]
    fn test_record_all_zero_args() {
        assert_eq!(rendered(()), "");
    }

    #[test]
    fn test_record_all_mixed_args() {
        assert_eq!(rendered((12, 3, kw("c", 6))), "12, 3, c=6");
        assert_eq!(rendered(("a", 1)), "'a', 1");
    }

    #[test]
    fn test_record_all_keyword_only_sorted() {
        assert_eq!(rendered((kw("b", 1), kw("a", "a"))), "a='a', b=1");
    }
}
