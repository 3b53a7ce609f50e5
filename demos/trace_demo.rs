//! Call tracing demonstration
//!
//! This example wraps a few functions with each backend and shows what gets
//! logged for normal returns, `Err` results and keyword arguments. The
//! in-memory store is summarized at the end.
//!
//! # Running the example
//!
//! ```bash
//! RUST_LOG=debug cargo run --example trace_demo
//! ```

use funclog::logging::{init_logging, DEFAULT_DIRECTIVE};
use funclog::tracer::{kw, CallTracer, Kw, MemoryLogger, TraceValue};
use std::num::ParseIntError;

fn foo(a: i64, b: i64, c: Kw<Option<i64>>) -> f64 {
    match *c {
        Some(c) => (a + c) as f64 / b as f64,
        None => a as f64 / b as f64,
    }
}

fn parse_sum(a: i64, b: Kw<&str>) -> Result<i64, ParseIntError> {
    Ok(a + b.parse::<i64>()?)
}

struct Greeter {
    greeting: String,
}

impl TraceValue for Greeter {}

impl Greeter {
    fn greet(&self, name: &str) -> String {
        format!("{}, {}!", self.greeting, name)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(DEFAULT_DIRECTIVE)?;

    println!("{}", "=".repeat(80));
    println!("Call tracing demonstration");
    println!("{}", "=".repeat(80));

    // Default backend: the `log` facade under the root target
    let traced_foo = funclog::funclog(foo);
    traced_foo.call((12, 3, kw("c", Some(6))));
    traced_foo.call((4, 2, kw("c", None)));

    // Structured backend: fixed messages with `call`/`result`/`error` fields
    let structured = CallTracer::structured("demo");
    let parse_sum = structured.wrap(parse_sum);
    let _ = parse_sum.call((1, kw("b", "41")));
    let _ = parse_sum.call((1, kw("b", "forty-one")));

    // In-memory backend, inspected afterwards
    let store = MemoryLogger::named("memory");
    let greet = CallTracer::with_logger(store.clone()).wrap(Greeter::greet);
    let greeter = Greeter {
        greeting: "Hello".to_string(),
    };
    greet.call((&greeter, "world"));

    println!();
    println!("Recorded {} call records:", store.len());
    for summary in store.summaries(None) {
        println!("{}", summary);
    }

    Ok(())
}
