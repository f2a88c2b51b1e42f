//! Observability setup for missive.
//!
//! One entry point: [`tracing_setup::init_tracing`] installs the global
//! subscriber, optionally bridging spans to OpenTelemetry.

pub mod tracing_setup;
