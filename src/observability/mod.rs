//! Structured logging with optional file-based span export.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr)
//!                            └→ tracing-opentelemetry → OpenTelemetry SDK
//!                                 → FileSpanExporter → JSON lines
//! ```
//!
//! The OpenTelemetry branch exists only when `Config::trace_file` is set.
//!
//! # Trace Level
//!
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file span exporter
//! - `span_formatter`: Span to JSON record conversion
//! - `file_writer`: Append-only writer with size-based rotation

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
