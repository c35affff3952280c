//! Logging context shared by the runner, the pipeline and every stage
//!
//! A single [`LoggingContext`] is created at startup. It owns the severity
//! threshold and one handler (a `tracing` dispatch backed by a
//! `tracing_subscriber` fmt subscriber). Component loggers attach to the
//! context and emit through the same handler, so all output is formatted and
//! filtered uniformly.

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

/// Width of the component name column
const NAME_WIDTH: usize = 20;

/// Severity names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    #[value(name = "CRITICAL", alias = "FATAL")]
    Critical,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "WARNING", alias = "WARN")]
    Warning,
    #[value(name = "INFO")]
    Info,
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "NOTSET")]
    NotSet,
}

impl LogLevel {
    /// Threshold understood by `tracing`. CRITICAL has no direct counterpart
    /// and collapses onto ERROR.
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Critical | LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::NotSet => LevelFilter::TRACE,
        }
    }

    /// Whether a message at `level` passes this threshold
    pub fn allows(self, level: Level) -> bool {
        self.as_filter() >= level
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::NotSet => "NOTSET",
        };
        f.write_str(name)
    }
}

/// The one handler every component writes through
pub struct LogHandler {
    dispatch: Dispatch,
}

impl LogHandler {
    fn new<W>(level: LogLevel, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level.as_filter())
            .with_ansi(false)
            .with_writer(writer)
            .event_format(ComponentFormat)
            .finish();

        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }
}

impl fmt::Debug for LogHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandler").finish_non_exhaustive()
    }
}

/// Process-lifetime logging configuration: one level and one shared handler
#[derive(Debug, Clone)]
pub struct LoggingContext {
    level: LogLevel,
    handler: Arc<LogHandler>,
}

impl LoggingContext {
    /// Create a context that writes to stderr
    pub fn new(level: LogLevel) -> Self {
        Self::with_writer(level, io::stderr)
    }

    /// Create a context that writes to the given writer
    pub fn with_writer<W>(level: LogLevel, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self {
            level,
            handler: Arc::new(LogHandler::new(level, writer)),
        }
    }

    /// Shared severity threshold
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether `other` writes through the very same handler object
    pub fn shares_handler(&self, other: &LoggingContext) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    /// Install the handler as the process-wide default for stray `tracing` events
    pub fn install_global(&self) -> Result<(), tracing::dispatcher::SetGlobalDefaultError> {
        tracing::dispatcher::set_global_default(self.handler.dispatch.clone())
    }
}

/// A named component logger attached to a [`LoggingContext`]
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    context: LoggingContext,
}

impl Logger {
    pub fn new(name: impl Into<String>, context: &LoggingContext) -> Self {
        Self {
            name: name.into(),
            context: context.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &LoggingContext {
        &self.context
    }

    pub fn level(&self) -> LogLevel {
        self.context.level
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::DEBUG, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::WARN, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::ERROR, message);
    }

    fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.context.level.allows(level) {
            return;
        }

        let name = self.name.as_str();
        tracing::dispatcher::with_default(&self.context.handler.dispatch, || match level {
            Level::ERROR => tracing::error!(component = name, "{}", message),
            Level::WARN => tracing::warn!(component = name, "{}", message),
            Level::INFO => tracing::info!(component = name, "{}", message),
            Level::DEBUG => tracing::debug!(component = name, "{}", message),
            _ => tracing::trace!(component = name, "{}", message),
        });
    }
}

/// Event format: `{name:<20}: {message}`
struct ComponentFormat;

impl<S, N> FormatEvent<S, N> for ComponentFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = ComponentFields::default();
        event.record(&mut fields);

        let name = fields
            .component
            .unwrap_or_else(|| event.metadata().target().to_string());
        writeln!(writer, "{:<width$}: {}", name, fields.message, width = NAME_WIDTH)
    }
}

#[derive(Default)]
struct ComponentFields {
    component: Option<String>,
    message: String,
}

impl Visit for ComponentFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "component" => self.component = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "component" => self.component = Some(format!("{:?}", value)),
            "message" => self.message = format!("{:?}", value),
            _ => {}
        }
    }
}

/// In-memory writer, handy when embedding the runner or capturing output
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl io::Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for MemoryWriter {
    type Writer = MemoryWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
