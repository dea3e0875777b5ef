//! Log subscriber setup. In the browser each formatted event goes to the
//! `console` method matching its level so devtools filtering keeps working;
//! elsewhere events go to stderr.

use crate::error::{Error, Result};
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Installs the global subscriber.
///
/// # Errors
/// Returns `Error::Telemetry` if a global subscriber is already set.
pub fn init(verbosity_level: Level) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(writer());

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn console_method(level: Level) -> ConsoleMethod {
    if level == Level::ERROR {
        ConsoleMethod::Error
    } else if level == Level::WARN {
        ConsoleMethod::Warn
    } else if level == Level::INFO {
        ConsoleMethod::Info
    } else {
        ConsoleMethod::Debug
    }
}

/// One formatted event as a console line, or `None` if it is blank.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn console_line(buffer: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(buffer);
    let line = line.trim_end();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn writer() -> fn() -> std::io::Stderr {
    std::io::stderr
}

#[cfg(target_arch = "wasm32")]
fn writer() -> console::ConsoleMakeWriter {
    console::ConsoleMakeWriter
}

#[cfg(target_arch = "wasm32")]
mod console {
    use super::{ConsoleMethod, console_line, console_method};
    use std::io;
    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    pub struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::new(Level::INFO)
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter::new(*meta.level())
        }
    }

    /// Buffers one event and hands it to the console when dropped.
    pub struct ConsoleWriter {
        method: ConsoleMethod,
        buffer: Vec<u8>,
    }

    impl ConsoleWriter {
        fn new(level: Level) -> Self {
            Self {
                method: console_method(level),
                buffer: Vec::new(),
            }
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let Some(line) = console_line(&self.buffer) else {
                return;
            };
            let line = JsValue::from_str(&line);
            match self.method {
                ConsoleMethod::Error => web_sys::console::error_1(&line),
                ConsoleMethod::Warn => web_sys::console::warn_1(&line),
                ConsoleMethod::Info => web_sys::console::info_1(&line),
                ConsoleMethod::Debug => web_sys::console::debug_1(&line),
            }
        }
    }
}
