//! Tracing bootstrap.
//!
//! Installs a `fmt` subscriber once per page load. In the browser each event
//! is written to the devtools console; natively it goes to stderr.

use std::io::{self, Write};
use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

fn parse_level(level: &str) -> Level {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Buffers one formatted event and hands it to `console.log` on drop.
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&line.into());
        }
    }
}

/// Safe to call repeatedly; only the first call installs a subscriber.
pub(crate) fn init_logging(level: &str) {
    let max_level = parse_level(level);
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_target(false)
            .with_ansi(false)
            // `SystemTime` is unavailable on wasm32-unknown-unknown.
            .without_time();

        let result = if cfg!(target_arch = "wasm32") {
            builder.with_writer(ConsoleWriter::default).try_init()
        } else {
            builder.with_writer(io::stderr).try_init()
        };

        if let Err(e) = result {
            eprintln!("tracing subscriber already installed: {e}");
        }
    });
}
