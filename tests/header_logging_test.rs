//! Tests del log de headers
//! tests/header_logging_test.rs
//!
//! Binario aparte porque instala su propio logger global. Cada registro
//! guarda el thread que lo emitió, así los tests corren en paralelo sin
//! mezclar lo que ve cada uno.

use log::{Level, LevelFilter, Log, Metadata, Record};
use reqlog_server::files::StaticFiles;
use reqlog_server::handler::LoggingHandler;
use reqlog_server::http::Request;
use std::fs;
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};
use tempfile::TempDir;

/// Logger que guarda `(thread, nivel, mensaje)` de cada registro
struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push((
            thread::current().id(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

/// Registros de nivel error emitidos por el thread actual
fn errors_from_this_thread() -> Vec<String> {
    let me = thread::current().id();
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(id, level, _)| *id == me && *level == Level::Error)
        .map(|(_, _, message)| message.clone())
        .collect()
}

fn setup() -> (TempDir, LoggingHandler) {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("hello.txt"), "world").unwrap();
    let handler = LoggingHandler::with_body_sink(StaticFiles::new(dir.path()), Box::new(std::io::sink()));
    (dir, handler)
}

fn request(raw: &[u8]) -> Request {
    Request::read_from(&mut &raw[..]).unwrap().unwrap()
}

#[test]
fn test_get_logs_header_block_at_error_level() {
    let (_dir, mut handler) = setup();

    handler
        .dispatch(&request(b"GET /hello.txt HTTP/1.1\r\nHost: localhost\r\nUser-Agent: curl/8.0\r\n\r\n"))
        .unwrap();

    assert_eq!(errors_from_this_thread(), vec!["Host: localhost\nUser-Agent: curl/8.0".to_string()]);
}

#[test]
fn test_post_logs_header_block_at_error_level() {
    let (_dir, mut handler) = setup();

    handler
        .dispatch(&request(
            b"POST /missing HTTP/1.1\r\nHost: localhost\r\nContent-Length: 4\r\n\r\nping",
        ))
        .unwrap();

    assert_eq!(errors_from_this_thread(), vec!["Host: localhost\nContent-Length: 4".to_string()]);
}

#[test]
fn test_head_logs_no_headers() {
    let (_dir, mut handler) = setup();

    handler
        .dispatch(&request(b"HEAD /hello.txt HTTP/1.1\r\nHost: localhost\r\n\r\n"))
        .unwrap();

    assert!(errors_from_this_thread().is_empty());
}
