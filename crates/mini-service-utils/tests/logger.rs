use mini_service_utils::{get_logger, reset_logger, Log, LoggerOptions};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// The logger is process-wide: tests touching it run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

#[test]
fn test_creates_default_logger() {
    let _serial = SERIAL.lock();
    reset_logger();

    let logger = get_logger(None);

    assert_eq!(logger.name(), "mini-service-utils");
    assert_eq!(logger.level(), Level::DEBUG);
    logger.debug("debug line");
    logger.info("info line");
}

#[test]
fn test_reuses_the_same_instance() {
    let _serial = SERIAL.lock();
    reset_logger();

    let first = get_logger(None);
    let second = get_logger(None);

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_options_apply_on_construction_only() {
    let _serial = SERIAL.lock();
    reset_logger();

    let logger = get_logger(Some(LoggerOptions {
        name: "custom".to_string(),
        level: Level::WARN,
    }));
    assert_eq!(logger.name(), "custom");
    assert!(!logger.enabled(Level::INFO));

    let again = get_logger(Some(LoggerOptions::default()));
    assert!(Arc::ptr_eq(&logger, &again));
    assert_eq!(again.name(), "custom");
}

/// Formatted events, collected in memory
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_warn_and_error_respect_level() {
    let _serial = SERIAL.lock();
    reset_logger();

    let logger = get_logger(Some(LoggerOptions {
        name: "levels".to_string(),
        level: Level::WARN,
    }));
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(capture.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        logger.info("quiet info");
        logger.warn("disk almost full");
        logger.error("disk full");
    });

    let text = capture.text();
    assert!(text.contains("WARN"));
    assert!(text.contains("disk almost full"));
    assert!(text.contains("ERROR"));
    assert!(text.contains("logger=levels"));
    assert!(!text.contains("quiet info"));
}

#[test]
fn test_reset_builds_a_new_logger() {
    let _serial = SERIAL.lock();
    reset_logger();

    let first = get_logger(Some(LoggerOptions {
        name: "first".to_string(),
        ..LoggerOptions::default()
    }));
    reset_logger();
    let second = get_logger(None);

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.name(), "mini-service-utils");
}

#[test]
fn test_concurrent_first_access() {
    let _serial = SERIAL.lock();
    reset_logger();

    let handles: Vec<_> = (0..8).map(|_| std::thread::spawn(|| get_logger(None))).collect();
    let loggers: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread"))
        .collect();

    assert!(loggers.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn test_logger_as_injected_log() {
    let _serial = SERIAL.lock();
    reset_logger();

    let log: Arc<dyn Log> = get_logger(None);
    log.info("through the trait");
}
