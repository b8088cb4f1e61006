use mini_service_utils::{
    load_transport, BoxError, ConfigError, Error, Log, Resolver, ServiceOptions, TransportRegistry,
};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

#[derive(Default)]
struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Log for Recorder {
    fn debug(&self, message: &str) {
        self.lines.lock().push(format!("debug {}", message));
    }

    fn info(&self, message: &str) {
        self.lines.lock().push(format!("info {}", message));
    }
}

#[derive(Debug, PartialEq)]
struct Transport {
    kind: String,
    port: Option<u64>,
}

fn registry() -> TransportRegistry<Transport> {
    let mut registry = TransportRegistry::new();
    registry.register("http", |options: &ServiceOptions| {
        let port = options
            .transport
            .as_ref()
            .and_then(|t| t.extra.get("port"))
            .and_then(|port| port.as_u64());
        Ok(Transport {
            kind: "http".to_string(),
            port,
        })
    });
    registry.register("broken", |_: &ServiceOptions| -> Result<Transport, BoxError> {
        Err("socket closed".into())
    });
    registry
}

fn options(kind: &str) -> (ServiceOptions, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    (ServiceOptions::new(kind).with_logger(recorder.clone()), recorder)
}

fn invalid_message(options: &ServiceOptions) -> String {
    match load_transport(options, &registry()) {
        Err(Error::OptionsInvalid(err)) => err.message,
        other => panic!("expected invalid options, got {:?}", other.map(|_| ())),
    }
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_registered_transport() {
    let (options, recorder) = options("http");

    let transport = load_transport(&options, &registry()).expect("transport");

    assert_eq!(transport, Transport { kind: "http".to_string(), port: None });
    assert_eq!(*recorder.lines.lock(), vec!["debug Load transport http".to_string()]);
}

#[test]
fn test_unknown_transport() {
    let (options, recorder) = options("carrier-pigeon");

    let err = load_transport(&options, &registry()).map(|_| ()).expect_err("unknown");

    assert!(matches!(err, Error::TransportLoadFailed { ref kind, .. } if kind == "carrier-pigeon"));
    assert_eq!(
        err.to_string(),
        "Cannot load transport carrier-pigeon: Cannot find module './transports/carrier-pigeon'"
    );
    assert_eq!(recorder.lines.lock().len(), 1);
}

#[test]
fn test_failing_factory() {
    let (options, _) = options("broken");
    let err = load_transport(&options, &registry()).map(|_| ()).expect_err("broken");
    assert_eq!(err.to_string(), "Cannot load transport broken: socket closed");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_custom_resolver() {
    struct Echo;

    impl Resolver<String> for Echo {
        fn resolve(&self, path: &str, _: &ServiceOptions) -> Result<String, BoxError> {
            Ok(path.to_string())
        }
    }

    let (options, _) = options("anything");
    assert_eq!(load_transport(&options, &Echo).expect("path"), "./transports/anything");
}

// ============================================================================
// Option validation
// ============================================================================

#[test]
fn test_requires_transport() {
    let options = ServiceOptions::default().with_logger(Arc::new(Recorder::default()));
    assert_eq!(
        invalid_message(&options),
        "child \"transport\" fails because [\"transport\" is required]"
    );
}

#[test]
fn test_requires_transport_type() {
    let mut options = ServiceOptions::new("http").with_logger(Arc::new(Recorder::default()));
    if let Some(transport) = options.transport.as_mut() {
        transport.kind = None;
    }
    assert_eq!(
        invalid_message(&options),
        "child \"transport\" fails because [child \"type\" fails because [\"type\" is required]]"
    );
}

#[test]
fn test_rejects_uppercase_type() {
    let (options, _) = options("Http");
    assert_eq!(
        invalid_message(&options),
        "child \"transport\" fails because [child \"type\" fails because [\"type\" must only contain lowercase characters]]"
    );
}

#[test]
fn test_rejects_malformed_type() {
    let (options, recorder) = options("../http");
    assert!(invalid_message(&options).contains("fails to match the required pattern"));
    assert!(recorder.lines.lock().is_empty());
}

#[test]
fn test_requires_logger() {
    let options = ServiceOptions::new("http");
    assert_eq!(
        invalid_message(&options),
        "child \"logger\" fails because [\"logger\" is required]"
    );
}

// ============================================================================
// Options files
// ============================================================================

#[test]
fn test_load_options_from_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    writeln!(file, "[transport]\ntype = \"http\"\nport = 3000").expect("write");

    let options = ServiceOptions::load(file.path())
        .expect("options")
        .with_logger(Arc::new(Recorder::default()));
    let transport = load_transport(&options, &registry()).expect("transport");

    assert_eq!(transport.port, Some(3000));
}

#[test]
fn test_load_options_from_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("temp file");
    write!(file, r#"{{"transport": {{"type": "http", "port": 8080}}, "name": "calc"}}"#)
        .expect("write");

    let options = ServiceOptions::load(file.path()).expect("options");

    assert_eq!(options.transport_kind(), Some("http"));
    assert_eq!(options.extra.get("name"), Some(&serde_json::json!("calc")));
}

#[test]
fn test_load_options_errors() {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile().expect("temp file");
    assert!(matches!(
        ServiceOptions::load(file.path()),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.toml");
    let err = ServiceOptions::load(&missing).expect_err("missing");
    assert!(matches!(err, ConfigError::IoError(_)));
    assert!(Error::from(err).to_string().starts_with("Failed to read options file"));
}
