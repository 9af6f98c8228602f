use std::io;
use std::sync::{Arc, Mutex};

use log::kv::Source;
use typed_logging::Logger;
use typed_logging::bridge::{DEFAULT_TARGET, LogBridge, TracingBridge};
use typed_logging::Level;

use crate::interfaces::*;

// =============================================================================
// log
// =============================================================================

#[derive(Default)]
struct VecLog {
    records: Mutex<Vec<(log::Level, String, String)>>,
    key_values: Mutex<Vec<Vec<(String, String)>>>,
}

#[derive(Default)]
struct CollectPairs(Vec<(String, String)>);

impl<'kvs> log::kv::VisitSource<'kvs> for CollectPairs {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.0.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

impl log::Log for VecLog {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            self.records.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
            let mut pairs = CollectPairs::default();
            record.key_values().visit(&mut pairs).unwrap();
            self.key_values.lock().unwrap().push(pairs.0);
        }
    }

    fn flush(&self) {}
}

#[test]
fn test_log_bridge_formats_and_maps_levels() {
    let bridge = LogBridge::new(VecLog::default());
    bridge.could_not_open_socket("example.org");
    bridge.cache_ratio("users", 0.25);

    let records = bridge.inner().records.lock().unwrap();
    assert_eq!(records.len(), 1);
    let (level, target, message) = &records[0];
    assert_eq!(*level, log::Level::Error);
    assert_eq!(target, DEFAULT_TARGET);
    assert_eq!(
        message,
        "[could_not_open_socket(0)] Could not open socket to `example.org`"
    );
}

#[test]
fn test_log_bridge_checks_enabled_before_capture() {
    let bridge = LogBridge::new(VecLog::default()).with_target("app::events");
    assert!(!bridge.is_enabled(Level::Debug));
    assert!(bridge.is_enabled(Level::Information));

    bridge.started("api", ([10, 0, 0, 1], 80).into());
    let records = bridge.inner().records.lock().unwrap();
    assert_eq!(records[0].0, log::Level::Info);
    assert_eq!(records[0].1, "app::events");
}

#[test]
fn test_log_bridge_forwards_fields_as_key_values() {
    let bridge = LogBridge::new(VecLog::default());
    bridge.retrying("sync", 2, 5);
    bridge.request_failed(503, "/health");

    let key_values = bridge.inner().key_values.lock().unwrap();
    let pairs = |expected: &[(&str, &str)]| {
        expected
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
    };
    assert_eq!(
        key_values[0],
        pairs(&[("operation", "sync"), ("attempt", "2"), ("max_attempts", "5")])
    );
    assert_eq!(key_values[1], pairs(&[("status", "503"), ("path", "/health")]));
}

// =============================================================================
// tracing
// =============================================================================

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_tracing(f: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buf.contents()
}

#[test]
fn test_tracing_bridge_emits_structured_event() {
    let output = capture_tracing(|| {
        TracingBridge.could_not_open_socket("example.org");
    });

    assert!(output.contains("ERROR"), "Got: {output}");
    assert!(output.contains(DEFAULT_TARGET), "Got: {output}");
    assert!(
        output.contains("Could not open socket to `example.org`"),
        "Got: {output}"
    );
    assert!(output.contains("event_id=0"), "Got: {output}");
    assert!(
        output.contains("event_name=\"could_not_open_socket\""),
        "Got: {output}"
    );
    assert!(output.contains("severity=\"Critical\""), "Got: {output}");
    assert!(output.contains("hostName=\"example.org\""), "Got: {output}");
}

#[test]
fn test_tracing_bridge_respects_subscriber_level() {
    let output = capture_tracing(|| {
        assert!(!TracingBridge.is_enabled(Level::Debug));
        assert!(TracingBridge.is_enabled(Level::Warning));
        TracingBridge.cache_ratio("users", 0.5);
        TracingBridge.retrying("upload", 1, 3);
    });

    assert!(!output.contains("hit ratio"), "Got: {output}");
    assert!(output.contains("WARN"), "Got: {output}");
    assert!(output.contains("Retrying upload (attempt 1 of 3)"), "Got: {output}");
}
