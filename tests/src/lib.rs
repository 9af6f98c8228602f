//! End-to-end tests for typed_logging.
//!
//! The interfaces in [`interfaces`] go through the real attribute macro; the
//! tests below drive the generated APIs against the runtime's loggers and
//! bridges.

pub mod interfaces;

#[cfg(test)]
mod bridges;

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::net::{Ipv4Addr, SocketAddr};
    use std::path::Path;
    use std::sync::Arc;
    use std::thread;

    use typed_logging::testing::{CapturedRecord, CapturingLogger};
    use typed_logging::{
        EventId, FieldValue, Level, LogFields, Logger, NullLogger, ToFieldValue, logger_extensions,
    };

    use crate::interfaces::*;

    // =============================================================================
    // Helper Functions
    // =============================================================================

    fn single(logger: &CapturingLogger) -> CapturedRecord {
        let mut records = logger.take();
        assert_eq!(records.len(), 1, "expected one record, got {records:?}");
        records.remove(0)
    }

    fn field_names(record: &CapturedRecord) -> Vec<&'static str> {
        record.fields.iter().map(|(name, _)| *name).collect()
    }

    // =============================================================================
    // Direct extension form
    // =============================================================================

    #[test]
    fn test_socket_scenario() {
        let logger = CapturingLogger::new();
        logger.could_not_open_socket("microsoft.com");

        let record = single(&logger);
        assert_eq!(record.level, Level::Critical);
        assert_eq!(record.event_id, EventId::new(0, "could_not_open_socket"));
        assert_eq!(record.fields, vec![("hostName", "microsoft.com".to_string())]);
        assert_eq!(
            record.message.as_deref(),
            Some("Could not open socket to `microsoft.com`")
        );
    }

    #[test]
    fn test_multiple_placeholders_in_template_order() {
        let logger = CapturingLogger::new();
        let address = SocketAddr::from((Ipv4Addr::LOCALHOST, 8080));
        logger.started("billing", address);
        logger.retrying("upload", 2, 5);

        let records = logger.take();
        assert_eq!(
            records[0].message.as_deref(),
            Some("Service billing started on 127.0.0.1:8080")
        );
        assert_eq!(records[0].field("address"), Some("127.0.0.1:8080"));
        assert_eq!(
            records[1].message.as_deref(),
            Some("Retrying upload (attempt 2 of 5)")
        );
        assert_eq!(field_names(&records[1]), ["operation", "attempt", "max_attempts"]);
    }

    #[test]
    fn test_repeated_placeholder_and_escaped_braces() {
        let logger = CapturingLogger::new();
        logger.cache_ratio("users", 0.5);

        let record = single(&logger);
        assert_eq!(
            record.message.as_deref(),
            Some("{cache} hit ratio 0.5 for users, users again")
        );
        assert_eq!(field_names(&record), ["name", "ratio"]);
    }

    #[test]
    fn test_zero_parameter_method() {
        let logger = CapturingLogger::new();
        logger.heartbeat();

        let record = single(&logger);
        assert_eq!(record.level, Level::Trace);
        assert!(record.fields.is_empty());
        assert_eq!(record.message.as_deref(), Some("Heartbeat"));
    }

    #[test]
    fn test_unreferenced_parameters_are_fields_only() {
        let logger = CapturingLogger::new();
        logger.request_failed(503, "/health");

        let record = single(&logger);
        assert_eq!(record.message.as_deref(), Some("Request failed"));
        assert_eq!(record.field("status"), Some("503"));
        assert_eq!(record.field("path"), Some("/health"));
    }

    #[test]
    fn test_negative_event_id_and_absent_value() {
        let logger = CapturingLogger::new();
        logger.shutting_down(None);
        logger.shutting_down(Some("maintenance"));

        let records = logger.take();
        assert_eq!(records[0].event_id.id(), -1);
        assert_eq!(records[0].message.as_deref(), Some("Shutting down: (null)"));
        assert_eq!(records[1].message.as_deref(), Some("Shutting down: maintenance"));
    }

    #[test]
    fn test_custom_field_type() {
        let logger = CapturingLogger::new();
        logger.handled(RequestId(42), 17);

        let record = single(&logger);
        assert_eq!(record.message.as_deref(), Some("Handled req-0042 in 17ms"));
        assert_eq!(record.field("request"), Some("req-0042"));
    }

    #[test]
    fn test_raw_identifier_parameter() {
        let logger = CapturingLogger::new();
        logger.typed("bool");

        let record = single(&logger);
        assert_eq!(record.message.as_deref(), Some("Value of bool"));
        assert_eq!(field_names(&record), ["type"]);
    }

    #[test]
    fn test_lifetime_parameter_and_path_field() {
        let logger = CapturingLogger::new();
        logger.wrote(512, Path::new("/var/data/blob"));

        let record = single(&logger);
        assert_eq!(record.message.as_deref(), Some("Wrote 512 bytes to /var/data/blob"));
    }

    #[test]
    fn test_runtime_reexport() {
        let logger = CapturingLogger::new();
        logger.through_reexport(-3);
        assert_eq!(
            single(&logger).message.as_deref(),
            Some("Through a re-export: -3")
        );
    }

    #[test]
    fn test_runtime_use_alias() {
        use crate::interfaces::aliased::AliasedExt;

        let logger = CapturingLogger::new();
        logger.through_alias(7);
        let record = single(&logger);
        assert_eq!(record.event_id, EventId::new(40, "through_alias"));
        assert_eq!(record.message.as_deref(), Some("Aliased 7"));
    }

    #[test]
    fn test_runtime_super_path() {
        use crate::interfaces::relative::RelativeExt;

        let logger = CapturingLogger::new();
        logger.through_super(8);
        assert_eq!(single(&logger).message.as_deref(), Some("Relative 8"));
    }

    #[test]
    fn test_dyn_logger() {
        let logger = CapturingLogger::new();
        let dynamic: &dyn Logger = &logger;
        dynamic.could_not_open_socket("dyn.example.org");
        assert_eq!(single(&logger).field("hostName"), Some("dyn.example.org"));
    }

    // =============================================================================
    // Wrapper form
    // =============================================================================

    #[test]
    fn test_wrapper_implements_interface() {
        let logger = CapturingLogger::new();
        let log = LoggerExtensions::new(&logger);
        ILoggerExtensions::could_not_open_socket(&log, "wrapped.example.org");

        let record = single(&logger);
        assert_eq!(
            record.message.as_deref(),
            Some("Could not open socket to `wrapped.example.org`")
        );
    }

    #[test]
    fn test_wrapper_as_trait_object() {
        let logger = Arc::new(CapturingLogger::new());
        let events: Box<dyn IServiceEvents> = Box::new(Arc::clone(&logger).into_service_events());
        events.heartbeat();
        events.retrying("sync", 1, 3);
        assert_eq!(logger.len(), 2);
    }

    #[test]
    fn test_wrapper_accessors() {
        let log = StorageLog::new(CapturingLogger::new());
        log.typed("x");
        assert_eq!(log.logger().len(), 1);
        let inner = log.into_inner();
        assert_eq!(inner.take().len(), 1);
    }

    #[test]
    fn test_event_listing() {
        let ids: Vec<i32> = SERVICE_EVENTS_EVENTS.iter().map(EventId::id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, -1, 6]);
        assert_eq!(LOGGER_EXTENSIONS_EVENTS, &[EventId::new(0, "could_not_open_socket")]);
        assert_eq!(STORAGE_LOG_EVENTS[1].name(), "typed");
    }

    // =============================================================================
    // Level gating
    // =============================================================================

    struct Tally {
        conversions: Cell<usize>,
    }

    impl Tally {
        fn new() -> Self {
            Self {
                conversions: Cell::new(0),
            }
        }
    }

    impl ToFieldValue for Tally {
        fn to_field_value(&self) -> FieldValue<'_> {
            self.conversions.set(self.conversions.get() + 1);
            FieldValue::Str("tally")
        }
    }

    #[logger_extensions]
    trait ICounted {
        #[logger_message(20, Debug, "counted {value}")]
        fn counted(&self, value: &Tally);
    }

    #[test]
    fn test_disabled_level_skips_everything() {
        let logger = CapturingLogger::with_min_level(Level::Warning);
        let tally = Tally::new();
        logger.counted(&tally);

        assert!(logger.is_empty());
        assert_eq!(tally.conversions.get(), 0);
    }

    #[test]
    fn test_null_logger_skips_everything() {
        let tally = Tally::new();
        NullLogger.counted(&tally);
        assert_eq!(tally.conversions.get(), 0);
    }

    #[test]
    fn test_message_rendered_only_on_demand() {
        let logger = CapturingLogger::structured_only();
        let tally = Tally::new();
        logger.counted(&tally);

        assert_eq!(single(&logger).message, None);
        // One conversion for the structured field, none for the message.
        assert_eq!(tally.conversions.get(), 1);

        let logger = CapturingLogger::new();
        logger.counted(&tally);
        assert_eq!(single(&logger).message.as_deref(), Some("counted tally"));
        assert_eq!(tally.conversions.get(), 3);
    }

    struct FieldsOnly {
        seen: std::sync::Mutex<Vec<String>>,
    }

    impl Logger for FieldsOnly {
        fn is_enabled(&self, _level: Level) -> bool {
            true
        }

        fn log(&self, record: &typed_logging::Record<'_>) {
            let fields = record.fields();
            let names: Vec<String> = fields.fields().map(|f| f.name().to_string()).collect();
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", record.event_id(), names.join(",")));
            assert_eq!(fields.len(), names.len());
        }
    }

    #[test]
    fn test_custom_logger_sees_structured_view() {
        let logger = FieldsOnly {
            seen: Default::default(),
        };
        logger.retrying("upload", 1, 2);
        assert_eq!(
            logger.seen.lock().unwrap().as_slice(),
            ["retrying(2):operation,attempt,max_attempts"]
        );
    }

    // =============================================================================
    // Concurrency
    // =============================================================================

    #[test]
    fn test_concurrent_calls() {
        let logger = Arc::new(CapturingLogger::new());

        thread::scope(|scope| {
            for worker in 0..8u32 {
                let logger = Arc::clone(&logger);
                scope.spawn(move || {
                    for attempt in 0..50u32 {
                        logger.retrying("worker", worker, attempt);
                    }
                });
            }
        });

        let records = logger.take();
        assert_eq!(records.len(), 400);
        for record in &records {
            let worker = record.field("attempt").unwrap();
            let attempt = record.field("max_attempts").unwrap();
            assert_eq!(
                record.message.as_deref(),
                Some(format!("Retrying worker (attempt {worker} of {attempt})").as_str())
            );
        }
    }
}
