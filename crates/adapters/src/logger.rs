//! Structured JSON logger adapter.

use crate::log_sink::LogSink;
use regform_config::{LogLevelSetting, LoggingConfig};
use regform_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use regform_shared::{REDACTED, is_sensitive_key, mask};
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// JSON logger emitting one line per event.
///
/// Values under personal-data keys are masked before they reach the sink:
/// strings keep their last four characters, anything else is replaced.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    base_fields: LogFields,
    min_level: LogLevel,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: LogFields::new(),
            min_level: LogLevel::Info,
        }
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

impl LoggerPort for JsonLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }

        let mut fields = self.base_fields.clone();
        if let Some(extra) = event.fields {
            fields.extend(extra);
        }

        let mut payload = serde_json::Map::new();
        payload.insert("timestampMs".to_string(), Value::from(now_epoch_ms()));
        payload.insert("level".to_string(), Value::from(event.level.as_str()));
        payload.insert("event".to_string(), Value::from(&*event.event));
        payload.insert("message".to_string(), Value::from(&*event.message));
        if !fields.is_empty() {
            let mut map = serde_json::Map::new();
            for (key, mut value) in fields {
                redact_entry(&key, &mut value);
                map.insert(key.into_string(), value);
            }
            payload.insert("fields".to_string(), Value::Object(map));
        }
        if let Some(mut error) = event.error {
            redact_value(&mut error);
            payload.insert("error".to_string(), error);
        }

        let line = serde_json::to_string(&Value::Object(payload)).map_or_else(
            |_| {
                "{\"timestampMs\":0,\"level\":\"error\",\"event\":\"logger.serialize_failed\",\"message\":\"log serialization failed\"}\n"
                    .to_string()
            },
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        );
        self.sink.write_line(&line);
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            sink: Arc::clone(&self.sink),
            base_fields: merged,
            min_level: self.min_level,
        })
    }
}

/// Logger that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent) {}

    fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// Map a configured level onto the port level.
#[must_use]
pub const fn log_level_from_setting(setting: LogLevelSetting) -> LogLevel {
    match setting {
        LogLevelSetting::Debug => LogLevel::Debug,
        LogLevelSetting::Info => LogLevel::Info,
        LogLevelSetting::Warn => LogLevel::Warn,
        LogLevelSetting::Error => LogLevel::Error,
    }
}

/// Build the logger described by config; disabled logging yields `NoopLogger`.
#[must_use]
pub fn logger_from_config(config: &LoggingConfig, sink: Arc<dyn LogSink>) -> Arc<dyn LoggerPort> {
    if config.enabled {
        Arc::new(JsonLogger::new(sink).with_min_level(log_level_from_setting(config.level)))
    } else {
        Arc::new(NoopLogger)
    }
}

fn redact_entry(key: &str, value: &mut Value) {
    if is_sensitive_key(key) {
        let replacement = match value {
            Value::String(text) => mask(text),
            Value::Null => return,
            _ => REDACTED.to_string(),
        };
        *value = Value::String(replacement);
    } else {
        redact_value(value);
    }
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                redact_entry(key, nested);
            }
        },
        Value::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}
