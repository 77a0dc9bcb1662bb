// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{collections::HashMap, fs, path::Path, sync::Arc};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{Event, Subscriber};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext, FormatEvent, FormatFields, FormattedFields,
        format::{FmtSpan, JsonFields, Writer},
    },
    layer::SubscriberExt,
};

// Config logger
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub logger: LogConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub output: String,
    pub is_show_line: bool,
    pub is_show_module_path: bool,
    pub is_show_target: bool,
    pub file: Option<LogFileConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogFileConfig {
    pub path: String,
    pub rotation_frequency: Option<String>,
}

/// Quiet by default: stdout carries the report, stderr only warnings.
impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            logger: LogConfig {
                level: "warn".to_string(),
                output: "stderr".to_string(),
                is_show_line: false,
                is_show_module_path: false,
                is_show_target: true,
                file: None,
            },
        }
    }
}

impl LoggerConfig {
    pub fn load_from_file(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).with_context(|| {
            format!("Failed to read config file: {}", config_path.display())
        })?;
        serde_yaml::from_str(&config_content).with_context(|| {
            format!("Failed to parse config file: {}", config_path.display())
        })
    }
}

// Define custom layer for reading tracing events in json format
struct JsonFormatter {
    config: Arc<LogConfig>,
}

impl JsonFormatter {
    fn new(config: Arc<LogConfig>) -> Self {
        Self { config }
    }
}

#[derive(Serialize)]
struct LogEntry {
    timestamp: String,
    level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl LogEntry {
    fn new(
        config: &LogConfig,
        event: &Event,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: event.metadata().level().to_string(),
            target: config
                .is_show_target
                .then(|| event.metadata().target().to_string()),
            module_path: config
                .is_show_module_path
                .then(|| event.metadata().module_path().unwrap_or("").to_string()),
            line: if config.is_show_line {
                event.metadata().line()
            } else {
                None
            },
            fields,
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut fields = visitor.fields;

        if let Some(scope) = ctx.event_scope() {
            let mut span_names = vec![];
            for span in scope.from_root() {
                span_names.push(span.name().to_string());
                if let Some(ext) = span.extensions().get::<FormattedFields<JsonFields>>()
                {
                    let v: HashMap<String, Value> =
                        serde_json::from_str(&ext.fields).unwrap_or_default();
                    fields.extend(v);
                }
            }
            fields.insert("span_names".to_string(), json!(span_names));
        }

        let log_entry = LogEntry::new(&self.config, event, fields);
        writeln!(
            writer,
            "{}",
            serde_json::to_string(&log_entry).map_err(|_| std::fmt::Error)?
        )
    }
}

#[derive(Default)]
struct JsonVisitor {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl tracing::field::Visit for JsonVisitor {
    fn record_debug(
        &mut self,
        field: &tracing::field::Field,
        value: &dyn std::fmt::Debug,
    ) {
        self.fields
            .insert(field.name().to_string(), json!(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields.insert(field.name().to_string(), json!(value));
    }
}

fn rotation(frequency: Option<&str>) -> Rotation {
    match frequency {
        Some("minutely") => Rotation::MINUTELY,
        Some("hourly") => Rotation::HOURLY,
        Some("daily") => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

/// Install the global subscriber described by `config`.
///
/// The returned guard flushes the non-blocking writer when dropped and
/// must outlive every log call.
pub fn init_logger(config: &LoggerConfig) -> Result<WorkerGuard> {
    let (writer, guard) = match config.logger.output.as_str() {
        "stdout" => tracing_appender::non_blocking(std::io::stdout()),
        "stderr" => tracing_appender::non_blocking(std::io::stderr()),
        "file" => {
            let cfg = config
                .logger
                .file
                .as_ref()
                .context("Failed to find log config file")?;

            let path = Path::new(&cfg.path);
            let directory = path.parent().unwrap_or_else(|| Path::new(""));
            let file_name = path
                .file_name()
                .context("Log file path has no file name")?;

            let prefix = file_name
                .to_str()
                .context("Log file name is not valid UTF-8")?;

            let file_appender = RollingFileAppender::builder()
                .rotation(rotation(cfg.rotation_frequency.as_deref()))
                .filename_prefix(prefix)
                .build(directory)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file_appender)
        },
        other => {
            return Err(anyhow::anyhow!("Invalid log output specified: {other}"));
        },
    };

    let subscriber_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .json()
        .event_format(JsonFormatter::new(Arc::new(config.logger.clone())))
        .fmt_fields(JsonFields::default());

    let env_filter = EnvFilter::try_new(&config.logger.level)
        .context("Failed to parse log level from config")?;

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(subscriber_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global default subscriber")?;

    Ok(guard)
}
