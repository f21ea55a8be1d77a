use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

pub fn format_event(message: &str, context: Option<&Value>) -> String {
    match context {
        Some(context) => format!("[dart] {message} {context}"),
        None => format!("[dart] {message}"),
    }
}

pub fn log_event(level: LogLevel, message: &str, context: Option<Value>) {
    let line = format_event(message, context.as_ref());
    match level {
        LogLevel::Debug => tracing::debug!("{}", line),
        LogLevel::Info => tracing::info!("{}", line),
        LogLevel::Warn => tracing::warn!("{}", line),
        LogLevel::Error => tracing::error!("{}", line),
    }
}

/// Copy of `url` with the `crtfc_key` query value masked, for log output.
pub fn redact_api_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("crtfc_key", _)) => "crtfc_key=***".to_string(),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}
