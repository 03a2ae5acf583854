use folio_error::{FolioError, FolioResult};
use folio_models::constants::LOG_DIR;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

const LOG_FILE_NAME: &str = "folio.log";

pub struct Logger {
    directive: String,
    reload_handle: Option<reload::Handle<EnvFilter, Registry>>,
    _file_guard: Option<WorkerGuard>,
}

impl Logger {
    /// `directive` uses the `EnvFilter` syntax, e.g. `info` or `folio_web=debug,info`.
    pub fn new(directive: impl Into<String>) -> Self {
        Logger {
            directive: directive.into(),
            reload_handle: None,
            _file_guard: None,
        }
    }

    #[inline]
    pub fn get_level(&self) -> &str {
        &self.directive
    }

    /// Swaps the active filter without restarting the subscriber.
    pub fn set_level(&mut self, directive: &str) -> FolioResult<()> {
        let filter = parse_filter(directive)?;
        if let Some(handle) = &self.reload_handle {
            handle
                .reload(filter)
                .map_err(|e| FolioError::from(format!("Failed to reload log filter: {e}")))?;
        }
        self.directive = directive.to_string();
        Ok(())
    }

    /// Installs the global subscriber: console output plus a daily rolling file.
    pub fn initialize(&mut self) -> FolioResult<()> {
        let file_appender = rolling::daily(LOG_DIR, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        self._file_guard = Some(guard);

        let (filter, handle) = reload::Layer::new(parse_filter(&self.directive)?);
        self.reload_handle = Some(handle);

        let console_layer = {
            #[cfg(debug_assertions)]
            let layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stdout)
                .with_file(true)
                .with_line_number(true);

            #[cfg(not(debug_assertions))]
            let layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_file(false)
                .with_line_number(false);

            layer
        };

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true);

        Registry::default()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|_| FolioError::from("Failed to set logger"))?;
        Ok(())
    }
}

/// Parses a filter directive; an unparsable directive is a configuration error.
pub fn parse_filter(directive: &str) -> FolioResult<EnvFilter> {
    EnvFilter::try_new(directive.trim()).map_err(|e| {
        FolioError::ConfigurationError(format!("invalid log level `{directive}`: {e}"))
    })
}
