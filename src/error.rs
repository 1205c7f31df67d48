use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API token not found. Pass --token, set TOKEN, or run 'tracker-stories auth'.")]
    TokenNotFound,

    #[error("Project ID not found. Pass --project-id, set PROJECT_ID, or run 'tracker-stories auth'.")]
    ProjectIdNotFound,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Owner with id {0} is not a member of the project")]
    UnknownOwner(u64),

    #[error("Field '{0}' does not exist on the stories")]
    UnknownField(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> TrackerResult<T>;
    fn with_context<F>(self, f: F) -> TrackerResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> TrackerResult<T> {
        self.map_err(|e| TrackerError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> TrackerResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| TrackerError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> TrackerResult<T> {
        self.ok_or_else(|| TrackerError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> TrackerResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| TrackerError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! tracker_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::TrackerError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::TrackerError::$error_type(format!($fmt, $($arg)*))
    };
}
