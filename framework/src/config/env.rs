use std::path::Path;

/// Deployment environment, read from `APP_ENV`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Detect environment from APP_ENV, defaulting to Local
    pub fn detect() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            Some("staging") => Self::Staging,
            Some("development") => Self::Development,
            Some("testing") => Self::Testing,
            Some("local") | Some("") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Suffix used for `.env.{suffix}` files
    pub fn env_file_suffix(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Custom(name) => name.as_str(),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Local or development
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Local | Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.env_file_suffix())
    }
}

/// Load `.env` files from `project_root`
///
/// Precedence, highest first: real environment variables,
/// `.env.{env}.local`, `.env.{env}`, `.env.local`, `.env`.
///
/// dotenvy never overwrites a variable that is already set, so the files are
/// loaded from most to least specific.
pub fn load_dotenv(project_root: &Path) -> Environment {
    let env = Environment::detect();
    let suffix = env.env_file_suffix();

    let candidates = [
        format!(".env.{}.local", suffix),
        format!(".env.{}", suffix),
        ".env.local".to_string(),
        ".env".to_string(),
    ];

    for file in candidates {
        let path = project_root.join(&file);
        if dotenvy::from_path(&path).is_ok() {
            tracing::debug!(file = %path.display(), "loaded environment file");
        }
    }

    env
}

/// Read an environment variable, falling back to `default` when it is unset
/// or does not parse
///
/// # Example
/// ```
/// use kit::config::env;
///
/// let port: u16 = env("SERVER_PORT", 8080);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Read an optional environment variable
///
/// Empty values count as unset.
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| v.trim().parse().ok())
}
