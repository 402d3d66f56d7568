use anyhow::Result;
use clap::Parser;

/// TVU student portal MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Student ID used to log into the portal
    #[arg(short = 's', long, env = "MSSV")]
    pub student_id: Option<String>,

    /// Portal password
    #[arg(short = 'p', long, env = "PASSWORD")]
    pub password: Option<String>,

    /// Base URL of the portal API
    #[arg(long, env = "TVU_BASE_URL", default_value = "https://ttsv.tvu.edu.vn")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "TVU_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,

    /// Fallback token lifetime in seconds, used when the login
    /// response carries no expiry
    #[arg(long, env = "TVU_TOKEN_LIFETIME_SECS", default_value = "7200")]
    pub token_lifetime_secs: i64,

    /// Default semester code for schedule queries (e.g. 20242)
    #[arg(long, env = "TVU_SEMESTER", default_value = "20242")]
    pub semester: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    // Portal credentials (may be empty; tools degrade with a warning)
    pub student_id: String,
    pub password: String,

    // Portal endpoint settings
    pub base_url: String,
    pub timeout_secs: u64,
    pub token_lifetime_secs: i64,
    pub current_semester: String,

    // Logging
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with priority: CLI > ENV > defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        // Parse CLI arguments (clap resolves the ENV fallbacks)
        let args = CliArgs::parse();

        Ok(Self::from_args(args))
    }

    /// Build the resolved config from parsed arguments
    pub fn from_args(args: CliArgs) -> Self {
        Config {
            student_id: args.student_id.unwrap_or_default(),
            password: args.password.unwrap_or_default(),
            base_url: normalize_base_url(&args.base_url),
            timeout_secs: args.timeout_secs,
            token_lifetime_secs: args.token_lifetime_secs,
            current_semester: args.semester,
            log_level: args.log_level,
        }
    }

    /// Validate configuration
    ///
    /// Missing credentials are deliberately not an error here: the server
    /// must start without them and each tool answers with a warning instead.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("TVU_BASE_URL must not be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("TVU_BASE_URL must start with http:// or https://");
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("TVU_TIMEOUT_SECS must be greater than zero");
        }

        if self.token_lifetime_secs <= 0 {
            anyhow::bail!("TVU_TOKEN_LIFETIME_SECS must be greater than zero");
        }

        Ok(())
    }

    /// True when both halves of the credential pair are present
    pub fn has_credentials(&self) -> bool {
        !self.student_id.is_empty() && !self.password.is_empty()
    }
}

/// Strip trailing slashes so endpoint paths can be appended directly
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
