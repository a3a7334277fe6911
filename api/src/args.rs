use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser};
use nutrition_advisor_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_MAX_IMAGE_BYTES, LLMConfig,
    NutritionAdvisorConfig, SessionConfig, UploadConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrition-advisor", version, about = "Food photo nutrition analysis server")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub upload: UploadArgs,

    #[command(flatten)]
    pub session: SessionArgs,

    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/nutrition`
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3333"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "tls-cert-path", env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<PathBuf>,

    #[arg(long = "tls-key-path", env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<PathBuf>,

    #[arg(
        long = "metrics-enabled",
        env = "METRICS_ENABLED",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub metrics_enabled: bool,
}

#[derive(Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    /// Upper bound for one model request, at least one second
    #[arg(
        long = "llm-timeout-secs",
        env = "LLM_TIMEOUT_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout_secs: u64,

    /// Replaces the built-in nutritionist prompt
    #[arg(long = "analysis-prompt", env = "ANALYSIS_PROMPT")]
    pub prompt: Option<String>,
}

impl std::fmt::Debug for LlmArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmArgs")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct UploadArgs {
    #[arg(long = "max-image-bytes", env = "MAX_IMAGE_BYTES", default_value_t = DEFAULT_MAX_IMAGE_BYTES)]
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SessionArgs {
    #[arg(long = "session-ttl-secs", env = "SESSION_TTL_SECS", default_value_t = 3600)]
    pub ttl_secs: u64,

    #[arg(
        long = "session-sweep-interval-secs",
        env = "SESSION_SWEEP_INTERVAL_SECS",
        default_value_t = 60
    )]
    pub sweep_interval_secs: u64,
}

/// Outbound links of the page. An empty value hides the link.
#[derive(Debug, Clone, ClapArgs)]
pub struct PageArgs {
    #[arg(long = "page-home-url", env = "PAGE_HOME_URL", default_value = "https://dhavalcode.com")]
    pub home_url: String,

    #[arg(
        long = "page-example-url",
        env = "PAGE_EXAMPLE_URL",
        default_value = "https://youtu.be/MMvjoiRC-jQ"
    )]
    pub example_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for NutritionAdvisorConfig {
    fn from(args: Args) -> Self {
        NutritionAdvisorConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                request_timeout_secs: args.llm.request_timeout_secs,
                prompt: args.llm.prompt,
            },
            upload: UploadConfig {
                max_image_bytes: args.upload.max_image_bytes,
            },
            session: SessionConfig {
                ttl_secs: args.session.ttl_secs,
            },
        }
    }
}
