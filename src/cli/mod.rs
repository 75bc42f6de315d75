use clap::Parser;
use crate::history::{ DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_SESSIONS };
use crate::training::matcher::DEFAULT_SIMILARITY_THRESHOLD;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// API Key for Groq. When unset, AI fallback is disabled and only trained answers are served.
    #[arg(long, env = "GROQ_API_KEY")]
    pub groq_api_key: Option<String>,

    /// Base URL for the Groq OpenAI-compatible API
    #[arg(long, env = "GROQ_BASE_URL", default_value = "https://api.groq.com/openai/v1")]
    pub groq_base_url: String,

    /// Upper bound in seconds for a single completion request
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "60")]
    pub request_timeout_secs: u64,

    // --- Training Data Args ---
    /// Path to the JSON file holding trained question/answer pairs.
    #[arg(long, env = "TRAINING_DATA_FILE", default_value = "training_data.json")]
    pub training_data_path: String,

    /// Combined score (0.0 to 1.0) a trained question must reach to answer without the LLM.
    #[arg(long, env = "SIMILARITY_THRESHOLD", default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub similarity_threshold: f64,

    // --- History Args ---
    /// Maximum number of messages kept per conversation (user and assistant turns).
    #[arg(long, env = "HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,

    /// Maximum number of conversations held at once; the least recently active is dropped first.
    #[arg(long, env = "MAX_SESSIONS", default_value_t = DEFAULT_MAX_SESSIONS)]
    pub max_sessions: usize,

    // --- Server Args ---
    /// Interface the HTTP server binds to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT", default_value = "5001")]
    pub port: u16,

    /// Directory served under /static.
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: String,

    /// HTML page served at /.
    #[arg(long, env = "INDEX_PATH", default_value = "templates/index.html")]
    pub index_path: String,
}

impl Args {
    /// Non-blank API key, if one was provided.
    pub fn api_key(&self) -> Option<String> {
        self.groq_api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
