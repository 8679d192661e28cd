use clap::Parser;
use std::time::Duration;

use crate::workload::CaseWeights;

use super::defaults::{
    DEFAULT_API_URL, DEFAULT_CASE_WEIGHTS, DEFAULT_REGISTER_USERNAME, DEFAULT_STATUS_PATH,
    DEFAULT_SUBMIT_PATH, DEFAULT_TEST_INPUT,
};
use super::parsers::{
    parse_bool_env, parse_case_weights, parse_duration_arg, parse_positive_duration_arg,
    parse_positive_usize,
};
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Load-generation harness for online code judges - weighted submission mix, bounded concurrency, verdict polling and latency reports."
)]
pub struct TesterArgs {
    /// Base URL of the judge API
    #[arg(long = "api-url", short = 'u', env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Submission endpoint, relative to the API URL
    #[arg(long = "submit-path", env = "SUBMIT_PATH", default_value = DEFAULT_SUBMIT_PATH)]
    pub submit_path: String,

    /// Status endpoint prefix, relative to the API URL (the id is appended)
    #[arg(long = "status-path", env = "STATUS_PATH", default_value = DEFAULT_STATUS_PATH)]
    pub status_path: String,

    /// Problem every submission targets
    #[arg(long = "problem-id", env = "PROBLEM_ID", default_value_t = 1)]
    pub problem_id: u64,

    /// Stdin sent with each submission (empty to omit)
    #[arg(long = "test-input", env = "TEST_INPUT", default_value = DEFAULT_TEST_INPUT)]
    pub test_input: String,

    /// Size of the synthetic user pool (user_1 .. user_N)
    #[arg(long, env = "USERS", default_value = "5", value_parser = parse_positive_usize)]
    pub users: PositiveUsize,

    /// Maximum number of outstanding submit calls
    #[arg(
        long,
        short = 'c',
        env = "CONCURRENCY",
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// How long new submissions are admitted (supports ms/s/m/h; bare number = seconds)
    #[arg(
        long = "duration",
        short = 't',
        env = "DURATION",
        default_value = "30",
        value_parser = parse_duration_arg
    )]
    pub duration: Duration,

    /// Delay after each admitted submission (supports ms/s/m/h or decimal seconds)
    #[arg(
        long = "submit-interval",
        env = "SUBMIT_INTERVAL",
        default_value = "100ms",
        value_parser = parse_duration_arg
    )]
    pub submit_interval: Duration,

    /// Longest wait for a finished submission before re-checking admission
    #[arg(
        long = "harvest-wait",
        env = "HARVEST_WAIT",
        default_value = "100ms",
        value_parser = parse_positive_duration_arg
    )]
    pub harvest_wait: Duration,

    /// Per-call timeout for submissions
    #[arg(
        long = "submit-timeout",
        env = "SUBMIT_TIMEOUT",
        default_value = "15s",
        value_parser = parse_positive_duration_arg
    )]
    pub submit_timeout: Duration,

    /// Per-call timeout for status queries
    #[arg(
        long = "status-timeout",
        env = "STATUS_TIMEOUT",
        default_value = "10s",
        value_parser = parse_positive_duration_arg
    )]
    pub status_timeout: Duration,

    /// Per-call timeout for login and register
    #[arg(
        long = "auth-timeout",
        env = "AUTH_TIMEOUT",
        default_value = "10s",
        value_parser = parse_positive_duration_arg
    )]
    pub auth_timeout: Duration,

    /// TCP connect timeout
    #[arg(
        long = "connect-timeout",
        env = "CONNECT_TIMEOUT",
        default_value = "5s",
        value_parser = parse_positive_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Sleep between status queries for one submission
    #[arg(
        long = "poll-interval",
        env = "POLL_INTERVAL",
        default_value = "500ms",
        value_parser = parse_positive_duration_arg
    )]
    pub poll_interval: Duration,

    /// How long a single submission is polled before it counts as timed out
    #[arg(
        long = "poll-timeout",
        env = "POLL_TIMEOUT",
        default_value = "60",
        value_parser = parse_positive_duration_arg
    )]
    pub poll_timeout: Duration,

    /// Deadline for the whole polling phase (defaults to --poll-timeout)
    #[arg(
        long = "poll-phase-timeout",
        env = "POLL_PHASE_TIMEOUT",
        value_parser = parse_positive_duration_arg
    )]
    pub poll_phase_timeout: Option<Duration>,

    /// Submissions polled at the same time (1 = strictly sequential)
    #[arg(
        long = "poll-parallelism",
        env = "POLL_PARALLELISM",
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub poll_parallelism: PositiveUsize,

    /// Seed for the workload generator
    #[arg(long, env = "SEED", default_value_t = 42)]
    pub seed: u64,

    /// Case mix as 'case=weight' pairs (success, tle, mle, compile_error)
    #[arg(
        long = "case-weights",
        env = "CASE_WEIGHTS",
        default_value = DEFAULT_CASE_WEIGHTS,
        value_parser = parse_case_weights
    )]
    pub case_weights: CaseWeights,

    /// Log in with this email before the run (enables authentication)
    #[arg(long, env = "JUDGE_EMAIL")]
    pub email: Option<String>,

    /// Password for --email
    #[arg(long, env = "JUDGE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Username used when the account has to be registered first
    #[arg(long = "register-username", env = "JUDGE_USERNAME", default_value = DEFAULT_REGISTER_USERNAME)]
    pub register_username: String,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by JUDGELOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./judgeload.toml or ./judgeload.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
