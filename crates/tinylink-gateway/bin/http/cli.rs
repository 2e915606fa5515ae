use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::num::NonZeroU32;
use tinylink_gateway::telemetry::LogFormat;

pub const LISTEN_ADDR_ENV: &str = "TINYLINK_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "TINYLINK_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "TINYLINK_MYSQL_DSN";
pub const CODE_LENGTH_ENV: &str = "TINYLINK_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "TINYLINK_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "TINYLINK_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "TINYLINK_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CODE_LENGTH: &str = "6";
pub const DEFAULT_MAX_ATTEMPTS: &str = "10";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinylink-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// Length of generated short codes.
    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value = DEFAULT_CODE_LENGTH,
        value_parser = clap::value_parser!(u8).range(1..=32),
    )]
    pub code_length: u8,

    /// Candidates tried per create request before giving up.
    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: NonZeroU32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}
