use std::env;

use chrono::Duration;
use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sfs_common::{parse_boolean_flag, parse_list, Secret};
use storefront_engine::helpers::DEFAULT_HASH_COST;

use crate::errors::ServerError;

const DEFAULT_SFS_HOST: &str = "127.0.0.1";
const DEFAULT_SFS_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/storefront.db";
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 25;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::hours(24);
/// HS256 keys shorter than this are refused.
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_db_connections: u32,
    /// Apply the bundled database schema when the server starts.
    pub run_migrations: bool,
    /// bcrypt work factor used when registering new accounts.
    pub password_hash_cost: u32,
    /// Origins that browsers may call the API from.
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SFS_HOST.to_string(),
            port: DEFAULT_SFS_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_db_connections: DEFAULT_MAX_DB_CONNECTIONS,
            run_migrations: true,
            password_hash_cost: DEFAULT_HASH_COST,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SFS_HOST").ok().unwrap_or_else(|| DEFAULT_SFS_HOST.into());
        let port = env::var("SFS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SFS_PORT. {e} Using the default, {DEFAULT_SFS_PORT}, instead."
                    );
                    DEFAULT_SFS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SFS_PORT);
        let database_url = env::var("SFS_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ SFS_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_db_connections = env::var("SFS_MAX_DB_CONNECTIONS")
            .ok()
            .and_then(|s| {
                s.parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .or_else(|| {
                        warn!("🪛️ Invalid value for SFS_MAX_DB_CONNECTIONS: {s}. Using the default.");
                        None
                    })
            })
            .unwrap_or(DEFAULT_MAX_DB_CONNECTIONS);
        let run_migrations = parse_boolean_flag(env::var("SFS_RUN_MIGRATIONS").ok(), true);
        let password_hash_cost = hash_cost_from_env();
        let cors_origins = cors_origins_from_env();
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        Self { host, port, database_url, max_db_connections, run_migrations, password_hash_cost, cors_origins, auth }
    }
}

fn hash_cost_from_env() -> u32 {
    match env::var("SFS_PASSWORD_HASH_COST") {
        Err(_) => DEFAULT_HASH_COST,
        Ok(s) => parse_hash_cost(&s).unwrap_or_else(|e| {
            warn!("🪛️ {e}. Using the default bcrypt cost of {DEFAULT_HASH_COST}.");
            DEFAULT_HASH_COST
        }),
    }
}

pub fn parse_hash_cost(s: &str) -> Result<u32, ServerError> {
    let cost = s
        .trim()
        .parse::<u32>()
        .map_err(|e| ServerError::ConfigurationError(format!("Invalid SFS_PASSWORD_HASH_COST ({s}): {e}")))?;
    if (MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
        Ok(cost)
    } else {
        Err(ServerError::ConfigurationError(format!(
            "SFS_PASSWORD_HASH_COST must be between {MIN_HASH_COST} and {MAX_HASH_COST}, not {cost}"
        )))
    }
}

fn cors_origins_from_env() -> Vec<String> {
    let origins = env::var("SFS_CORS_ORIGINS").map(|s| parse_list(&s)).unwrap_or_default();
    if origins.is_empty() {
        info!("🪛️ SFS_CORS_ORIGINS is not set. Allowing requests from {DEFAULT_CORS_ORIGIN} only.");
        return vec![DEFAULT_CORS_ORIGIN.to_string()];
    }
    let (wildcards, origins): (Vec<_>, Vec<_>) = origins.into_iter().partition(|o| o == "*");
    if !wildcards.is_empty() {
        warn!("🪛️ Wildcard origins are not supported in SFS_CORS_ORIGINS and have been ignored.");
    }
    info!("🪛️ CORS origins: {}", origins.join(", "));
    origins
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
/// Access token settings. Built once at start-up and never changed afterwards.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HS256 key used to both sign and verify access tokens.
    pub jwt_secret: Secret<String>,
    /// How long an access token is valid for after it is issued.
    pub token_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. Every access \
             token will become invalid when the server restarts. DO NOT operate on production like this. Set \
             SFS_JWT_SECRET instead. 🚨️🚨️🚨️"
        );
        let secret = thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect::<String>();
        Self { jwt_secret: Secret::new(secret), token_lifetime: DEFAULT_TOKEN_LIFETIME }
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: &str, token_lifetime: Duration) -> Result<Self, ServerError> {
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ServerError::ConfigurationError(format!(
                "The JWT secret must be at least {MIN_JWT_SECRET_LENGTH} characters long"
            )));
        }
        if token_lifetime <= Duration::zero() {
            return Err(ServerError::ConfigurationError("The token lifetime must be positive".to_string()));
        }
        Ok(Self { jwt_secret: Secret::new(jwt_secret.to_string()), token_lifetime })
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("SFS_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [SFS_JWT_SECRET]")))?;
        let token_lifetime = match env::var("SFS_TOKEN_LIFETIME_HOURS") {
            Ok(s) => s.parse::<i64>().map(Duration::hours).map_err(|e| {
                ServerError::ConfigurationError(format!("Invalid SFS_TOKEN_LIFETIME_HOURS ({s}): {e}"))
            })?,
            Err(_) => DEFAULT_TOKEN_LIFETIME,
        };
        Self::new(&secret, token_lifetime)
    }
}
