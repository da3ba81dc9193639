// # dns01d - DNS-01 Solver Runner
//
// Thin integration layer around the solver crates:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Registering solvers
// 4. Dispatching one `present` or `cleanup` call
//
// Serving the certificate controller's webhook API is left to the host
// process; this binary drives the same solver operations from the shell.
//
// ## Usage
//
// ```bash
// dns01d present _acme-challenge.example.com. <key>
// dns01d cleanup _acme-challenge.example.com. <key>
// ```
//
// ## Configuration
//
// - `GROUP_NAME`: Operator group identifier (required)
// - `DNS01_SOLVER`: Solver to dispatch to (default: cloudns)
// - `DNS01_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `CLOUDNS_TTL`: TXT record TTL in seconds (default: 60)
// - `CLOUDNS_BASE_URL`: API base URL (default: https://api.cloudns.net/dns/)
// - `CLOUDNS_TIMEOUT_SECS`: HTTP timeout (default: 30)
// - `CLOUDNS_ZONES`: Comma-separated zones; skips SOA discovery when set
// - `CLOUDNS_AUTH_ID_TYPE`: auth-id or sub-auth-id (read per invocation)
// - `CLOUDNS_AUTH_ID(_FILE)`, `CLOUDNS_AUTH_PASSWORD(_FILE)`: credentials
//   (read per invocation)

use anyhow::{Context, Result};
use dns01_core::{ChallengeRequest, HostConfig, SolverConfig, SolverRegistry};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Challenge operation succeeded
/// - 1: Configuration or usage error
/// - 2: Solver or runtime error
#[derive(Debug, Clone, Copy)]
enum Dns01ExitCode {
    /// Operation succeeded
    Success = 0,
    /// Configuration error or bad invocation
    ConfigError = 1,
    /// Solver failure or runtime error
    RuntimeError = 2,
}

impl From<Dns01ExitCode> for ExitCode {
    fn from(code: Dns01ExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Challenge action requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Present,
    CleanUp,
}

/// A parsed invocation
#[derive(Debug)]
struct Invocation {
    action: Action,
    request: ChallengeRequest,
}

impl Invocation {
    /// Parse `<present|cleanup> <fqdn> <key>`
    fn from_args(args: &[String]) -> Result<Self> {
        let [action, fqdn, key] = args else {
            anyhow::bail!("usage: dns01d <present|cleanup> <fqdn> <key>");
        };

        let action = match action.as_str() {
            "present" => Action::Present,
            "cleanup" | "clean-up" => Action::CleanUp,
            other => anyhow::bail!("unknown action '{}'. Expected present or cleanup", other),
        };

        if fqdn.is_empty() || key.is_empty() {
            anyhow::bail!("fqdn and key must not be empty");
        }

        // The controller always hands over a trailing-dot FQDN
        let fqdn = if fqdn.ends_with('.') {
            fqdn.clone()
        } else {
            format!("{}.", fqdn)
        };

        Ok(Self {
            action,
            request: ChallengeRequest::new(fqdn, key.clone()),
        })
    }
}

/// Application configuration
struct Config {
    solver: String,
    log_level: String,
    solver_config: SolverConfig,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let group_name = env::var("GROUP_NAME").unwrap_or_default();
        let mut solver_config = SolverConfig::new(group_name);

        if let Ok(ttl) = env::var("CLOUDNS_TTL") {
            solver_config.ttl = ttl
                .parse()
                .with_context(|| format!("CLOUDNS_TTL must be a number of seconds. Got: {}", ttl))?;
        }

        if let Ok(base_url) = env::var("CLOUDNS_BASE_URL") {
            solver_config.base_url = base_url;
        }

        if let Ok(timeout) = env::var("CLOUDNS_TIMEOUT_SECS") {
            solver_config.timeout_secs = timeout.parse().with_context(|| {
                format!("CLOUDNS_TIMEOUT_SECS must be a number of seconds. Got: {}", timeout)
            })?;
        }

        solver_config.zones = env::var("CLOUDNS_ZONES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            solver: env::var("DNS01_SOLVER").unwrap_or_else(|_| "cloudns".to_string()),
            log_level: env::var("DNS01_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            solver_config,
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.solver_config.group_name.trim().is_empty() {
            anyhow::bail!("GROUP_NAME is required. Set it via: export GROUP_NAME=acme.example.com");
        }

        self.solver_config.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DNS01_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Settings that are valid but probably not what the operator wants
    fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.solver_config.base_url.starts_with("http://") {
            warnings.push(format!(
                "CLOUDNS_BASE_URL {} is plain HTTP; credentials are sent in the query string",
                self.solver_config.base_url
            ));
        }

        warnings
    }

    fn tracing_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match Invocation::from_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}", e);
            return Dns01ExitCode::ConfigError.into();
        }
    };

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return Dns01ExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return Dns01ExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return Dns01ExitCode::ConfigError.into();
    }

    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return Dns01ExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(config, invocation).await {
            Ok(()) => Dns01ExitCode::Success,
            Err(e) => {
                error!("{:#}", e);
                if e.downcast_ref::<dns01_core::Error>().is_some_and(|e| e.is_config()) {
                    Dns01ExitCode::ConfigError
                } else {
                    Dns01ExitCode::RuntimeError
                }
            }
        }
    })
    .into()
}

/// Register solvers and dispatch the requested action
async fn run(config: Config, invocation: Invocation) -> Result<()> {
    let registry = SolverRegistry::new();

    #[cfg(feature = "cloudns")]
    {
        info!("Registering ClouDNS solver");
        dns01_provider_cloudns::register(&registry, &config.solver_config)?;
    }

    let host = HostConfig {
        group_name: config.solver_config.group_name.clone(),
    };
    let shutdown = registry.initialize_all(&host).await?;

    info!(
        "{:?} {} via {}",
        invocation.action, invocation.request.resolved_fqdn, config.solver
    );

    let result = match invocation.action {
        Action::Present => registry.present(&config.solver, &invocation.request).await,
        Action::CleanUp => registry.clean_up(&config.solver, &invocation.request).await,
    };

    shutdown.shutdown();
    result?;

    info!("Done");
    Ok(())
}
