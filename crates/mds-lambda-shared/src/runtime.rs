//! Lambda runtime state shared across invocations.
//!
//! This module provides a lazily-initialized singleton holding the provider
//! configuration, the credential authority and the record source. It is
//! built once per cold start and reused for every invocation afterwards.
//!
//! # Cold-Start Performance
//!
//! Initialization logs `total_init_ms` along with the number of loaded
//! credentials so slow cold starts can be spotted in CloudWatch.

use std::sync::OnceLock;
use std::time::Instant;

use tracing::info;

use mds_provider_lib::{InMemoryCredentialStore, ProviderConfig, SampleDataSource, TokenAuthority};

/// Lazily-initialized Lambda runtime state.
static RUNTIME: OnceLock<LambdaRuntime> = OnceLock::new();

/// Per-process state for the Provider API handlers.
pub struct LambdaRuntime {
    config: ProviderConfig,
    authority: TokenAuthority<InMemoryCredentialStore>,
    source: SampleDataSource,
}

impl LambdaRuntime {
    /// Build runtime state from an explicit configuration and the built-in
    /// credential table.
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_credentials(config, InMemoryCredentialStore::with_default_credentials())
    }

    pub fn with_credentials(config: ProviderConfig, credentials: InMemoryCredentialStore) -> Self {
        let source = SampleDataSource::new(config.provider_id.clone());
        Self {
            config,
            authority: TokenAuthority::new(credentials),
            source,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn authority(&self) -> &TokenAuthority<InMemoryCredentialStore> {
        &self.authority
    }

    /// Record source backing the data endpoints.
    pub fn source(&self) -> &SampleDataSource {
        &self.source
    }
}

/// Initialize the Lambda runtime from the process environment.
///
/// Call once from `main` before `lambda_runtime::run()`. Later calls return
/// the already-initialized state.
pub fn init_runtime() -> &'static LambdaRuntime {
    RUNTIME.get_or_init(|| {
        let start = Instant::now();
        let runtime = LambdaRuntime::new(ProviderConfig::from_env());

        info!(
            total_init_ms = start.elapsed().as_millis(),
            mds_version = %runtime.config.mds_version,
            provider_id = %runtime.config.provider_id,
            credential_count = runtime.authority.store().len(),
            "Lambda runtime initialization complete"
        );

        runtime
    })
}

/// Get the runtime, initializing it on first use.
pub fn get_runtime() -> &'static LambdaRuntime {
    init_runtime()
}
