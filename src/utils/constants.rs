//! Shared constants and invariants

/// Subtracted from the provider's reported expiry so consumers refresh early.
pub const SAFETY_MARGIN_MS: i64 = 5 * 60 * 1000;

pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
pub const DEFAULT_CONFIG_PATH: &str = "google-access-token.yaml";

// Compute Engine metadata server
pub const METADATA_ROOT: &str = "http://metadata.google.internal";
pub const METADATA_HOST_ENV_VAR: &str = "GCE_METADATA_HOST";
pub const METADATA_FLAVOR: &str = "Metadata-Flavor";
pub const METADATA_FLAVOR_VALUE: &str = "Google";
pub const METADATA_SERVICE_ACCOUNTS_URI: &str = "/computeMetadata/v1/instance/service-accounts";

// Token introspection
pub const TOKEN_INFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

pub const INVALID_ENVIRONMENT: &str = "invalid environment";
