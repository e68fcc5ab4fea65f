//! Gateway environments and request methods.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which gateway deployment requests are sent to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    #[default]
    Live,
}

impl Environment {
    pub const SANDBOX_BASE_URL: &'static str = "https://api.sandbox.ewaypayments.com";
    pub const LIVE_BASE_URL: &'static str = "https://api.ewaypayments.com";

    /// Maps the legacy `sandbox` flag onto an environment.
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Environment::Sandbox
        } else {
            Environment::Live
        }
    }

    /// Returns the fixed base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => Self::SANDBOX_BASE_URL,
            Environment::Live => Self::LIVE_BASE_URL,
        }
    }

    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => f.write_str("sandbox"),
            Environment::Live => f.write_str("live"),
        }
    }
}

/// The `Method` value of an access code request.
///
/// Both flows share the same payload; they differ in the endpoint used to
/// create the access code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestMethod {
    #[default]
    CreateAccessCodeShared,
    ProcessPayment,
}

impl RequestMethod {
    /// Endpoint path (relative to the base URL) that creates the access code.
    pub fn access_code_endpoint(&self) -> &'static str {
        match self {
            RequestMethod::CreateAccessCodeShared => "/CreateAccessCodeShared.json",
            RequestMethod::ProcessPayment => "/CreateAccessCode.json",
        }
    }
}
