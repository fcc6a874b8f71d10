//! Executor configuration.
//!
//! Defaults reproduce the stock behaviour; deployments override them from
//! JSON or from `AGENTKIT_*` environment variables.

use crate::errors::{AgentError, AgentResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ARTIFACT_NAME_ENV: &str = "AGENTKIT_ARTIFACT_NAME";
pub const MALFORMED_FORM_ENV: &str = "AGENTKIT_MALFORMED_FORM";

/// What to do when a form's `result` is not valid JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedFormPolicy {
    /// Emit a final *failed* update and finish the invocation normally.
    #[default]
    Fail,
    /// Return [`AgentError::MalformedPayload`] without emitting anything.
    Propagate,
}

impl FromStr for MalformedFormPolicy {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "propagate" => Ok(Self::Propagate),
            other => Err(AgentError::InvalidConfiguration {
                field: "malformed_form".to_string(),
                reason: format!("expected `fail` or `propagate`, got `{other}`"),
            }),
        }
    }
}

/// Settings consumed by [`StreamTranslator`](crate::executor::StreamTranslator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Name given to the artifact that carries a text completion.
    pub artifact_name: String,
    /// Failure text for a form completion with no `result`.
    pub unexpected_state_message: String,
    /// Failure text for a completion that is neither text nor a form.
    pub unsupported_content_message: String,
    pub malformed_form: MalformedFormPolicy,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            artifact_name: "form".to_string(),
            unexpected_state_message: "Reaching an unexpected state".to_string(),
            unsupported_content_message: "Unsupported completion content".to_string(),
            malformed_form: MalformedFormPolicy::default(),
        }
    }
}

impl ExecutorConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> AgentResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AgentError::InvalidConfiguration {
                field: "executor".to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> AgentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> AgentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(ARTIFACT_NAME_ENV) {
            config.artifact_name = name;
        }
        if let Some(policy) = lookup(MALFORMED_FORM_ENV) {
            config.malformed_form = policy.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AgentResult<()> {
        if self.artifact_name.trim().is_empty() {
            return Err(AgentError::InvalidConfiguration {
                field: "artifact_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_artifact_name(mut self, name: impl Into<String>) -> Self {
        self.artifact_name = name.into();
        self
    }

    #[must_use]
    pub fn with_malformed_form(mut self, policy: MalformedFormPolicy) -> Self {
        self.malformed_form = policy;
        self
    }
}
