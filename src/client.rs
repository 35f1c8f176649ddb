// 🌐 Backend Client - EcoPet REST API consumer
// Implements the contracts the core relies on: a provider of the current
// point balance and a sink that accepts redemption requests. Blocking;
// callers own threading and presentation.

use crate::entities::{EcoTask, Reward, UserProfile};
use crate::redemption::{redeem, InsufficientPoints};
use crate::schema::{self, RawReward, RawTask, RawUser, RedeemOutcome, ValidationError};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Production backend
pub const DEFAULT_API_URL: &str = "https://ecopet-r77q7.ondigitalocean.app/api";

// ============================================================================
// REDEMPTION STATUS
// ============================================================================

/// Business outcome of a redemption attempt. Transport faults are a
/// separate, anyhow-level concern.
#[derive(Debug, Clone)]
pub enum RedeemStatus {
    /// Backend accepted the claim
    Confirmed(RedemptionConfirmation),

    /// Backend refused the claim (e.g. its own balance check)
    Rejected(String),

    /// Local pre-validation failed; no request was issued
    Insufficient(InsufficientPoints),
}

#[derive(Debug, Clone)]
pub struct RedemptionConfirmation {
    /// Backend's confirmation message
    pub message: String,
    /// Optimistic balance after the deduction, consistent with what the
    /// backend will report on the next fetch
    pub new_balance: u32,
}

// ============================================================================
// API CLIENT
// ============================================================================

pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(30))
            .build();

        ApiClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    /// Client against the production backend
    pub fn production() -> Self {
        Self::new(DEFAULT_API_URL)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET /usuarios/{id} → validated profile with the current balance
    pub fn fetch_user(&self, user_id: u32) -> Result<UserProfile> {
        let url = self.url(&format!("usuarios/{}", user_id));
        debug!(%url, "fetching user profile");

        let raw: RawUser = self
            .agent
            .get(&url)
            .call()
            .with_context(|| format!("Failed to fetch user {}", user_id))?
            .into_json()
            .context("Failed to parse user payload")?;

        schema::validate_user(raw).map_err(|errors| payload_error("user payload", errors))
    }

    /// GET /premios → validated reward list
    pub fn fetch_rewards(&self) -> Result<Vec<Reward>> {
        let url = self.url("premios");
        debug!(%url, "fetching rewards");

        let raw: Vec<RawReward> = self
            .agent
            .get(&url)
            .call()
            .context("Failed to fetch rewards")?
            .into_json()
            .context("Failed to parse rewards payload")?;

        schema::validate_rewards(raw).map_err(|errors| payload_error("rewards payload", errors))
    }

    /// GET /tareas → validated task list
    pub fn fetch_tasks(&self) -> Result<Vec<EcoTask>> {
        let url = self.url("tareas");
        debug!(%url, "fetching tasks");

        let raw: Vec<RawTask> = self
            .agent
            .get(&url)
            .call()
            .context("Failed to fetch tasks")?
            .into_json()
            .context("Failed to parse tasks payload")?;

        schema::validate_tasks(raw).map_err(|errors| payload_error("tasks payload", errors))
    }

    /// POST /premios/canjear - claim a reward.
    ///
    /// Pre-validates with the pure affordability check; an unaffordable
    /// claim never reaches the network.
    pub fn redeem_reward(&self, user: &UserProfile, reward: &Reward) -> Result<RedeemStatus> {
        let new_balance = match redeem(user.points_total, reward.cost) {
            Ok(balance) => balance,
            Err(short) => return Ok(RedeemStatus::Insufficient(short)),
        };

        let url = self.url("premios/canjear");
        debug!(%url, reward = reward.id, "posting redemption");

        #[derive(Serialize)]
        struct RequestBody {
            id_usuario: u32,
            id_premio: u32,
        }

        // The backend encodes rejection in the body, sometimes under a
        // non-2xx status
        let response = match self.agent.post(&url).send_json(RequestBody {
            id_usuario: user.id,
            id_premio: reward.id,
        }) {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(e) => return Err(e).context("Failed to post redemption"),
        };

        let outcome: RedeemOutcome = response
            .into_json()
            .context("Failed to parse redemption response")?;

        let outcome = schema::validate_redeem_outcome(outcome)
            .map_err(|errors| payload_error("redemption response", errors))?;

        if let Some(error) = outcome.rejection() {
            warn!(reward = reward.id, "backend rejected redemption");
            return Ok(RedeemStatus::Rejected(error.to_string()));
        }

        Ok(RedeemStatus::Confirmed(RedemptionConfirmation {
            message: outcome
                .confirmation()
                .unwrap_or("Recompensa canjeada")
                .to_string(),
            new_balance,
        }))
    }

    /// POST /qr/canjear - exchange a scanned container code for points
    pub fn redeem_qr_code(&self, user_id: u32, code: &str) -> Result<String> {
        let url = self.url("qr/canjear");
        debug!(%url, "posting QR code");

        #[derive(Serialize)]
        struct RequestBody<'a> {
            codigo: &'a str,
            id_usuario: u32,
        }

        // This endpoint answers in English ("message"), unlike the
        // reward one
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            message: Option<String>,
        }

        let response = match self.agent.post(&url).send_json(RequestBody {
            codigo: code,
            id_usuario: user_id,
        }) {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(e) => return Err(e).context("Failed to post QR code"),
        };

        let body: Response = response
            .into_json()
            .context("Failed to parse QR response")?;

        body.message
            .ok_or_else(|| anyhow!("QR response carried no message"))
    }
}

fn payload_error(what: &str, errors: Vec<ValidationError>) -> anyhow::Error {
    let detail = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    anyhow!("Malformed {}: {}", what, detail)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:3000/api/");

        assert_eq!(
            client.url("premios/canjear"),
            "http://localhost:3000/api/premios/canjear"
        );
    }

    #[test]
    fn test_unaffordable_claim_never_reaches_the_network() {
        // Unroutable base url: any request would fail, so an Ok proves
        // the claim was stopped locally
        let client = ApiClient::new("http://127.0.0.1:1/api");
        let user = UserProfile::new(1, "Luis", 20);
        let reward = Reward::new(5, "Termo EcoPet", 30);

        let status = client.redeem_reward(&user, &reward).unwrap();
        match status {
            RedeemStatus::Insufficient(short) => {
                assert_eq!(short.shortfall, 10);
            }
            other => panic!("expected Insufficient, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_error_joins_field_errors() {
        let errors = vec![
            ValidationError {
                field: "id_usuario".to_string(),
                message: "Must be a positive id, got 0".to_string(),
                context: "User".to_string(),
            },
            ValidationError {
                field: "puntos_totales".to_string(),
                message: "Must be between 0 and 4294967295, got -1".to_string(),
                context: "User".to_string(),
            },
        ];

        let message = payload_error("user payload", errors).to_string();
        assert!(message.contains("Malformed user payload"));
        assert!(message.contains("id_usuario"));
        assert!(message.contains("puntos_totales"));
    }
}
