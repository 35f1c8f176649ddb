// 📐 Payload Boundary - validation of backend JSON
// The backend speaks loosely-typed Spanish JSON (puntos_totales,
// id_recompensa, optional fields). Raw structs mirror the wire shape;
// validation maps each into a typed entity, rejecting malformed payloads
// before they reach the engine.

use crate::entities::{EcoTask, Reward, UserProfile};
use serde::Deserialize;
use tracing::debug;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub context: String,
}

impl ValidationError {
    fn new(field: &str, message: String, context: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            message,
            context: context.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.context, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

// ============================================================================
// RAW PAYLOADS (wire shape)
// ============================================================================

/// GET /usuarios/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    #[serde(rename = "id_usuario")]
    pub id: i64,

    #[serde(rename = "nombre")]
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "correo")]
    #[serde(default)]
    pub email: Option<String>,

    #[serde(rename = "puntos_totales")]
    pub points_total: i64,
}

/// One entry of GET /premios
#[derive(Debug, Clone, Deserialize)]
pub struct RawReward {
    #[serde(rename = "id_recompensa")]
    pub id: i64,

    #[serde(rename = "nombre")]
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "puntos_necesarios")]
    pub cost: i64,
}

/// One entry of GET /tareas
#[derive(Debug, Clone, Deserialize)]
pub struct RawTask {
    #[serde(rename = "id_tarea")]
    pub id: i64,

    #[serde(rename = "descripcion")]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "puntos")]
    pub points: i64,

    #[serde(rename = "completada")]
    #[serde(default)]
    pub completed: Option<bool>,
}

/// POST /premios/canjear response: `mensaje` on success, `error` on
/// rejection. Both optional on the wire; a payload with neither is
/// malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct RedeemOutcome {
    #[serde(rename = "mensaje")]
    #[serde(default)]
    pub message: Option<String>,

    #[serde(rename = "error")]
    #[serde(default)]
    pub error: Option<String>,
}

impl RedeemOutcome {
    /// Confirmation message, if the backend accepted the claim
    pub fn confirmation(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Rejection message, if the backend refused the claim
    pub fn rejection(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

// ============================================================================
// FIELD CHECKS
// ============================================================================

/// Backend ids are positive integers
fn check_id(field: &str, value: i64, context: &str, errors: &mut Vec<ValidationError>) -> u32 {
    if value <= 0 || value > u32::MAX as i64 {
        errors.push(ValidationError::new(
            field,
            format!("Must be a positive id, got {}", value),
            context,
        ));
        return 0;
    }
    value as u32
}

/// Point values are non-negative integers. A negative total is a caller
/// error prevented here, before the engine (which cannot represent it).
fn check_points(field: &str, value: i64, context: &str, errors: &mut Vec<ValidationError>) -> u32 {
    if value < 0 || value > u32::MAX as i64 {
        errors.push(ValidationError::new(
            field,
            format!("Must be between 0 and {}, got {}", u32::MAX, value),
            context,
        ));
        return 0;
    }
    value as u32
}

fn check_text(
    field: &str,
    value: Option<String>,
    context: &str,
    errors: &mut Vec<ValidationError>,
) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            errors.push(ValidationError::new(
                field,
                "Required field is empty".to_string(),
                context,
            ));
            String::new()
        }
    }
}

// ============================================================================
// VALIDATION PASSES
// ============================================================================

pub fn validate_user(raw: RawUser) -> ValidationResult<UserProfile> {
    let mut errors = Vec::new();

    let id = check_id("id_usuario", raw.id, "User", &mut errors);
    let name = check_text("nombre", raw.name, "User", &mut errors);
    let points_total = check_points("puntos_totales", raw.points_total, "User", &mut errors);

    if !errors.is_empty() {
        debug!(count = errors.len(), "rejected user payload");
        return Err(errors);
    }

    Ok(UserProfile {
        id,
        name,
        email: raw.email.filter(|email| !email.trim().is_empty()),
        points_total,
    })
}

pub fn validate_reward(raw: RawReward) -> ValidationResult<Reward> {
    let mut errors = Vec::new();

    let id = check_id("id_recompensa", raw.id, "Reward", &mut errors);
    let name = check_text("nombre", raw.name, "Reward", &mut errors);
    let cost = check_points("puntos_necesarios", raw.cost, "Reward", &mut errors);

    if !errors.is_empty() {
        debug!(count = errors.len(), "rejected reward payload");
        return Err(errors);
    }

    Ok(Reward { id, name, cost })
}

pub fn validate_task(raw: RawTask) -> ValidationResult<EcoTask> {
    let mut errors = Vec::new();

    let id = check_id("id_tarea", raw.id, "Task", &mut errors);
    let description = check_text("descripcion", raw.description, "Task", &mut errors);
    let points = check_points("puntos", raw.points, "Task", &mut errors);

    if !errors.is_empty() {
        debug!(count = errors.len(), "rejected task payload");
        return Err(errors);
    }

    Ok(EcoTask {
        id,
        description,
        points,
        completed: raw.completed.unwrap_or(false),
    })
}

/// Validate a whole fetched list; any malformed entry rejects the list.
/// Errors are tagged with the entry position.
pub fn validate_rewards(raw: Vec<RawReward>) -> ValidationResult<Vec<Reward>> {
    validate_list(raw, "Reward", validate_reward)
}

pub fn validate_tasks(raw: Vec<RawTask>) -> ValidationResult<Vec<EcoTask>> {
    validate_list(raw, "Task", validate_task)
}

fn validate_list<R, T>(
    raw: Vec<R>,
    context: &str,
    validate: fn(R) -> ValidationResult<T>,
) -> ValidationResult<Vec<T>> {
    let mut items = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();

    for (index, entry) in raw.into_iter().enumerate() {
        match validate(entry) {
            Ok(item) => items.push(item),
            Err(entry_errors) => {
                for mut error in entry_errors {
                    error.context = format!("{}[{}]", context, index);
                    errors.push(error);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(items)
    } else {
        Err(errors)
    }
}

pub fn validate_redeem_outcome(raw: RedeemOutcome) -> ValidationResult<RedeemOutcome> {
    if raw.message.is_none() && raw.error.is_none() {
        return Err(vec![ValidationError::new(
            "mensaje",
            "Response carries neither a confirmation nor an error".to_string(),
            "RedeemOutcome",
        )]);
    }
    Ok(raw)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_payload_round_trip() {
        let raw: RawUser = serde_json::from_str(
            r#"{"id_usuario": 3, "nombre": "Valeria", "correo": "v@tty.mx", "puntos_totales": 166}"#,
        )
        .unwrap();

        let user = validate_user(raw).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Valeria");
        assert_eq!(user.email.as_deref(), Some("v@tty.mx"));
        assert_eq!(user.points_total, 166);
    }

    #[test]
    fn test_user_without_email_is_valid() {
        let raw: RawUser =
            serde_json::from_str(r#"{"id_usuario": 1, "nombre": "Luis", "puntos_totales": 0}"#)
                .unwrap();

        let user = validate_user(raw).unwrap();
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_negative_point_total_is_rejected() {
        let raw: RawUser =
            serde_json::from_str(r#"{"id_usuario": 1, "nombre": "Luis", "puntos_totales": -5}"#)
                .unwrap();

        let errors = validate_user(raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "puntos_totales");
        assert!(errors[0].message.contains("-5"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let raw: RawUser =
            serde_json::from_str(r#"{"id_usuario": 1, "nombre": "  ", "puntos_totales": 10}"#)
                .unwrap();

        let errors = validate_user(raw).unwrap_err();
        assert_eq!(errors[0].field, "nombre");
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let raw: RawUser =
            serde_json::from_str(r#"{"id_usuario": 0, "puntos_totales": -1}"#).unwrap();

        let errors = validate_user(raw).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["id_usuario", "nombre", "puntos_totales"]);
    }

    #[test]
    fn test_reward_payload() {
        let raw: RawReward = serde_json::from_str(
            r#"{"id_recompensa": 2, "nombre": "Botella reutilizable", "puntos_necesarios": 120}"#,
        )
        .unwrap();

        let reward = validate_reward(raw).unwrap();
        assert_eq!(reward.cost, 120);
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let raw: RawReward = serde_json::from_str(
            r#"{"id_recompensa": 2, "nombre": "Botella", "puntos_necesarios": -120}"#,
        )
        .unwrap();

        assert!(validate_reward(raw).is_err());
    }

    #[test]
    fn test_task_defaults_to_pending() {
        let raw: RawTask = serde_json::from_str(
            r#"{"id_tarea": 4, "descripcion": "Llevar cartón al centro", "puntos": 20}"#,
        )
        .unwrap();

        let task = validate_task(raw).unwrap();
        assert!(!task.completed);
    }

    #[test]
    fn test_list_validation_tags_entry_position() {
        let raw: Vec<RawReward> = serde_json::from_str(
            r#"[
                {"id_recompensa": 1, "nombre": "Sticker", "puntos_necesarios": 40},
                {"id_recompensa": 2, "nombre": "", "puntos_necesarios": 120}
            ]"#,
        )
        .unwrap();

        let errors = validate_rewards(raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].context, "Reward[1]");
    }

    #[test]
    fn test_valid_list_passes_whole() {
        let raw: Vec<RawTask> = serde_json::from_str(
            r#"[
                {"id_tarea": 1, "descripcion": "Depositar una botella", "puntos": 5, "completada": true},
                {"id_tarea": 2, "descripcion": "Entregar 10 botellas", "puntos": 10}
            ]"#,
        )
        .unwrap();

        let tasks = validate_tasks(raw).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
    }

    #[test]
    fn test_redeem_outcome_confirmation() {
        let raw: RedeemOutcome =
            serde_json::from_str(r#"{"mensaje": "Recompensa canjeada con éxito"}"#).unwrap();

        let outcome = validate_redeem_outcome(raw).unwrap();
        assert_eq!(outcome.confirmation(), Some("Recompensa canjeada con éxito"));
        assert_eq!(outcome.rejection(), None);
    }

    #[test]
    fn test_redeem_outcome_rejection() {
        let raw: RedeemOutcome =
            serde_json::from_str(r#"{"error": "Puntos insuficientes"}"#).unwrap();

        let outcome = validate_redeem_outcome(raw).unwrap();
        assert_eq!(outcome.rejection(), Some("Puntos insuficientes"));
    }

    #[test]
    fn test_empty_redeem_outcome_is_rejected() {
        let raw: RedeemOutcome = serde_json::from_str(r#"{}"#).unwrap();

        let errors = validate_redeem_outcome(raw).unwrap_err();
        assert_eq!(errors[0].context, "RedeemOutcome");
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::new(
            "puntos_totales",
            "Must be between 0 and 4294967295, got -5".to_string(),
            "User",
        );

        assert_eq!(
            error.to_string(),
            "[User] puntos_totales: Must be between 0 and 4294967295, got -5"
        );
    }
}
