use serde::{Deserialize, Serialize};

use userhub_users::User;

// -------------------------
// Response envelope
// -------------------------

/// Outcome marker carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Uniform `{status, message, data}` wrapper written by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
}

impl Envelope {
    pub fn success(message: impl Into<String>, data: Payload) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success without a `data` member (e.g. after a delete).
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            data: None,
        }
    }
}

/// Every shape the `data` member can take.
///
/// Serialized untagged: clients see the bare record, list or health object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    User(User),
    Users(Vec<User>),
    Health(HealthInfo),
}

impl From<User> for Payload {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}

impl From<Vec<User>> for Payload {
    fn from(value: Vec<User>) -> Self {
        Self::Users(value)
    }
}

impl From<HealthInfo> for Payload {
    fn from(value: HealthInfo) -> Self {
        Self::Health(value)
    }
}

/// Body of the health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInfo {
    /// RFC 3339 wall-clock time of the check.
    pub timestamp: String,
    /// Time since the service started, e.g. `1h2m3.5s`.
    pub uptime: String,
}

/// Render a duration as hours/minutes/seconds, omitting leading zero units.
///
/// Sub-second precision is kept to milliseconds with trailing zeros trimmed:
/// `0s`, `1.5s`, `1m30s`, `1h2m3.004s`.
pub fn format_uptime(uptime: std::time::Duration) -> String {
    let total = uptime.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    let millis = uptime.subsec_millis();

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&seconds.to_string());
    if millis > 0 {
        let frac = format!("{millis:03}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out.push('s');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use userhub_core::UserId;

    fn ana() -> User {
        User {
            id: UserId::new(3),
            name: "Ana".into(),
            email: "ana@example.com".into(),
        }
    }

    #[test]
    fn success_envelope_inlines_record() {
        let json = serde_json::to_value(Envelope::success("User found", ana().into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "success",
                "message": "User found",
                "data": { "id": 3, "name": "Ana", "email": "ana@example.com" },
            })
        );
    }

    #[test]
    fn envelope_without_data_omits_member() {
        let json = serde_json::to_value(Envelope::error("User not found")).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "error", "message": "User not found" }));
        assert!(json.get("data").is_none());
    }

    #[test]
    fn list_payload_is_bare_array() {
        let json = serde_json::to_value(Envelope::success("ok", vec![ana()].into())).unwrap();
        assert!(json["data"].is_array());
        assert_eq!(json["data"][0]["id"], 3);
    }

    #[test]
    fn envelope_reads_back_its_payload_shape() {
        let health = HealthInfo {
            timestamp: "2026-01-01T00:00:00Z".into(),
            uptime: "1s".into(),
        };
        let raw = serde_json::to_string(&Envelope::success("ok", health.clone().into())).unwrap();
        let back: Envelope = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.data, Some(Payload::Health(health)));
    }

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(Duration::ZERO), "0s");
        assert_eq!(format_uptime(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_uptime(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_uptime(Duration::from_millis(3_723_004)), "1h2m3.004s");
        assert_eq!(format_uptime(Duration::from_secs(7200)), "2h0m0s");
    }
}
