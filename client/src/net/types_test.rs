use super::*;

// =============================================================
// Payload shapes
// =============================================================

#[test]
fn login_response_accepts_access_token() {
    let raw = serde_json::json!({
        "access_token": "jwt-abc",
        "user": { "id": 7, "username": "ops", "email": "ops@example.test", "created_at": "2024-01-05T09:03:07" }
    });
    let resp: LoginResponse = serde_json::from_value(raw).unwrap();
    assert_eq!(resp.access_token, "jwt-abc");
    assert_eq!(resp.user.id, 7);
    assert_eq!(resp.user.created_at.as_deref(), Some("2024-01-05T09:03:07"));
}

#[test]
fn login_response_accepts_token_alias() {
    let raw = serde_json::json!({
        "token": "jwt-xyz",
        "user": { "id": 1, "username": "a", "email": "a@example.test" }
    });
    let resp: LoginResponse = serde_json::from_value(raw).unwrap();
    assert_eq!(resp.access_token, "jwt-xyz");
    assert_eq!(resp.user.created_at, None);
}

#[test]
fn new_device_omits_missing_type() {
    let body = NewDevice { name: "core-sw".to_owned(), ip_address: "10.0.0.2".to_owned(), device_type: None };
    assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({ "name": "core-sw", "ip_address": "10.0.0.2" }));
}

#[test]
fn device_update_serializes_only_present_fields() {
    let update = DeviceUpdate { status: Some("inactive".to_owned()), ..DeviceUpdate::default() };
    assert!(!update.is_empty());
    assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({ "status": "inactive" }));
    assert!(DeviceUpdate::default().is_empty());
}

#[test]
fn capture_request_uses_lowercase_protocol() {
    let body = CaptureRequest { protocol: Some(CaptureProtocol::Udp), count: Some(50), timeout: None };
    assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({ "protocol": "udp", "count": 50 }));
}

#[test]
fn empty_queries_serialize_to_empty_object() {
    assert_eq!(serde_json::to_value(HistoryQuery::default()).unwrap(), serde_json::json!({}));
    assert_eq!(serde_json::to_value(AlertQuery::default()).unwrap(), serde_json::json!({}));
    assert_eq!(serde_json::to_value(PacketQuery::default()).unwrap(), serde_json::json!({}));
}

// =============================================================
// Enum parsing
// =============================================================

#[test]
fn alert_status_parses_case_insensitively() {
    assert_eq!("Resolved".parse::<AlertStatus>().unwrap(), AlertStatus::Resolved);
    assert_eq!(" active ".parse::<AlertStatus>().unwrap(), AlertStatus::Active);
}

#[test]
fn alert_status_rejects_unknown() {
    let err = "snoozed".parse::<AlertStatus>().unwrap_err().to_string();
    assert!(err.contains("unknown alert status `snoozed`"), "{err}");
}

#[test]
fn capture_protocol_round_trips_through_display() {
    for proto in [CaptureProtocol::All, CaptureProtocol::Tcp, CaptureProtocol::Udp, CaptureProtocol::Ip] {
        assert_eq!(proto.to_string().parse::<CaptureProtocol>().unwrap(), proto);
    }
    assert!("icmp".parse::<CaptureProtocol>().is_err());
}
