use serde::Deserialize;

/// The latest telemetry pushed for a device. Only the `extra` section is read
/// by the rule editor; every level is optional.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct TelemetrySnapshot {
    #[serde(default)]
    pub extra: Option<TelemetryExtra>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct TelemetryExtra {
    #[serde(default)]
    pub registrations: Vec<SipRegistration>,
    #[serde(default)]
    pub contacts: Vec<SipContact>,
    #[serde(default)]
    pub interfaces: Vec<NetworkInterface>,
    #[serde(default)]
    pub docker: Option<DockerInfo>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SipRegistration {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub server_uri: Option<String>,
    #[serde(default)]
    pub expires_s: Option<i64>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SipContact {
    pub aor: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rtt_ms: Option<f64>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NetworkInterface {
    pub name: String,
    #[serde(default)]
    pub rx_bps: Option<u64>,
    #[serde(default)]
    pub tx_bps: Option<u64>,
    #[serde(default)]
    pub rx_bytes: Option<u64>,
    #[serde(default)]
    pub tx_bytes: Option<u64>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct DockerInfo {
    #[serde(default)]
    pub containers: Vec<ContainerInfo>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ContainerInfo {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TelemetrySnapshot {
    pub fn registrations(&self) -> &[SipRegistration] {
        self.extra
            .as_ref()
            .map(|e| e.registrations.as_slice())
            .unwrap_or_default()
    }

    pub fn contacts(&self) -> &[SipContact] {
        self.extra
            .as_ref()
            .map(|e| e.contacts.as_slice())
            .unwrap_or_default()
    }

    pub fn interfaces(&self) -> &[NetworkInterface] {
        self.extra
            .as_ref()
            .map(|e| e.interfaces.as_slice())
            .unwrap_or_default()
    }

    pub fn containers(&self) -> &[ContainerInfo] {
        self.extra
            .as_ref()
            .and_then(|e| e.docker.as_ref())
            .map(|d| d.containers.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_agent_payload() {
        let snapshot: TelemetrySnapshot = serde_json::from_value(json!({
            "extra": {
                "registrations": [
                    { "name": "trunk-a", "status": "Registered", "serverUri": "sip:pbx", "expiresS": 300 }
                ],
                "contacts": [{ "aor": "sip:100@pbx", "status": "Reachable", "rttMs": 12.5 }],
                "interfaces": [{ "name": "eth0", "rx_bps": 1000, "tx_bps": 2000 }],
                "docker": { "containers": [{ "name": "db", "state": "running", "status": "Up 3 hours" }] }
            }
        }))
        .unwrap();

        assert_eq!(snapshot.registrations()[0].server_uri.as_deref(), Some("sip:pbx"));
        assert_eq!(snapshot.registrations()[0].expires_s, Some(300));
        assert_eq!(snapshot.contacts()[0].rtt_ms, Some(12.5));
        assert_eq!(snapshot.interfaces()[0].tx_bps, Some(2000));
        assert_eq!(snapshot.containers()[0].state.as_deref(), Some("running"));
    }

    #[test]
    fn test_missing_sections_yield_empty_slices() {
        let snapshot: TelemetrySnapshot = serde_json::from_value(json!({})).unwrap();
        assert!(snapshot.registrations().is_empty());
        assert!(snapshot.containers().is_empty());

        let snapshot: TelemetrySnapshot =
            serde_json::from_value(json!({ "extra": { "interfaces": [] } })).unwrap();
        assert!(snapshot.interfaces().is_empty());
        assert!(snapshot.containers().is_empty());
    }
}
