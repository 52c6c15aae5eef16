//! Location status response types.
//!
//! All types model the JSON returned by the `DineOnCampus` location status
//! endpoint. The API tags every body with `"status": "success"` or
//! `"status": "failure"`; [`LocationStatusResponse`] captures that as an
//! internally tagged enum so success-only fields cannot exist on a failure.

use serde::{Deserialize, Serialize};

/// Top-level body of `GET /v1/locations/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LocationStatusResponse {
    Success {
        request_time: f64,
        #[serde(rename = "records")]
        record_count: u64,
        locations: Vec<Location>,
    },
    /// The upstream reported failure. Any other fields are ignored.
    Failure,
}

impl LocationStatusResponse {
    /// Locations of a successful response, or an empty slice on failure.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        match self {
            Self::Success { locations, .. } => locations,
            Self::Failure => &[],
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A dining venue and its current open/closed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique within a single response only.
    pub id: String,
    pub name: String,
    #[serde(rename = "open")]
    pub is_open: bool,
    pub status: StatusInfo,
    #[serde(default)]
    pub occupancy: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusInfo {
    /// Free-text category such as `"open"` or `"closed"`. Grouping key.
    pub label: String,
    /// Human-readable detail, e.g. `"Open until 9:00 PM"`.
    pub message: String,
    /// `"green"`, `"red"`, or anything else the upstream invents.
    #[serde(rename = "color")]
    pub color_name: String,
}

/// Street address block. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "dst", default)]
    pub dst_flag: bool,
    #[serde(default)]
    pub gmt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_formatted: Option<String>,
    #[serde(default)]
    pub gmt_offset: f64,
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(rename = "manual_coords", default)]
    pub manual_coordinates: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location_json(id: &str, label: &str, color: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": format!("Venue {id}"),
            "open": label == "open",
            "status": { "label": label, "message": "msg", "color": color },
            "occupancy": "low",
            "address": {
                "street": "800 W Campbell Rd",
                "city": "Richardson",
                "state": "TX",
                "zip_code": "75080",
                "lat": 32.98,
                "lon": -96.75,
                "dst": true,
                "gmt": -6,
                "phone_formatted": "(972) 883-2111",
                "gmt_offset": -5,
                "coordinates": [32.98, -96.75],
                "manual_coords": [0, 0]
            }
        })
    }

    #[test]
    fn deserializes_success_envelope() {
        let body = serde_json::json!({
            "status": "success",
            "request_time": 0.0123,
            "records": 2,
            "locations": [location_json("a", "open", "green"), location_json("b", "closed", "red")]
        });

        let resp: LocationStatusResponse = serde_json::from_value(body).unwrap();
        let LocationStatusResponse::Success {
            record_count,
            locations,
            ..
        } = &resp
        else {
            panic!("expected success, got {resp:?}");
        };
        assert_eq!(*record_count, 2);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].id, "a");
        assert!(locations[0].is_open);
        assert_eq!(locations[1].status.color_name, "red");
        assert_eq!(locations[0].address.zip_code, "75080");
        assert_eq!(
            locations[0].address.phone_formatted.as_deref(),
            Some("(972) 883-2111")
        );
        assert!(locations[0].address.phone.is_none());
        assert!(locations[0].address.dst_flag);
        assert_eq!(locations[0].address.manual_coordinates, vec![0.0, 0.0]);
    }

    #[test]
    fn deserializes_failure_envelope_ignoring_extra_fields() {
        let body = serde_json::json!({ "status": "failure", "message": "site not found" });
        let resp: LocationStatusResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp, LocationStatusResponse::Failure);
        assert!(resp.locations().is_empty());
        assert!(!resp.is_success());
    }

    #[test]
    fn rejects_unknown_status_tag() {
        let body = serde_json::json!({ "status": "maybe" });
        assert!(serde_json::from_value::<LocationStatusResponse>(body).is_err());
    }

    #[test]
    fn rejects_success_without_locations() {
        let body = serde_json::json!({ "status": "success", "request_time": 1, "records": 0 });
        assert!(serde_json::from_value::<LocationStatusResponse>(body).is_err());
    }
}
