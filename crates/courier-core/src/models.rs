//! Delivery command payloads accepted by the ingestion facade.
//!
//! These are the domain objects callers hand to the facade. The ingestion
//! core does not validate their contents; they are serialized opaquely into
//! the event envelope and interpreted by downstream consumers.

use serde::{Deserialize, Serialize};

/// A delivery request carried as the payload of schedule and reschedule
/// events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Caller-assigned delivery identifier.
    pub delivery_id: String,
    /// Identifier of the account that owns the delivery.
    pub owner_id: String,
    /// Pickup location label.
    pub pickup_location: String,
    /// Dropoff location label.
    pub dropoff_location: String,
    /// Requested completion deadline, opaque to this core.
    pub deadline: String,
    /// Whether the delivery is expedited.
    pub expedited: bool,
    /// How the recipient confirms receipt.
    pub confirmation_required: ConfirmationType,
    /// Description of the package being delivered.
    pub package_info: PackageInfo,
}

/// Recipient confirmation requirement for a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationType {
    /// No confirmation required.
    None,
    /// Fingerprint confirmation.
    FingerPrint,
    /// Photo confirmation.
    Picture,
    /// Voice confirmation.
    Voice,
}

/// Package details attached to a delivery request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    /// Caller-assigned package identifier.
    pub package_id: String,
    /// Container size class for the package.
    pub size: ContainerSize,
    /// Free-form routing tag.
    pub tag: String,
    /// Package weight in kilograms.
    pub weight: f64,
}

/// Container size classes supported by the drone fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerSize {
    /// Fits the small cargo bay.
    Small,
    /// Fits the medium cargo bay.
    Medium,
    /// Requires the large cargo bay.
    Large,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_delivery() -> Delivery {
        Delivery {
            delivery_id: "d-0042".to_string(),
            owner_id: "o-7".to_string(),
            pickup_location: "warehouse-3".to_string(),
            dropoff_location: "dock-12".to_string(),
            deadline: "2026-09-01T12:00:00Z".to_string(),
            expedited: true,
            confirmation_required: ConfirmationType::Picture,
            package_info: PackageInfo {
                package_id: "p-19".to_string(),
                size: ContainerSize::Medium,
                tag: "fragile".to_string(),
                weight: 1.5,
            },
        }
    }

    #[test]
    fn delivery_serializes_with_camel_case_names() {
        let value = serde_json::to_value(sample_delivery()).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("deliveryId"));
        assert!(object.contains_key("ownerId"));
        assert!(object.contains_key("pickupLocation"));
        assert!(object.contains_key("dropoffLocation"));
        assert!(object.contains_key("confirmationRequired"));
        assert!(object.contains_key("packageInfo"));
        assert_eq!(value["packageInfo"]["packageId"], "p-19");
        assert_eq!(value["packageInfo"]["size"], "Medium");
    }

    #[test]
    fn delivery_round_trips_through_json() {
        let delivery = sample_delivery();
        let json = serde_json::to_string(&delivery).unwrap();
        let parsed: Delivery = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, delivery);
    }
}
