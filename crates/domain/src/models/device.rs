//! Device (tracked tag) domain model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::triangulation::TriangulationSample;

/// A tracked tag ("beacon") registered with the service.
///
/// `device_state` is absent until the device has been successfully polled
/// once; it is mutated only by the live location updater and replaced
/// wholesale on each successful poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: String,
    #[serde(rename = "AssetType", default)]
    pub asset_type: Option<String>,
    #[serde(rename = "AssetDescription", default)]
    pub asset_description: Option<String>,
    #[serde(rename = "Owner", default)]
    pub owner: Option<String>,
    #[serde(rename = "CustomerSpecificId", default)]
    pub customer_specific_id: Option<String>,
    #[serde(rename = "DeviceState", default)]
    pub device_state: Option<Vec<TriangulationSample>>,
}

/// Device attribute a text filter can match against.
///
/// A closed set of accessors rather than a dynamic field lookup, so an
/// unknown field name is rejected at the string boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    SerialNumber,
    AssetType,
    AssetDescription,
    Owner,
    CustomerSpecificId,
}

impl FilterField {
    /// Returns the attribute value for `device`, or `None` when the device
    /// does not carry the attribute.
    pub fn value_of<'a>(&self, device: &'a Device) -> Option<&'a str> {
        match self {
            FilterField::SerialNumber => {
                if device.serial_number.is_empty() {
                    None
                } else {
                    Some(device.serial_number.as_str())
                }
            }
            FilterField::AssetType => device.asset_type.as_deref(),
            FilterField::AssetDescription => device.asset_description.as_deref(),
            FilterField::Owner => device.owner.as_deref(),
            FilterField::CustomerSpecificId => device.customer_specific_id.as_deref(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::SerialNumber => "SerialNumber",
            FilterField::AssetType => "AssetType",
            FilterField::AssetDescription => "AssetDescription",
            FilterField::Owner => "Owner",
            FilterField::CustomerSpecificId => "CustomerSpecificId",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SerialNumber" => Ok(FilterField::SerialNumber),
            "AssetType" => Ok(FilterField::AssetType),
            "AssetDescription" => Ok(FilterField::AssetDescription),
            "Owner" => Ok(FilterField::Owner),
            "CustomerSpecificId" => Ok(FilterField::CustomerSpecificId),
            _ => Err(format!(
                "Invalid filter field: {}. Must be one of: SerialNumber, AssetType, AssetDescription, Owner, CustomerSpecificId",
                s
            )),
        }
    }
}
