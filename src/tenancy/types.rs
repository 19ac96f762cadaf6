//! Tenant and device records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// Operational status reported for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of network device.
///
/// Well-known classes get their own variant; anything else is kept verbatim
/// so config files may name classes this crate has never heard of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceClass {
    Switch,
    Router,
    Firewall,
    Other(String),
}

impl From<String> for DeviceClass {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "switch" => DeviceClass::Switch,
            "router" => DeviceClass::Router,
            "firewall" => DeviceClass::Firewall,
            _ => DeviceClass::Other(value),
        }
    }
}

impl From<DeviceClass> for String {
    fn from(value: DeviceClass) -> Self {
        match value {
            DeviceClass::Switch => "switch".to_string(),
            DeviceClass::Router => "router".to_string(),
            DeviceClass::Firewall => "firewall".to_string(),
            DeviceClass::Other(other) => other,
        }
    }
}

/// A single device in a tenant's fabric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Identifier, unique within the owning tenant only.
    pub id: String,
    /// Management address.
    pub ip: IpAddr,
    #[serde(rename = "type")]
    pub device_type: DeviceClass,
    pub status: DeviceStatus,
}

/// A tenant and its ordered device inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
}

fn device(id: &str, ip: [u8; 4], device_type: DeviceClass, status: DeviceStatus) -> DeviceRecord {
    DeviceRecord {
        id: id.to_string(),
        ip: IpAddr::V4(Ipv4Addr::from(ip)),
        device_type,
        status,
    }
}

/// Built-in demo inventory used when no tenants are configured.
pub fn demo_tenants() -> Vec<TenantRecord> {
    vec![
        TenantRecord {
            id: "tenant-a".to_string(),
            name: "Tenant A".to_string(),
            devices: vec![
                device("dev1-A", [10, 0, 0, 1], DeviceClass::Switch, DeviceStatus::Online),
                device("dev2-A", [10, 0, 0, 2], DeviceClass::Router, DeviceStatus::Offline),
            ],
        },
        TenantRecord {
            id: "tenant-b".to_string(),
            name: "Tenant B".to_string(),
            devices: vec![
                device("dev1-B", [192, 168, 1, 1], DeviceClass::Firewall, DeviceStatus::Online),
                device("dev2-B", [192, 168, 1, 2], DeviceClass::Switch, DeviceStatus::Online),
            ],
        },
    ]
}
