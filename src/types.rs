//! Request and response types for the management API operations.
//!
//! These are plain data shapes; the transport treats them as opaque
//! serializable payloads and never inspects their fields.

use serde::{Deserialize, Serialize};

/// Retry behavior hint attached to outgoing requests.
///
/// The server uses this to decide how persistently it retries the
/// operation on its side; the client itself never changes its own retry
/// behavior based on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryPolicy {
    #[serde(rename = "INTERACTIVE")]
    Interactive,
    #[serde(rename = "INFINITELY")]
    Infinitely,
}

impl RetryPolicy {
    /// Wire representation of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            RetryPolicy::Interactive => "INTERACTIVE",
            RetryPolicy::Infinitely => "INFINITELY",
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Interactive
    }
}

// ==================== Volume API ====================

/// Request for `createVolume`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVolumeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub root_user_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub root_group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_device_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Response from `createVolume`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVolumeResponse {
    pub volume_uuid: String,
}

/// Request for `deleteVolume`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteVolumeRequest {
    pub volume_uuid: String,
}

/// Response from `deleteVolume`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteVolumeResponse {}

/// Request for `eraseVolume`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EraseVolumeRequest {
    pub volume_uuid: String,
}

/// Response from `eraseVolume`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EraseVolumeResponse {}

/// Request for `resolveVolumeName`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveVolumeNameRequest {
    pub volume_name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub tenant_domain: String,
}

/// Response from `resolveVolumeName`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveVolumeNameResponse {
    pub volume_uuid: String,
}

// ==================== Tenant API ====================

/// Request for `resolveTenantName`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveTenantNameRequest {
    pub tenant_name: String,
}

/// Response from `resolveTenantName`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveTenantNameResponse {
    pub tenant_id: String,
}

/// Request for `getTenant`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetTenantRequest {}

/// Response from `getTenant`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetTenantResponse {
    #[serde(default)]
    pub tenant: Vec<TenantDomainConfig>,
}

/// A tenant domain known to the cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDomainConfig {
    pub tenant_id: String,
    pub name: String,
}

// ==================== Quota API ====================

/// Request for `setQuota`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetQuotaRequest {
    pub quotas: Vec<Quota>,
}

/// Response from `setQuota`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetQuotaResponse {}

/// A quota: limits applied to a set of consuming entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quota {
    pub consumer: Vec<ConsumingEntity>,
    pub limits: Vec<Resource>,
}

/// Entity a quota is accounted against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumingEntity {
    #[serde(rename = "type")]
    pub entity_type: ConsumingEntityType,
    pub identifier: String,
}

/// Kind of consuming entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsumingEntityType {
    Volume,
    Tenant,
    User,
    Group,
}

/// A limited resource and its limit value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub value: i64,
}

/// Kind of limited resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    LogicalDiskSpace,
    PhysicalDiskSpace,
}

// ==================== Device API ====================

/// Request for `getClientList`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetClientListRequest {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub tenant_domain: String,
}

/// Response from `getClientList`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetClientListResponse {
    #[serde(rename = "client", default)]
    pub clients: Vec<MountedClient>,
}

/// A client currently mounting a volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountedClient {
    #[serde(rename = "mount_user_name", default)]
    pub mounted_user_name: String,
    #[serde(default)]
    pub mounted_volume_uuid: String,
}

/// Request for `getDeviceNetworkEndpoints`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDeviceNetworkEndpointsRequest {
    pub device_id: u64,
}

/// Response from `getDeviceNetworkEndpoints`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetDeviceNetworkEndpointsResponse {
    #[serde(default)]
    pub endpoints: Vec<DeviceNetworkEndpoint>,
}

/// Network endpoint of a storage device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceNetworkEndpoint {
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub port: i32,
}
