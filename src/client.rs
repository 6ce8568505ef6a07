//! Session-authenticated JSON-RPC transport and identifier resolution.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::rpc;
use crate::session::SessionState;
use crate::types::*;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

static UUID_VALIDATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "^[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-4[a-fA-F0-9]{3}-[89abAB][a-fA-F0-9]{3}-[a-fA-F0-9]{12}$",
    )
    .expect("UUID validator pattern is valid")
});

/// Whether the given string is a canonical identifier (UUID v4 shape)
/// rather than a human-readable volume or tenant name.
pub fn is_canonical_id(id: &str) -> bool {
    UUID_VALIDATOR.is_match(id)
}

/// Client for the Quobyte management API.
///
/// One instance binds to a single API endpoint for its lifetime and holds
/// at most one server-issued session. Calls from any number of concurrent
/// tasks share that session; only the bootstrap exchange that establishes
/// it is serialized.
///
/// # Example
///
/// ```rust,no_run
/// use quobyte_api::QuobyteClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QuobyteClient::new("http://apiserver:7860", "admin", "secret")?;
///
/// // Accepts a volume name or UUID; names are resolved first.
/// let volume_uuid = client.resolve_volume("testVolume", "My Tenant").await?;
/// client.delete_volume(&volume_uuid).await?;
/// # Ok(())
/// # }
/// ```
pub struct QuobyteClient {
    http: Client,
    base_url: Url,
    username: String,
    password: String,
    retry_policy: RetryPolicy,
    session: Mutex<SessionState>,
}

impl QuobyteClient {
    /// Create a new API client for the given endpoint and credentials.
    pub fn new(
        url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(url.as_ref())?;
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Ok(Self {
            http,
            base_url,
            username: username.into(),
            password: password.into(),
            retry_policy: RetryPolicy::default(),
            session: Mutex::new(SessionState::default()),
        })
    }

    /// Replace the underlying HTTP client, e.g. to configure custom
    /// timeouts or TLS behavior.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Set the retry behavior hint threaded into outgoing requests.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// The currently configured retry behavior hint.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Whether a server-issued session is currently held.
    pub async fn has_active_session(&self) -> bool {
        self.session.lock().await.is_active()
    }

    // ==================== Generic RPC Transport ====================

    /// Invoke a remote method with an opaque params payload and decode the
    /// result into `T`.
    ///
    /// When no session is held, the request carries basic credentials and
    /// the session lock is held across the round trip, so concurrent
    /// callers wait for that single bootstrap instead of each
    /// re-authenticating. A 401 on a session-backed request invalidates
    /// the session and retries exactly once with credentials attached; a
    /// 401 on a credentialed request fails immediately.
    pub async fn call<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut params = serde_json::to_value(params).map_err(ApiError::Encoding)?;
        self.apply_retry_policy(&mut params);
        let body = rpc::encode_request(method, params)?;

        let mut retried = false;
        loop {
            let mut session = self.session.lock().await;
            let credentialed = !session.is_active();

            let response = if credentialed {
                debug!(method, "no active session, bootstrapping with basic credentials");
                let response = self
                    .http
                    .post(self.base_url.clone())
                    .header(header::CONTENT_TYPE, "application/json")
                    .basic_auth(&self.username, Some(&self.password))
                    .body(body.clone())
                    .send()
                    .await?;
                // Capture the session before releasing the lock; the next
                // caller must observe it. The lock is not held for body
                // download and decode.
                if response.status().is_success() {
                    session.store_cookies(response.headers());
                }
                drop(session);
                response
            } else {
                let cookie = session.cookie_header().unwrap_or_default().to_owned();
                drop(session);
                self.http
                    .post(self.base_url.clone())
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, cookie)
                    .body(body.clone())
                    .send()
                    .await?
            };

            let status = response.status();
            if status.is_success() {
                let payload = response.bytes().await?;
                return rpc::decode_response(method, &payload);
            }

            if status == StatusCode::UNAUTHORIZED {
                if credentialed {
                    // The credentials themselves were rejected; retrying
                    // would loop forever.
                    return Err(ApiError::Authentication);
                }
                // Session is no longer valid (service restart, explicit
                // invalidation, ...). Drop it and retry once; the retry
                // re-authenticates.
                warn!(method, "session rejected by the API service, re-authenticating");
                self.session.lock().await.invalidate();
                if retried {
                    return Err(ApiError::Authentication);
                }
                retried = true;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Transport {
                status: status.as_u16(),
                body,
            });
        }
    }

    /// Thread the retry hint into the params object. Pass-through only:
    /// the server may act on it, the transport never does.
    fn apply_retry_policy(&self, params: &mut Value) {
        if let Value::Object(map) = params {
            map.insert(
                "retry_policy".to_string(),
                Value::String(self.retry_policy.as_str().to_string()),
            );
        }
    }

    // ==================== Identifier Resolution ====================

    /// Resolve a volume name or UUID to the canonical volume UUID.
    ///
    /// Empty input means "unspecified" and is returned unchanged. Canonical
    /// input is returned unchanged without a network call. Otherwise the
    /// tenant is resolved first and the volume name is resolved within it.
    pub async fn resolve_volume(&self, volume: &str, tenant: &str) -> Result<String> {
        if volume.is_empty() || is_canonical_id(volume) {
            return Ok(volume.to_string());
        }
        let tenant_uuid = self.resolve_tenant(tenant).await?;
        let volume_uuid = self.resolve_volume_name_to_uuid(volume, &tenant_uuid).await?;
        debug!(volume, %volume_uuid, "resolved volume name");
        Ok(volume_uuid)
    }

    /// Resolve a tenant name or UUID to the canonical tenant UUID.
    pub async fn resolve_tenant(&self, tenant: &str) -> Result<String> {
        if tenant.is_empty() || is_canonical_id(tenant) {
            return Ok(tenant.to_string());
        }
        self.resolve_tenant_name_to_uuid(tenant).await
    }

    /// Resolve a volume name to its UUID within the given tenant.
    pub async fn resolve_volume_name_to_uuid(
        &self,
        volume_name: &str,
        tenant: &str,
    ) -> Result<String> {
        let request = ResolveVolumeNameRequest {
            volume_name: volume_name.to_string(),
            tenant_domain: tenant.to_string(),
        };
        let response: ResolveVolumeNameResponse = self.call("resolveVolumeName", &request).await?;
        Ok(response.volume_uuid)
    }

    /// Resolve a tenant name to its UUID.
    pub async fn resolve_tenant_name_to_uuid(&self, name: &str) -> Result<String> {
        let request = ResolveTenantNameRequest {
            tenant_name: name.to_string(),
        };
        let response: ResolveTenantNameResponse = self.call("resolveTenantName", &request).await?;
        Ok(response.tenant_id)
    }

    // ==================== Volume API ====================

    /// Create a new volume. Returns the UUID of the created volume.
    pub async fn create_volume(&self, request: &CreateVolumeRequest) -> Result<String> {
        let response: CreateVolumeResponse = self.call("createVolume", request).await?;
        Ok(response.volume_uuid)
    }

    /// Delete a volume by its UUID.
    pub async fn delete_volume(&self, volume_uuid: &str) -> Result<()> {
        let _: DeleteVolumeResponse = self
            .call(
                "deleteVolume",
                &DeleteVolumeRequest {
                    volume_uuid: volume_uuid.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// Erase a volume by its UUID, bypassing the recycle bin.
    pub async fn erase_volume(&self, volume_uuid: &str) -> Result<()> {
        let _: EraseVolumeResponse = self
            .call(
                "eraseVolume",
                &EraseVolumeRequest {
                    volume_uuid: volume_uuid.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// Delete a volume, resolving volume and tenant names to UUIDs first
    /// when the given values are not already canonical. A resolution
    /// failure is returned as-is and the delete is never attempted.
    pub async fn delete_volume_by_resolving_names_to_uuid(
        &self,
        volume: &str,
        tenant: &str,
    ) -> Result<()> {
        let volume_uuid = self.resolve_volume(volume, tenant).await?;
        self.delete_volume(&volume_uuid).await
    }

    /// Erase a volume, resolving volume and tenant names to UUIDs first
    /// when the given values are not already canonical.
    pub async fn erase_volume_by_resolving_names_to_uuid(
        &self,
        volume: &str,
        tenant: &str,
    ) -> Result<()> {
        let volume_uuid = self.resolve_volume(volume, tenant).await?;
        self.erase_volume(&volume_uuid).await
    }

    /// Delete a volume by name within the given tenant.
    pub async fn delete_volume_by_name(&self, volume_name: &str, tenant: &str) -> Result<()> {
        let volume_uuid = self.resolve_volume_name_to_uuid(volume_name, tenant).await?;
        self.delete_volume(&volume_uuid).await
    }

    /// Erase a volume by name within the given tenant.
    pub async fn erase_volume_by_name(&self, volume_name: &str, tenant: &str) -> Result<()> {
        let volume_uuid = self.resolve_volume_name_to_uuid(volume_name, tenant).await?;
        self.erase_volume(&volume_uuid).await
    }

    // ==================== Tenant API ====================

    /// Map of all tenant names to their ids.
    pub async fn get_tenant_map(&self) -> Result<HashMap<String, String>> {
        let response: GetTenantResponse =
            self.call("getTenant", &GetTenantRequest::default()).await?;
        Ok(response
            .tenant
            .into_iter()
            .map(|tenant| (tenant.name, tenant.tenant_id))
            .collect())
    }

    // ==================== Quota API ====================

    /// Set a logical disk space quota, in bytes, on a volume.
    pub async fn set_volume_quota(&self, volume_uuid: &str, quota_size_bytes: i64) -> Result<()> {
        let request = SetQuotaRequest {
            quotas: vec![Quota {
                consumer: vec![ConsumingEntity {
                    entity_type: ConsumingEntityType::Volume,
                    identifier: volume_uuid.to_string(),
                }],
                limits: vec![Resource {
                    resource_type: ResourceType::LogicalDiskSpace,
                    value: quota_size_bytes,
                }],
            }],
        };
        let _: SetQuotaResponse = self.call("setQuota", &request).await?;
        Ok(())
    }

    // ==================== Device API ====================

    /// List clients currently mounting volumes of the given tenant.
    pub async fn get_client_list(&self, tenant: &str) -> Result<GetClientListResponse> {
        self.call(
            "getClientList",
            &GetClientListRequest {
                tenant_domain: tenant.to_string(),
            },
        )
        .await
    }

    /// Network endpoints of a storage device.
    pub async fn get_device_network_endpoints(
        &self,
        device_id: u64,
    ) -> Result<GetDeviceNetworkEndpointsResponse> {
        self.call(
            "getDeviceNetworkEndpoints",
            &GetDeviceNetworkEndpointsRequest { device_id },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_id_accepts_uuid_v4() {
        assert!(is_canonical_id("f3c1a2b4-0d9e-4c6f-8a1b-2c3d4e5f6a7b"));
        assert!(is_canonical_id("F3C1A2B4-0D9E-4C6F-9A1B-2C3D4E5F6A7B"));
    }

    #[test]
    fn canonical_id_rejects_wrong_version_nibble() {
        // version nibble must be 4
        assert!(!is_canonical_id("f3c1a2b4-0d9e-1c6f-8a1b-2c3d4e5f6a7b"));
    }

    #[test]
    fn canonical_id_rejects_wrong_variant_nibble() {
        // variant nibble must be one of 8, 9, a, b
        assert!(!is_canonical_id("f3c1a2b4-0d9e-4c6f-7a1b-2c3d4e5f6a7b"));
    }

    #[test]
    fn canonical_id_rejects_names() {
        assert!(!is_canonical_id("testVolume"));
        assert!(!is_canonical_id(""));
        assert!(!is_canonical_id("f3c1a2b4-0d9e-4c6f-8a1b"));
    }

    #[test]
    fn invalid_endpoint_is_rejected_at_construction() {
        assert!(QuobyteClient::new("not a url", "user", "password").is_err());
    }

    #[test]
    fn retry_policy_defaults_to_interactive() {
        let client = QuobyteClient::new("http://localhost:7860", "user", "password").unwrap();
        assert_eq!(client.retry_policy(), RetryPolicy::Interactive);

        let client = client.with_retry_policy(RetryPolicy::Infinitely);
        assert_eq!(client.retry_policy(), RetryPolicy::Infinitely);
    }
}
