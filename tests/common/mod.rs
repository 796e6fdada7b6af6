//! Common test utilities
//!
//! In-memory stand-ins for the Kubernetes object store, the credentials
//! store and the Pingdom API, plus `Check` fixtures.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use kube::ResourceExt;
use pingdom_operator::config::ControllerConfig;
use pingdom_operator::controller::reconciler::{
    CheckStore, CredentialStore, CredentialsError, Reconciler, StoreError,
};
use pingdom_operator::crd::{Check, CheckStatus, RequestParams};
use pingdom_operator::provider::{
    CheckResponse, CheckResponseType, CreateCheckResponse, CreatedCheck, HttpDetails,
    MessageResponse, PingdomApi, PingdomCredentials, PingdomError, ProviderFactory,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

pub const NAMESPACE: &str = "monitoring";
pub const FINALIZER: &str = "observability.pingdom.mig4.gitlab.io/check-resource";

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` to ensure it's only called once across all tests. Pact's
/// mock server installs the ring provider itself, so an already installed
/// provider is left in place.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        if rustls::crypto::CryptoProvider::get_default().is_none() {
            // Losing the race to another installer leaves a provider in place
            let _ = rustls::crypto::ring::default_provider().install_default();
        }
        assert!(
            rustls::crypto::CryptoProvider::get_default().is_some(),
            "a rustls crypto provider should be installed"
        );
    });
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A `Check` named `name` in [`NAMESPACE`] with the given spec
pub fn check(name: &str, spec: serde_json::Value) -> Check {
    serde_json::from_value(json!({
        "apiVersion": "observability.pingdom.mig4.gitlab.io/v1alpha1",
        "kind": "Check",
        "metadata": {
            "name": name,
            "namespace": NAMESPACE,
            "uid": format!("uid-{name}"),
            "resourceVersion": "1",
            "creationTimestamp": "2021-01-01T00:00:00Z"
        },
        "spec": spec
    }))
    .expect("valid Check fixture")
}

/// Minimal valid HTTP check spec
pub fn http_spec() -> serde_json::Value {
    json!({
        "host": "example.com",
        "type": "http",
        "credentialsSecret": { "name": "pingdom-credentials" }
    })
}

/// `check` that already exists on Pingdom as `id`, finalizer attached
pub fn existing_check(name: &str, spec: serde_json::Value, id: i64) -> Check {
    let mut check = check(name, spec);
    check.finalizers_mut().push(FINALIZER.to_string());
    check.status = Some(CheckStatus {
        id,
        ..CheckStatus::default()
    });
    check
}

pub fn mark_deleted(check: &mut Check) {
    check.metadata.deletion_timestamp =
        serde_json::from_value(json!("2021-06-01T00:00:00Z")).expect("valid timestamp");
}

/// Pingdom's view of an HTTP check named `name` on example.com
pub fn remote_http_check(id: i64, name: &str) -> CheckResponse {
    CheckResponse {
        id,
        name: name.to_string(),
        hostname: "example.com".to_string(),
        resolution: 5,
        status: "up".to_string(),
        created: 1_609_459_200,
        last_test_time: 1_609_459_260,
        last_response_time: 87,
        user_ids: None,
        check_type: CheckResponseType {
            name: "http".to_string(),
            http: Some(HttpDetails {
                url: "/".to_string(),
                encryption: false,
                port: 80,
            }),
            ..CheckResponseType::default()
        },
        ..CheckResponse::default()
    }
}

pub fn server_error() -> PingdomError {
    PingdomError::Api {
        status_code: 500,
        status_desc: "Internal Server Error".to_string(),
        message: "Something went wrong".to_string(),
    }
}

pub fn credentials() -> PingdomCredentials {
    PingdomCredentials {
        user: "user@example.com".to_string(),
        password: "secret".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Object store
// ---------------------------------------------------------------------------

/// In-memory object store behaving like the Kubernetes API for `Check`s
///
/// `update` ignores the status (status subresource semantics) and purges an
/// object being deleted once its last finalizer is gone.
#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<BTreeMap<String, Check>>,
    pub updates: AtomicUsize,
    pub status_updates: AtomicUsize,
    pub fail_updates: AtomicBool,
}

impl InMemoryStore {
    pub fn with(check: Check) -> Self {
        let store = Self::default();
        store.put(check);
        store
    }

    pub fn put(&self, check: Check) {
        self.objects
            .lock()
            .unwrap()
            .insert(check.name_any(), check);
    }

    pub fn stored(&self, name: &str) -> Option<Check> {
        self.objects.lock().unwrap().get(name).cloned()
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn status_updates(&self) -> usize {
        self.status_updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CheckStore for InMemoryStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<Check>, StoreError> {
        Ok(self
            .stored(name)
            .filter(|c| c.namespace().as_deref() == Some(namespace)))
    }

    async fn update(&self, check: &Check) -> Result<Check, StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("update rejected".to_string()));
        }

        let mut objects = self.objects.lock().unwrap();
        let stored = objects
            .get_mut(&check.name_any())
            .ok_or(StoreError::Unavailable("object not found".to_string()))?;

        let version: u64 = stored
            .resource_version()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        stored.metadata = check.metadata.clone();
        stored.metadata.resource_version = Some((version + 1).to_string());
        stored.spec = check.spec.clone();
        let updated = stored.clone();

        if updated.metadata.deletion_timestamp.is_some() && updated.finalizers().is_empty() {
            objects.remove(&updated.name_any());
        }
        Ok(updated)
    }

    async fn update_status(&self, check: &Check) -> Result<(), StoreError> {
        self.status_updates.fetch_add(1, Ordering::SeqCst);
        let mut objects = self.objects.lock().unwrap();
        let stored = objects
            .get_mut(&check.name_any())
            .ok_or(StoreError::Unavailable("object not found".to_string()))?;
        stored.status = check.status.clone();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Credentials store returning fixed credentials, or a missing-key error
pub struct StaticCredentials {
    credentials: Option<PingdomCredentials>,
    pub lookups: AtomicUsize,
}

impl StaticCredentials {
    pub fn valid() -> Self {
        Self {
            credentials: Some(credentials()),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn missing_password() -> Self {
        Self {
            credentials: None,
            lookups: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CredentialStore for StaticCredentials {
    async fn get(&self, namespace: &str, name: &str) -> Result<PingdomCredentials, CredentialsError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.credentials
            .clone()
            .ok_or_else(|| CredentialsError::MissingKey {
                key: "password",
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Pingdom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(RequestParams),
    Read(i64),
    Update(i64, RequestParams),
    Delete(i64),
}

/// Pingdom stand-in recording every call
///
/// Holds at most one remote check; operations on an id it does not hold
/// fail with Pingdom's invalid identifier error.
pub struct FakePingdom {
    calls: Mutex<Vec<Call>>,
    next_id: i64,
    remote: Mutex<Option<CheckResponse>>,
    create_error: Mutex<Option<PingdomError>>,
    update_error: Mutex<Option<PingdomError>>,
    delete_error: Mutex<Option<PingdomError>>,
}

impl FakePingdom {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: 1001,
            remote: Mutex::new(None),
            create_error: Mutex::new(None),
            update_error: Mutex::new(None),
            delete_error: Mutex::new(None),
        }
    }

    pub fn with_remote(self, check: CheckResponse) -> Self {
        *self.remote.lock().unwrap() = Some(check);
        self
    }

    pub fn failing_create(self, error: PingdomError) -> Self {
        *self.create_error.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_update(self, error: PingdomError) -> Self {
        *self.update_error.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_delete(self, error: PingdomError) -> Self {
        *self.delete_error.lock().unwrap() = Some(error);
        self
    }

    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remote(&self) -> Option<CheckResponse> {
        self.remote.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn known(&self, id: i64) -> Result<(), PingdomError> {
        match &*self.remote.lock().unwrap() {
            Some(remote) if remote.id == id => Ok(()),
            _ => Err(PingdomError::invalid_identifier()),
        }
    }
}

impl Default for FakePingdom {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PingdomApi for FakePingdom {
    async fn create_check(&self, params: &RequestParams) -> Result<CreateCheckResponse, PingdomError> {
        self.record(Call::Create(params.clone()));
        if let Some(error) = self.create_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(CreateCheckResponse {
            check: CreatedCheck {
                id: self.next_id,
                name: params.get("name").cloned().unwrap_or_default(),
            },
        })
    }

    async fn read_check(&self, id: i64) -> Result<CheckResponse, PingdomError> {
        self.record(Call::Read(id));
        self.known(id)?;
        self.remote().ok_or_else(PingdomError::invalid_identifier)
    }

    async fn update_check(&self, id: i64, params: &RequestParams) -> Result<MessageResponse, PingdomError> {
        self.record(Call::Update(id, params.clone()));
        if let Some(error) = self.update_error.lock().unwrap().take() {
            return Err(error);
        }
        self.known(id)?;
        Ok(MessageResponse {
            message: "Modification of check was successful!".to_string(),
        })
    }

    async fn delete_check(&self, id: i64) -> Result<MessageResponse, PingdomError> {
        self.record(Call::Delete(id));
        if let Some(error) = self.delete_error.lock().unwrap().take() {
            return Err(error);
        }
        self.known(id)?;
        *self.remote.lock().unwrap() = None;
        Ok(MessageResponse {
            message: "Deletion of check was successful!".to_string(),
        })
    }
}

/// Hands out the shared [`FakePingdom`] for every pass
pub struct FakeFactory {
    pub api: Arc<FakePingdom>,
    pub created: AtomicUsize,
}

impl FakeFactory {
    pub fn new(api: Arc<FakePingdom>) -> Self {
        Self {
            api,
            created: AtomicUsize::new(0),
        }
    }
}

struct FakeHandle(Arc<FakePingdom>);

#[async_trait]
impl PingdomApi for FakeHandle {
    async fn create_check(&self, params: &RequestParams) -> Result<CreateCheckResponse, PingdomError> {
        self.0.create_check(params).await
    }

    async fn read_check(&self, id: i64) -> Result<CheckResponse, PingdomError> {
        self.0.read_check(id).await
    }

    async fn update_check(&self, id: i64, params: &RequestParams) -> Result<MessageResponse, PingdomError> {
        self.0.update_check(id, params).await
    }

    async fn delete_check(&self, id: i64) -> Result<MessageResponse, PingdomError> {
        self.0.delete_check(id).await
    }
}

impl ProviderFactory for FakeFactory {
    fn create(&self, credentials: PingdomCredentials) -> Result<Box<dyn PingdomApi>, PingdomError> {
        assert_eq!(credentials.user, "user@example.com");
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeHandle(Arc::clone(&self.api))))
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub credentials: Arc<StaticCredentials>,
    pub pingdom: Arc<FakePingdom>,
    pub factory: Arc<FakeFactory>,
    pub reconciler: Reconciler,
}

impl Harness {
    pub fn new(store: InMemoryStore, pingdom: FakePingdom) -> Self {
        Self::with_credentials(store, pingdom, StaticCredentials::valid())
    }

    pub fn with_credentials(
        store: InMemoryStore,
        pingdom: FakePingdom,
        credentials: StaticCredentials,
    ) -> Self {
        let store = Arc::new(store);
        let credentials = Arc::new(credentials);
        let pingdom = Arc::new(pingdom);
        let factory = Arc::new(FakeFactory::new(Arc::clone(&pingdom)));
        let reconciler = Reconciler::from_parts(
            Arc::clone(&store) as Arc<dyn CheckStore>,
            Arc::clone(&credentials) as Arc<dyn CredentialStore>,
            Arc::clone(&factory) as Arc<dyn ProviderFactory>,
            ControllerConfig::default(),
        );
        Self {
            store,
            credentials,
            pingdom,
            factory,
            reconciler,
        }
    }
}
