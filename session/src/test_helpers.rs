//! Fakes shared by the unit tests: a scripted transport and a store that can
//! be told to reject writes.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use protocol::{AuthResult, LoginRequest, PasswordChangeRequest, ProfileUpdateRequest, StatusResponse, UserProfile};

use crate::api::{ApiError, AuthApi};
use crate::auth::AuthClient;
use crate::store::{KeyValueStore, MemoryStore, StorageError};

#[must_use]
pub fn admin_user() -> UserProfile {
    UserProfile {
        id: Some(1),
        username: "admin".to_owned(),
        full_name: "Admin User".to_owned(),
        email: "admin@catering.com".to_owned(),
        role: "ADMIN".to_owned(),
        created_at: None,
    }
}

#[must_use]
pub fn staff_user() -> UserProfile {
    UserProfile {
        id: Some(2),
        username: "chef".to_owned(),
        full_name: "Head Chef".to_owned(),
        email: "chef@catering.com".to_owned(),
        role: "STAFF".to_owned(),
        created_at: None,
    }
}

#[must_use]
pub fn network_down() -> ApiError {
    ApiError::Network("connection refused".to_owned())
}

/// One scripted server reply, consumed in order.
#[derive(Debug)]
pub enum Reply {
    Auth(Result<AuthResult, ApiError>),
    Status(Result<StatusResponse, ApiError>),
    Logout(Result<(), ApiError>),
}

/// Transport fake: replays [`Reply`] values and records every endpoint hit.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    replies: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<&'static str>>,
    last_login: RefCell<Option<LoginRequest>>,
}

impl ScriptedApi {
    #[must_use]
    pub fn new(replies: Vec<Reply>) -> Self {
        Self { replies: RefCell::new(replies.into()), ..Self::default() }
    }

    pub fn push(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(reply);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn last_login(&self) -> Option<LoginRequest> {
        self.last_login.borrow().clone()
    }

    /// Next scripted reply. Running off the script or a reply of the wrong
    /// kind surfaces as a decode error so the test fails on its assertions.
    fn next(&self, endpoint: &'static str) -> Reply {
        self.calls.borrow_mut().push(endpoint);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Reply::Auth(Err(ApiError::Decode(format!("unscripted call to {endpoint}")))))
    }

    fn next_auth(&self, endpoint: &'static str) -> Result<AuthResult, ApiError> {
        match self.next(endpoint) {
            Reply::Auth(reply) => reply,
            other => Err(mismatch(endpoint, &other)),
        }
    }
}

fn mismatch(endpoint: &str, reply: &Reply) -> ApiError {
    ApiError::Decode(format!("{endpoint} got a mismatched reply: {reply:?}"))
}

#[async_trait::async_trait(?Send)]
impl AuthApi for ScriptedApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResult, ApiError> {
        *self.last_login.borrow_mut() = Some(request.clone());
        self.next_auth("login")
    }

    async fn logout(&self) -> Result<(), ApiError> {
        match self.next("logout") {
            Reply::Logout(reply) => reply,
            other => Err(mismatch("logout", &other)),
        }
    }

    async fn status(&self) -> Result<StatusResponse, ApiError> {
        match self.next("status") {
            Reply::Status(reply) => reply,
            other => Err(mismatch("status", &other)),
        }
    }

    async fn profile(&self) -> Result<AuthResult, ApiError> {
        self.next_auth("profile")
    }

    async fn update_profile(&self, _request: &ProfileUpdateRequest) -> Result<AuthResult, ApiError> {
        self.next_auth("update_profile")
    }

    async fn change_password(&self, _request: &PasswordChangeRequest) -> Result<AuthResult, ApiError> {
        self.next_auth("change_password")
    }
}

/// Memory store whose writes to selected keys fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: Mutex<HashSet<String>>,
    failing_removes: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub fn fail_writes_to(&self, key: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned());
    }

    /// Only removals of `key` fail; sets still succeed.
    pub fn fail_removes_of(&self, key: &str) {
        self.failing_removes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned());
    }

    pub fn heal(&self) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.failing_removes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn check(set: &Mutex<HashSet<String>>, key: &str) -> Result<(), StorageError> {
        let failing = set.lock().unwrap_or_else(PoisonError::into_inner);
        if failing.contains(key) {
            return Err(StorageError::Write { key: key.to_owned(), reason: "quota exceeded".to_owned() });
        }
        Ok(())
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::check(&self.failing, key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::check(&self.failing, key)?;
        Self::check(&self.failing_removes, key)?;
        self.inner.remove(key)
    }
}

pub type TestClient = AuthClient<ScriptedApi, Arc<MemoryStore>>;

/// Auth client over a scripted transport and a shared memory store.
#[must_use]
pub fn client(replies: Vec<Reply>) -> (TestClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (AuthClient::new(ScriptedApi::new(replies), Arc::clone(&store)), store)
}
