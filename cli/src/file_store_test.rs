use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique path under the system temp dir; removed on drop.
struct TempPath(PathBuf);

impl TempPath {
    fn new(name: &str) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("catering-cli-test-{}-{n}", std::process::id()));
        Self(dir.join(name))
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        if let Some(dir) = self.0.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}

#[test]
fn missing_file_reads_as_empty() {
    let tmp = TempPath::new("state.json");
    let store = FileStore::new(&tmp.0);
    assert_eq!(store.get("authenticated").unwrap(), None);
    assert!(!tmp.0.exists());
}

#[test]
fn set_creates_parent_dirs_and_persists() {
    let tmp = TempPath::new("state.json");
    FileStore::new(&tmp.0).set("authenticated", "true").unwrap();

    let reopened = FileStore::new(&tmp.0);
    assert_eq!(reopened.get("authenticated").unwrap().as_deref(), Some("true"));
}

#[test]
fn remove_deletes_only_that_key() {
    let tmp = TempPath::new("state.json");
    let store = FileStore::new(&tmp.0);
    store.set("authenticated", "true").unwrap();
    store.set("user", "{}").unwrap();

    store.remove("authenticated").unwrap();
    assert_eq!(store.get("authenticated").unwrap(), None);
    assert_eq!(store.get("user").unwrap().as_deref(), Some("{}"));
}

#[test]
fn remove_missing_key_does_not_create_file() {
    let tmp = TempPath::new("state.json");
    FileStore::new(&tmp.0).remove("user").unwrap();
    assert!(!tmp.0.exists());
}

#[test]
fn corrupt_file_reads_as_signed_out_and_is_replaced_on_login() {
    use session::session::{Session, SessionStore};

    let tmp = TempPath::new("state.json");
    fs::create_dir_all(tmp.0.parent().unwrap()).unwrap();
    fs::write(&tmp.0, "not json").unwrap();

    let store = FileStore::new(&tmp.0);
    assert_eq!(store.get("user").unwrap(), None);
    store.remove("user").unwrap();

    let sessions = SessionStore::new(store);
    assert_eq!(sessions.read(), Session::default());

    sessions.write(&Session::signed_in(None));
    assert!(sessions.read().authenticated);
    let rewritten: BTreeMap<String, String> = serde_json::from_str(&fs::read_to_string(&tmp.0).unwrap()).unwrap();
    assert_eq!(rewritten.get("authenticated").map(String::as_str), Some("true"));

    sessions.clear();
    assert_eq!(sessions.read(), Session::default());
}

#[test]
fn drives_session_store_round_trip() {
    use protocol::UserProfile;
    use session::session::SessionStore;

    let tmp = TempPath::new("state.json");
    let sessions = SessionStore::new(FileStore::new(&tmp.0));
    let user = UserProfile {
        id: Some(1),
        username: "admin".into(),
        full_name: "System Administrator".into(),
        email: "admin@catering.com".into(),
        role: "ADMIN".into(),
        created_at: None,
    };
    sessions.write(&session::session::Session::signed_in(Some(user.clone())));

    let reopened = SessionStore::new(FileStore::new(&tmp.0));
    assert_eq!(reopened.read().user, Some(user));
}
