//! Persisted cooldown store behavior.

use chrono::{Duration, Utc};

use swarm_console::cooldown::CooldownStore;
use swarm_console_sdk::CooldownWindow;

use super::common::{cleanup_temp_dir, create_temp_dir};

#[test]
fn armed_window_survives_reload() {
    let dir = create_temp_dir("cooldown_reload");
    let path = dir.join("export_cooldown.json");

    let window = CooldownWindow::starting_now(Duration::hours(1));
    {
        let mut store = CooldownStore::open(path.clone()).unwrap();
        assert!(store.window().is_none());
        store.arm(window).unwrap();
    }

    // Fresh store on the same path sees the same window.
    let reopened = CooldownStore::open(path).unwrap();
    let restored = reopened.window().expect("window should persist");
    assert_eq!(restored.expires_at, window.expires_at);
    assert!(restored.is_active(Utc::now()));

    cleanup_temp_dir(&dir);
}

#[test]
fn expired_window_is_cleared_on_open() {
    let dir = create_temp_dir("cooldown_expired");
    let path = dir.join("export_cooldown.json");

    {
        let mut store = CooldownStore::open(path.clone()).unwrap();
        store
            .arm(CooldownWindow {
                expires_at: Utc::now() - Duration::minutes(5),
            })
            .unwrap();
    }

    let reopened = CooldownStore::open(path.clone()).unwrap();
    assert!(reopened.window().is_none());
    assert!(!path.exists(), "expired window file should be removed");

    cleanup_temp_dir(&dir);
}

#[test]
fn clear_removes_window_and_file() {
    let dir = create_temp_dir("cooldown_clear");
    let path = dir.join("export_cooldown.json");

    let mut store = CooldownStore::open(path.clone()).unwrap();
    store
        .arm(CooldownWindow::starting_now(Duration::hours(1)))
        .unwrap();
    assert!(path.exists());

    store.clear().unwrap();
    assert!(store.window().is_none());
    assert!(!path.exists());

    cleanup_temp_dir(&dir);
}

#[test]
fn corrupt_store_file_is_treated_as_no_window() {
    let dir = create_temp_dir("cooldown_corrupt");
    let path = dir.join("export_cooldown.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = CooldownStore::open(path).unwrap();
    assert!(store.window().is_none());

    cleanup_temp_dir(&dir);
}
