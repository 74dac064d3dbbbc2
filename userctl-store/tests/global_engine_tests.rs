//! Process-wide engine. Lives in its own test binary so the global is not
//! shared with other tests.

use userctl_store::{Engine, NewUser, StoreConfig, UserRepo};

#[tokio::test]
async fn init_global_connects_once() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("global.db").display());
    let config = StoreConfig::new(url).unwrap();

    let engine = Engine::init_global(&config).await.unwrap();
    engine.initialize_schema().await.unwrap();

    // Later calls hand back the installed engine, whatever config they pass.
    let other = StoreConfig::new("postgres://unreachable.invalid/users").unwrap();
    let again = Engine::init_global(&other).await.unwrap();
    assert!(std::ptr::eq(engine, again));

    let from_env = Engine::global().await.unwrap();
    assert!(std::ptr::eq(engine, from_env));

    let mut session = from_env.acquire_session().await.unwrap();
    UserRepo::new(&mut session)
        .add(NewUser::new("global"))
        .await
        .unwrap();
    assert!(UserRepo::new(&mut session)
        .get("global")
        .await
        .unwrap()
        .is_some());
}
