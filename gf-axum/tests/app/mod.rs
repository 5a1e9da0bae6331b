mod application;
pub use application::TestApp;

use axum_test::TestServer;
use gf_axum::{config::AxumConfig, router};
use gf_memory::MemoryDb;
use serde_json::Value;

/// A server over a fresh, empty store.
pub fn server() -> TestServer {
    let (router, _) = router(TestApp(MemoryDb::default()), AxumConfig::default());
    TestServer::new(router).unwrap()
}

/// A test token carrying `claims` verbatim.
pub fn token(claims: Value) -> String {
    urlencoding::encode(&claims.to_string()).into_owned()
}
