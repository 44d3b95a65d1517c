#![allow(missing_docs)]

use axum_test::TestServer;
use tempfile::TempDir;

use crate::{AppState, build_router, store::RecordStore};

/// Create a test server backed by an empty data directory.
///
/// The directory is removed when the returned [TempDir] is dropped, so keep it alive
/// for the duration of the test.
pub(crate) fn must_create_test_server() -> (TempDir, TestServer) {
    let temp_dir = TempDir::new().expect("Could not create temp directory.");
    let state = AppState::new(RecordStore::new(temp_dir.path()), "Etc/UTC")
        .expect("Could not create app state.");
    let server = TestServer::new(build_router(state));

    (temp_dir, server)
}
