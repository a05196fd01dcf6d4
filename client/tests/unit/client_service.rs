//! Tests for the `Client` facade with mocked ports.
//!
//! Every operation must route through `AppGuidCache::try_with_refresh` and
//! surface errors from the cache, the token provider and the platform call.

#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cf_automator_client::Client;
use cf_automator_client::domain::{HeaderOption, Process, RequestHeaders, TaskConfig};

use crate::mocks::{MockAppGuidCache, MockCapi, MockOauth, app};

type TestClient = Client<MockOauth, MockCapi, MockAppGuidCache>;

fn client(capi: MockCapi, cache: MockAppGuidCache) -> TestClient {
    Client::new(MockOauth::default(), capi, cache)
}

fn named_app() -> MockCapi {
    MockCapi::with_apps(vec![app("app-guid", "app-name")])
}

fn unnamed_app() -> MockCapi {
    MockCapi {
        process: Process {
            instances: 2,
            ..Process::default()
        },
        ..MockCapi::with_apps(vec![app("app-guid", "")])
    }
}

// ── scale() ───────────────────────────────────────────────────────────────────

#[test]
fn scale_uses_try_with_refresh() {
    let c = client(named_app(), MockAppGuidCache::default());

    c.scale("app-name", 1).expect("scale succeeds");

    assert!(c.app_guid_cache.was_called());
}

#[test]
fn scale_targets_web_process_with_resolved_guid() {
    let c = client(named_app(), MockAppGuidCache::default());

    c.scale("app-name", 3).expect("scale succeeds");

    assert_eq!(
        *c.capi.scaled.lock().expect("lock"),
        vec![("web".to_string(), 3)]
    );
    let calls = c.capi.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].app_guid, "app-guid");
    assert_eq!(calls[0].token, "bearer token");
}

#[test]
fn scale_errors_when_try_with_refresh_fails() {
    let c = client(unnamed_app(), MockAppGuidCache::failing("expected"));
    assert!(c.scale("lemons", 2).is_err());
}

#[test]
fn scale_errors_when_scale_fails() {
    let capi = MockCapi {
        scale_err: Some("expected".to_string()),
        ..unnamed_app()
    };
    let c = client(capi, MockAppGuidCache::default());

    let err = c.scale("lemons", 2).expect_err("scale fails");
    assert_eq!(err.to_string(), "expected");
}

// ── process() ─────────────────────────────────────────────────────────────────

#[test]
fn process_uses_try_with_refresh() {
    let c = client(named_app(), MockAppGuidCache::default());

    c.process("app-name", "web").expect("process succeeds");

    assert!(c.app_guid_cache.was_called());
}

#[test]
fn process_returns_platform_record_unchanged() {
    let c = client(unnamed_app(), MockAppGuidCache::default());

    let process = c.process("app-name", "web").expect("process succeeds");

    assert_eq!(process, c.capi.process);
    assert_eq!(process.instances, 2);
}

#[test]
fn process_errors_when_try_with_refresh_fails() {
    let c = client(unnamed_app(), MockAppGuidCache::failing("expected"));
    assert!(c.process("lemons", "web").is_err());
}

#[test]
fn process_errors_when_process_fails() {
    let capi = MockCapi {
        process_err: Some("expected".to_string()),
        ..unnamed_app()
    };
    let c = client(capi, MockAppGuidCache::default());
    assert!(c.process("lemons", "web").is_err());
}

// ── create_task() ─────────────────────────────────────────────────────────────

#[test]
fn create_task_uses_try_with_refresh() {
    let c = client(named_app(), MockAppGuidCache::default());

    let task = c
        .create_task("app-name", "echo test", TaskConfig::default(), &[])
        .expect("task created");

    assert!(c.app_guid_cache.was_called());
    assert_eq!(task.guid, "task-guid");
}

#[test]
fn create_task_sets_a_reasonable_task_name_if_not_provided() {
    let c = client(unnamed_app(), MockAppGuidCache::default());

    c.create_task(
        "app-guid",
        "echo test",
        TaskConfig {
            disk_in_mb: 10,
            memory_in_mb: 10,
            droplet_guid: "droplet-guid".to_string(),
            ..TaskConfig::default()
        },
        &[],
    )
    .expect("task created");

    let cfg = c.capi.forwarded_task_cfg().expect("config forwarded");
    assert_eq!(cfg.name, "echo test");
    assert_eq!(cfg.disk_in_mb, 10);
    assert_eq!(cfg.memory_in_mb, 10);
    assert_eq!(cfg.droplet_guid, "droplet-guid");
}

#[test]
fn create_task_keeps_a_provided_name() {
    let c = client(unnamed_app(), MockAppGuidCache::default());

    c.create_task(
        "app-guid",
        "echo test",
        TaskConfig {
            name: "nightly-report".to_string(),
            ..TaskConfig::default()
        },
        &[],
    )
    .expect("task created");

    let cfg = c.capi.forwarded_task_cfg().expect("config forwarded");
    assert_eq!(cfg.name, "nightly-report");
}

#[test]
fn create_task_passes_on_header_options() {
    let c = client(unnamed_app(), MockAppGuidCache::default());
    let used = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&used);
    let opts: Vec<HeaderOption> = vec![
        Box::new(move |headers: &mut RequestHeaders| {
            flag.store(true, Ordering::SeqCst);
            headers.set("X-Correlation-Id", "abc-123");
        }),
        Box::new(|headers: &mut RequestHeaders| headers.set("X-Request-Source", "automator")),
    ];

    c.create_task("app-guid", "echo test", TaskConfig::default(), &opts)
        .expect("task created");

    assert!(used.load(Ordering::SeqCst));
    let headers = c
        .capi
        .task_headers
        .lock()
        .expect("lock")
        .clone()
        .expect("headers recorded");
    assert_eq!(headers.get("x-correlation-id"), Some("abc-123"));
    assert_eq!(headers.get("x-request-source"), Some("automator"));
}

#[test]
fn create_task_errors_when_try_with_refresh_fails() {
    let c = client(unnamed_app(), MockAppGuidCache::failing("expected"));
    assert!(
        c.create_task("lemons", "command", TaskConfig::default(), &[])
            .is_err()
    );
}

#[test]
fn create_task_errors_when_create_task_fails() {
    let capi = MockCapi {
        task_err: Some("expected".to_string()),
        ..unnamed_app()
    };
    let c = client(capi, MockAppGuidCache::default());
    assert!(
        c.create_task("lemons", "command", TaskConfig::default(), &[])
            .is_err()
    );
}

// ── stop() ────────────────────────────────────────────────────────────────────

#[test]
fn stop_stops_the_app() {
    let c = client(named_app(), MockAppGuidCache::default());

    c.stop("app-name").expect("stop succeeds");

    assert!(c.app_guid_cache.was_called());
    let calls = c.capi.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].op, "stop");
    assert_eq!(calls[0].app_guid, "app-guid");
}

#[test]
fn stop_errors_when_try_with_refresh_fails() {
    let c = client(unnamed_app(), MockAppGuidCache::failing("expected"));
    assert!(c.stop("lemons").is_err());
}

#[test]
fn stop_errors_when_stop_fails() {
    let capi = MockCapi {
        stop_err: Some("expected".to_string()),
        ..unnamed_app()
    };
    let c = client(capi, MockAppGuidCache::default());
    assert!(c.stop("lemons").is_err());
}

// ── token acquisition ─────────────────────────────────────────────────────────

#[test]
fn token_failure_skips_platform_call() {
    let c = Client::new(
        MockOauth {
            err: Some("uaa unavailable".to_string()),
        },
        named_app(),
        MockAppGuidCache::default(),
    );

    let err = c.stop("app-name").expect_err("token fails");

    assert_eq!(err.to_string(), "uaa unavailable");
    assert!(c.capi.calls().is_empty());
}
