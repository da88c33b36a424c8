//! End-to-end tests for the host wiring: stylesheets on disk and the
//! channel feed driving the demo functions.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::PathBuf;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use dynamo_application::{ApplicationError, Engine, EngineConfig, SourceError};
use dynamo_host::functions::{BLURPLE, register_defaults};
use dynamo_infrastructure::{AppConfig, StyleFeed};

fn sorted(mut values: Vec<(String, String)>) -> Vec<(String, String)> {
    values.sort();
    values
}

fn pair(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

#[tokio::test]
async fn test_run_resolves_demo_variables() {
    let dir = tempdir().expect("Failed to create temp directory");
    tokio::fs::write(
        dir.path().join("site.css"),
        ".brand { color: var(--blurple); background: var(--color_hex--ff0000, red) }\n\
         .muted { border-color: var(--color_hex--zz); outline-color: var(--color_hex--0f0) }",
    )
    .await
    .unwrap();
    tokio::fs::write(dir.path().join("extra.css"), ".x { color: var( --unrelated ) }")
        .await
        .unwrap();

    let values = dynamo_host::run(&AppConfig::default(), &[dir.path().to_path_buf()])
        .await
        .expect("Failed to resolve stylesheets");

    assert_eq!(
        sorted(values),
        vec![
            pair("--blurple", BLURPLE),
            pair("--color_hex--0f0", "#0f0"),
            pair("--color_hex--ff0000", "#ff0000"),
        ]
    );
}

#[tokio::test]
async fn test_run_with_no_references() {
    let dir = tempdir().unwrap();
    let sheet = dir.path().join("plain.css");
    tokio::fs::write(&sheet, "body { margin: 0 }")
        .await
        .unwrap();

    let values = dynamo_host::run(&AppConfig::default(), &[sheet])
        .await
        .unwrap();
    assert!(values.is_empty());
}

#[tokio::test]
async fn test_run_missing_path_fails() {
    let dir = tempdir().unwrap();
    let missing: PathBuf = dir.path().join("gone.css");

    let err = dynamo_host::run(&AppConfig::default(), &[missing.clone()])
        .await
        .unwrap_err();

    match err {
        ApplicationError::Source(SourceError::NotFound(path)) => assert_eq!(path, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_feed_drives_demo_functions() {
    let engine = Arc::new(Engine::in_memory(EngineConfig::default()).unwrap());
    register_defaults(&engine).unwrap();

    let (feed, forwarder) = StyleFeed::spawn(Arc::clone(&engine), 8);
    feed.send(".a { color: var(--blurple) }").await.unwrap();
    feed.send(vec![".b { color: var(--color_hex--abcd) }", ".c { color: var(--blurple) }"])
        .await
        .unwrap();
    drop(feed);

    assert_eq!(forwarder.await.unwrap(), 2);
    engine.wait_idle().await;

    assert_eq!(engine.value_of("--blurple").as_deref(), Some(BLURPLE));
    assert_eq!(engine.value_of("--color_hex--abcd").as_deref(), Some("#abcd"));
    assert_eq!(engine.known_variables(), vec!["--color_hex--abcd", "--blurple"]);
}

#[tokio::test]
async fn test_functions_registered_after_discovery_catch_up() {
    let engine = Engine::in_memory(EngineConfig::default()).unwrap();
    engine.extract("a { color: var(--blurple) } b { color: var(--color_hex--123456) }");
    engine.wait_idle().await;
    assert_eq!(engine.value_of("--blurple"), None);

    let handles = register_defaults(&engine).unwrap();
    engine.wait_idle().await;

    assert_eq!(engine.value_of("--blurple").as_deref(), Some(BLURPLE));
    assert_eq!(engine.value_of("--color_hex--123456").as_deref(), Some("#123456"));
    for handle in handles {
        assert_eq!(handle.executed_variables().len(), 2, "{}", handle.id());
    }
}
