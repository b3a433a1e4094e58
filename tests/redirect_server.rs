//! End-to-end tests over a real TCP listener.

use std::collections::HashMap;
use std::fs;

use reqwest::header::LOCATION;
use reqwest::StatusCode;
use urlshort::config::{load_config, load_redirects};
use urlshort::{LookupTable, ServerConfig};

mod common;

fn gophercises_paths() -> HashMap<String, String> {
    let mut paths = HashMap::new();
    paths.insert(
        "/urlshort-godoc".to_string(),
        "https://godoc.org/github.com/gophercises/urlshort".to_string(),
    );
    paths.insert(
        "/yaml-godoc".to_string(),
        "https://godoc.org/gopkg.in/yaml.v2".to_string(),
    );
    paths
}

#[tokio::test]
async fn test_redirects_from_yaml_document() {
    let yaml = b"
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";
    let document = LookupTable::from_yaml(yaml).unwrap();
    let server = common::start_server(ServerConfig::default(), document).await;
    let client = common::client();

    let res = client.get(server.url("/urlshort")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()[LOCATION], "https://github.com/gophercises/urlshort");

    let res = client.get(server.url("/urlshort-final")).send().await.unwrap();
    assert_eq!(
        res.headers()[LOCATION],
        "https://github.com/gophercises/urlshort/tree/solution"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_unmatched_path_gets_fallback_only() {
    let mut config = ServerConfig::default();
    config.paths = gophercises_paths();
    config.fallback.status = 200;
    config.fallback.body = "Hello, world!".into();

    let server = common::start_server(config, LookupTable::new()).await;
    let client = common::client();

    let res = client.get(server.url("/not-mapped")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(LOCATION).is_none());
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "Hello, world!");

    // Trailing slash and case are not normalized
    for path in ["/yaml-godoc/", "/YAML-GODOC"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }

    let res = client.get(server.url("/yaml-godoc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()[LOCATION], "https://godoc.org/gopkg.in/yaml.v2");

    server.stop().await;
}

#[tokio::test]
async fn test_default_fallback_is_not_found() {
    let server = common::start_server(ServerConfig::default(), LookupTable::new()).await;
    let res = common::client().get(server.url("/anything")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Not Found");
}

#[tokio::test]
async fn test_config_file_with_json_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("redirects.json"),
        r#"[{"path": "/docs", "url": "https://docs.rs/urlshort"},
            {"path": "/inline", "url": "https://json/inline"}]"#,
    )
    .unwrap();
    let config_path = dir.path().join("urlshort.toml");
    fs::write(
        &config_path,
        r#"
        [redirects]
        file = "redirects.json"

        [paths]
        "/inline" = "https://toml/inline"
        "/toml" = "https://toml/only"

        [fallback]
        status = 410
        body = "Gone"
        "#,
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let document = load_redirects(&config.redirects, dir.path()).unwrap();
    let server = common::start_server(config, document).await;
    let client = common::client();

    let res = client.get(server.url("/docs")).send().await.unwrap();
    assert_eq!(res.headers()[LOCATION], "https://docs.rs/urlshort");

    // Document entries shadow inline ones
    let res = client.get(server.url("/inline")).send().await.unwrap();
    assert_eq!(res.headers()[LOCATION], "https://json/inline");

    let res = client.get(server.url("/toml")).send().await.unwrap();
    assert_eq!(res.headers()[LOCATION], "https://toml/only");

    let res = client.get(server.url("/missing")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::GONE);
    assert_eq!(res.text().await.unwrap(), "Gone");

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_requests_share_table() {
    let document = LookupTable::from_map(gophercises_paths());
    let server = common::start_server(ServerConfig::default(), document).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        let url = if i % 2 == 0 {
            server.url("/urlshort-godoc")
        } else {
            server.url(&format!("/miss-{i}"))
        };
        tasks.push(tokio::spawn(async move {
            client.get(url).send().await.unwrap().status()
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        let status = task.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        } else {
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    server.stop().await;
}
