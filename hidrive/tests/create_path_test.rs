//! Tests for recursive directory creation.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hidrive::{Api, DirApi, Error, Parameters, Transport};
use reqwest::{Method, Request, Response};

/// A request as seen by the transport.
#[derive(Debug, Clone)]
struct Call {
    method: Method,
    params: Vec<(String, String)>,
}

impl Call {
    fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn summary(&self) -> String {
        format!("{} {}", self.method, self.param("path").unwrap_or_default())
    }
}

/// Answers requests from a fixed script and records them in order.
#[derive(Default)]
struct Scripted {
    replies: Mutex<VecDeque<(u16, String)>>,
    calls: Mutex<Vec<Call>>,
}

impl Scripted {
    fn new(replies: Vec<(u16, String)>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn summaries(&self) -> Vec<String> {
        self.calls().iter().map(Call::summary).collect()
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn execute(&self, request: Request) -> hidrive::Result<Response> {
        self.calls.lock().unwrap().push(Call {
            method: request.method().clone(),
            params: request.url().query_pairs().into_owned().collect(),
        });

        let (status, body) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request");
        Ok(http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into())
    }
}

fn reply(status: u16, body: &str) -> (u16, String) {
    (status, body.to_string())
}

fn not_found() -> (u16, String) {
    reply(404, r#"{"code":"404","msg":"Not Found"}"#)
}

fn exists(path: &str) -> (u16, String) {
    (200, format!(r#"{{"path":"{path}"}}"#))
}

fn dir_api(transport: &Arc<Scripted>) -> DirApi {
    DirApi::new(Api::new(transport.clone(), "http://hidrive.test/2.1"))
}

fn created(path: &str) -> (u16, String) {
    (201, format!(r#"{{"path":"{path}","type":"dir"}}"#))
}

#[tokio::test]
async fn creates_every_missing_ancestor_in_order() {
    let transport = Scripted::new(vec![
        not_found(),
        created("/public/a"),
        not_found(),
        created("/public/a/b"),
        created("/public/a/b/c"),
    ]);

    let obj = dir_api(&transport)
        .create_path(&Parameters::new().path("/public/a/b/c"))
        .await
        .unwrap();

    assert_eq!(obj.path, "/public/a/b/c");
    assert_eq!(
        transport.summaries(),
        vec![
            "GET /public/a",
            "POST /public/a",
            "GET /public/a/b",
            "POST /public/a/b",
            "POST /public/a/b/c",
        ]
    );
}

#[tokio::test]
async fn probes_ask_for_path_only() {
    let transport = Scripted::new(vec![exists("/public/a"), created("/public/a/b")]);

    dir_api(&transport)
        .create_path(&Parameters::new().path("/public/a/b"))
        .await
        .unwrap();

    let probe = &transport.calls()[0];
    assert_eq!(probe.method, Method::GET);
    assert_eq!(probe.param("members"), Some("none"));
    assert_eq!(probe.param("fields"), Some("path"));
}

#[tokio::test]
async fn existing_ancestors_are_not_recreated() {
    let transport = Scripted::new(vec![
        exists("/public/a"),
        exists("/public/a/b"),
        created("/public/a/b/c"),
    ]);

    dir_api(&transport)
        .create_path(&Parameters::new().path("/public/a/b/c"))
        .await
        .unwrap();

    assert_eq!(
        transport.summaries(),
        vec!["GET /public/a", "GET /public/a/b", "POST /public/a/b/c"]
    );
}

#[tokio::test]
async fn single_segment_creates_directly() {
    let transport = Scripted::new(vec![created("/public/x")]);

    let obj = dir_api(&transport)
        .create_path(&Parameters::new().path("/public/x"))
        .await
        .unwrap();

    assert_eq!(obj.path, "/public/x");
    assert_eq!(transport.summaries(), vec!["POST /public/x"]);
}

#[tokio::test]
async fn empty_path_fails_without_requests() {
    let transport = Scripted::new(vec![]);
    let dirs = dir_api(&transport);

    let err = dirs.create_path(&Parameters::new().path("")).await.unwrap_err();
    assert!(matches!(err, Error::MissingParameter("path")));

    let err = dirs.create_path(&Parameters::new()).await.unwrap_err();
    assert!(matches!(err, Error::MissingParameter("path")));

    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn failed_ancestor_create_aborts() {
    let transport = Scripted::new(vec![not_found(), reply(403, r#"{"code":"403","msg":"Forbidden"}"#)]);

    let err = dir_api(&transport)
        .create_path(&Parameters::new().path("/public/a/b/c"))
        .await
        .unwrap_err();

    let service = err.as_service().expect("service error");
    assert_eq!(service.status, 403);
    assert_eq!(service.code.as_str(), "403");
    assert_eq!(service.message, "Forbidden");
    assert_eq!(transport.summaries(), vec!["GET /public/a", "POST /public/a"]);
}

#[tokio::test]
async fn failed_leaf_create_is_returned() {
    let transport = Scripted::new(vec![
        exists("/public/a"),
        reply(409, r#"{"code":409,"msg":"Conflict"}"#),
    ]);

    let err = dir_api(&transport)
        .create_path(&Parameters::new().path("/public/a/b"))
        .await
        .unwrap_err();

    assert_eq!(err.as_service().unwrap().code.as_str(), "409");
}

#[tokio::test]
async fn extra_parameters_only_reach_the_leaf() {
    let transport = Scripted::new(vec![
        not_found(),
        created("/public/a"),
        created("/public/a/b"),
    ]);

    dir_api(&transport)
        .create_path(&Parameters::new().path("/public/a/b").on_exist("autoname"))
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls[1].params, vec![("path".to_string(), "/public/a".to_string())]);
    assert_eq!(calls[2].param("on_exist"), Some("autoname"));
}

mod against_server {
    use hidrive::{HiDriveClient, Parameters};
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn issues_two_probes_two_creates_and_one_leaf_create() {
        let mut server = Server::new_async().await;

        let probes = server
            .mock("GET", "/dir")
            .match_query(Matcher::UrlEncoded("members".into(), "none".into()))
            .with_status(404)
            .with_body(r#"{"code":"404","msg":"Not Found"}"#)
            .expect(2)
            .create_async()
            .await;

        let ancestor_creates = server
            .mock("POST", "/dir")
            .match_query(Matcher::Regex("path=%2Fpublic%2Fa(%2Fb)?$".into()))
            .with_status(201)
            .with_body(r#"{"path":"/public/a","type":"dir"}"#)
            .expect(2)
            .create_async()
            .await;

        let leaf_create = server
            .mock("POST", "/dir")
            .match_query(Matcher::UrlEncoded("path".into(), "/public/a/b/c".into()))
            .with_status(201)
            .with_body(r#"{"path":"/public/a/b/c","type":"dir","id":"b1.3"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = HiDriveClient::new(reqwest::Client::new(), &server.url());
        let obj = client
            .dir()
            .create_path(&Parameters::new().path("/public/a/b/c"))
            .await
            .unwrap();

        assert_eq!(obj.id, "b1.3");
        probes.assert_async().await;
        ancestor_creates.assert_async().await;
        leaf_create.assert_async().await;
    }
}
