use super::request_executor::{build_forward_headers, host_header_value, normalize_accept};
use super::UpstreamClient;
use crate::proxy::common::header_constants::{
    DOCKER_MANIFEST_V2, OCI_IMAGE_INDEX, OCI_IMAGE_MANIFEST,
};
use crate::proxy::context::RequestContext;
use axum::http::{header, HeaderMap, HeaderValue, Method};
use bytes::Bytes;
use hubgate_types::GatewayError;
use url::Url;
use wiremock::matchers::{body_string, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(method: Method, headers: HeaderMap, body: &'static str) -> RequestContext {
    RequestContext {
        method,
        host: "hub.example.com".to_string(),
        path: "/v2/library/alpine/manifests/3.19".to_string(),
        query: None,
        headers,
        body: Bytes::from_static(body.as_bytes()),
    }
}

#[test]
fn test_normalize_accept_empty_gets_full_list() {
    let expected = format!("{}, {}, {}", DOCKER_MANIFEST_V2, OCI_IMAGE_INDEX, OCI_IMAGE_MANIFEST);
    assert_eq!(normalize_accept(None), expected);
    assert_eq!(normalize_accept(Some("")), expected);
    assert_eq!(normalize_accept(Some("  ")), expected);
}

#[test]
fn test_normalize_accept_with_oci_index_unchanged() {
    let accept = format!("{}, application/json", OCI_IMAGE_INDEX);
    assert_eq!(normalize_accept(Some(&accept)), accept);
}

#[test]
fn test_normalize_accept_appends_missing_types() {
    let normalized = normalize_accept(Some(DOCKER_MANIFEST_V2));
    assert_eq!(
        normalized,
        format!("{}, {}, {}", DOCKER_MANIFEST_V2, OCI_IMAGE_INDEX, OCI_IMAGE_MANIFEST)
    );

    let normalized = normalize_accept(Some("application/json"));
    assert!(normalized.starts_with("application/json, "));
    for media_type in [DOCKER_MANIFEST_V2, OCI_IMAGE_INDEX, OCI_IMAGE_MANIFEST] {
        assert!(normalized.contains(media_type), "missing {}", media_type);
    }
}

#[test]
fn test_host_header_value() {
    let url = Url::parse("https://registry-1.docker.io/v2/").unwrap();
    assert_eq!(host_header_value(&url).unwrap(), "registry-1.docker.io");

    let url = Url::parse("http://127.0.0.1:5000/v2/").unwrap();
    assert_eq!(host_header_value(&url).unwrap(), "127.0.0.1:5000");

    let url = Url::parse("https://ghcr.io:443/v2/").unwrap();
    assert_eq!(host_header_value(&url).unwrap(), "ghcr.io");
}

#[test]
fn test_forward_headers_policy() {
    let mut inbound = HeaderMap::new();
    inbound.insert(header::USER_AGENT, HeaderValue::from_static("docker/24.0.7"));
    inbound.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
    inbound.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    inbound.insert(header::COOKIE, HeaderValue::from_static("session=1"));
    inbound.insert(header::HOST, HeaderValue::from_static("hub.example.com"));
    let ctx = context(Method::GET, inbound, "");
    let url = Url::parse("https://registry-1.docker.io/v2/library/alpine/manifests/3.19").unwrap();

    let headers = build_forward_headers(&ctx, &url);

    assert_eq!(headers[header::HOST], "registry-1.docker.io");
    assert_eq!(headers[header::USER_AGENT], "docker/24.0.7");
    assert_eq!(headers[header::ACCEPT_ENCODING], "gzip");
    assert_eq!(headers[header::AUTHORIZATION], "Bearer abc");
    assert_eq!(headers[header::CONNECTION], "keep-alive");
    assert_eq!(headers[header::CACHE_CONTROL], "max-age=0");
    assert!(headers[header::ACCEPT].to_str().unwrap().contains(OCI_IMAGE_INDEX));
    assert!(!headers.contains_key(header::COOKIE));
    assert!(!headers.contains_key("x-amz-content-sha256"));
}

#[test]
fn test_forward_headers_carry_upload_credentials() {
    let digest = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    let mut inbound = HeaderMap::new();
    inbound.insert("x-amz-content-sha256", HeaderValue::from_static(digest));
    inbound.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
    let ctx = context(Method::PUT, inbound, "layer");
    let url = Url::parse("https://registry-1.docker.io/v2/library/alpine/blobs/uploads/u1").unwrap();

    let headers = build_forward_headers(&ctx, &url);

    assert_eq!(headers["x-amz-content-sha256"], digest);
    assert_eq!(headers.get_all("x-amz-content-sha256").iter().count(), 1);
    assert_eq!(headers[header::CONTENT_TYPE], "application/octet-stream");
}

#[test]
fn test_forward_headers_merge_multiple_accept_values() {
    let mut inbound = HeaderMap::new();
    inbound.append(header::ACCEPT, HeaderValue::from_static(DOCKER_MANIFEST_V2));
    inbound.append(header::ACCEPT, HeaderValue::from_static(OCI_IMAGE_INDEX));
    let ctx = context(Method::GET, inbound, "");
    let url = Url::parse("https://ghcr.io/v2/").unwrap();

    let headers = build_forward_headers(&ctx, &url);
    assert_eq!(
        headers[header::ACCEPT],
        format!("{}, {}", DOCKER_MANIFEST_V2, OCI_IMAGE_INDEX).as_str()
    );
}

#[tokio::test]
async fn test_forward_replays_method_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/library/alpine/manifests/3.19"))
        .and(header_eq("authorization", "Bearer abc"))
        .and(header_eq("cache-control", "max-age=0"))
        .and(body_string("{\"schemaVersion\":2}"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut inbound = HeaderMap::new();
    inbound.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    let ctx = context(Method::PUT, inbound, "{\"schemaVersion\":2}");
    let url = Url::parse(&format!("{}/v2/library/alpine/manifests/3.19", server.uri())).unwrap();

    let client = UpstreamClient::new(reqwest::Client::new());
    let response = client.forward(&ctx, &url).await.unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let client = UpstreamClient::new(reqwest::Client::new());
    let url = Url::parse("http://127.0.0.1:1/v2/").unwrap();

    let err = client.fetch(&url).await.unwrap_err();
    match err {
        GatewayError::UpstreamUnreachable { upstream, .. } => assert_eq!(upstream, "127.0.0.1"),
        other => panic!("expected UpstreamUnreachable, got {:?}", other),
    }
}
