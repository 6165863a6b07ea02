use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_supported_languages(ctx: &TestContext) {
    let response = ctx.client.get("/api/languages").await.unwrap();

    response.assert_status(StatusCode::OK);
    let languages = response
        .body
        .as_ref()
        .and_then(|b| b.as_object())
        .expect("Expected a JSON object");

    assert_eq!(languages.len(), 50);
    assert_eq!(languages.get("en").and_then(|v| v.as_str()), Some("English"));
    assert_eq!(
        languages.get("zh-tw").and_then(|v| v.as_str()),
        Some("Chinese (Mandarin/Taiwan)")
    );
    assert!(languages.values().all(|name| name.is_string()));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_the_same_catalog_every_time(ctx: &TestContext) {
    let first = ctx.client.get("/api/languages").await.unwrap();
    let second = ctx.client.get("/api/languages").await.unwrap();

    assert_eq!(first.body_bytes, second.body_bytes);
}
