use crate::e2e::helpers;

use helpers::assertions::{assert_mp3_download, assert_speech_created, filename_of};
use helpers::stub_tts::StubTtsRepository;
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use text_to_speech_api::domain::artifact::ArtifactId;
use text_to_speech_api::infrastructure::repositories::ArtifactRepository;

async fn create_speech(ctx: &TestContext, text: &str) -> String {
    let response = ctx
        .client
        .post("/api/text-to-speech", &json!({ "text": text, "language": "en" }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_speech_created(&response)
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_created_speech(ctx: &TestContext) {
    let file_url = create_speech(ctx, "hello").await;

    let response = ctx.client.get(&file_url).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_mp3_download(&response, filename_of(&file_url));
    assert_eq!(
        response.body_bytes,
        StubTtsRepository::audio_for("hello", "en")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_the_same_artifact_repeatedly(ctx: &TestContext) {
    let file_url = create_speech(ctx, "again").await;

    for _ in 0..3 {
        let response = ctx.client.get(&file_url).await.unwrap();
        response.assert_status(StatusCode::OK);
        assert_eq!(
            response.body_bytes,
            StubTtsRepository::audio_for("again", "en")
        );
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_file(ctx: &TestContext) {
    let filename = ArtifactId::generate().filename();

    let response = ctx
        .client
        .get(&format!("/download/{}", filename))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error("File not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_after_removal(ctx: &TestContext) {
    let file_url = create_speech(ctx, "short lived").await;
    let id = ArtifactId::from_filename(filename_of(&file_url)).unwrap();

    ctx.artifact_repo.remove(&id).await.unwrap();
    ctx.artifact_repo.remove(&id).await.unwrap();

    ctx.client
        .get(&file_url)
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error("File not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_serve_files_outside_storage(ctx: &TestContext) {
    std::fs::write(ctx.storage_dir().join("notes.txt"), b"private").unwrap();

    for path in [
        "/download/notes.txt",
        "/download/..%2F..%2Fetc%2Fpasswd",
        "/download/..%2Fuploads.mp3",
        "/download/.hidden.mp3",
    ] {
        ctx.client
            .get(path)
            .await
            .unwrap()
            .assert_status(StatusCode::NOT_FOUND);
    }
}
