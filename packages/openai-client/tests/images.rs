//! HTTP-level tests for image generation against a mock server.

use mockito::{Matcher, Server};
use openai_client::{ImageGenerationRequest, OpenAIClient, OpenAIError};
use serde_json::json;

#[tokio::test]
async fn test_generate_images_posts_request_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/images/generations")
        .match_header("authorization", "Bearer sk-test")
        .match_header("openai-organization", "org-42")
        .match_body(Matcher::Json(json!({
            "model": "dall-e-3",
            "prompt": "a pixel art dog",
            "n": 1,
            "size": "1024x1024",
            "quality": "hd"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"created": 1700000000, "data": [{"url": "https://example.com/dog.png"}]}"#)
        .create_async()
        .await;

    let client = OpenAIClient::new("sk-test")
        .with_base_url(server.url())
        .with_organization("org-42");

    let response = client
        .generate_images(
            &ImageGenerationRequest::new("dall-e-3", "a pixel art dog")
                .n(1)
                .size("1024x1024")
                .quality("hd"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.urls().collect::<Vec<_>>(), vec!["https://example.com/dog.png"]);
}

#[tokio::test]
async fn test_generate_images_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/images/generations")
        .with_status(400)
        .with_body(r#"{"error": {"message": "Your request was rejected by the safety system"}}"#)
        .create_async()
        .await;

    let client = OpenAIClient::new("sk-test").with_base_url(server.url());
    let err = client
        .generate_images(&ImageGenerationRequest::new("dall-e-2", "something"))
        .await
        .unwrap_err();

    match err {
        OpenAIError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("safety system"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
