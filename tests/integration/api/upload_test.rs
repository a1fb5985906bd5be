//! Image upload integration tests

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;

use plaza::backend::upload::handlers::MAX_IMAGE_BYTES;

use crate::common::{assert_error, register_user, spawn_app};

const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn image_form(bytes: Vec<u8>, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part("image", Part::bytes(bytes).file_name("cat.png").mime_type(mime))
}

#[tokio::test]
async fn test_upload_stores_and_serves_image() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;

    let response = app
        .server
        .post("/api/upload")
        .authorization_bearer(&alice.token)
        .multipart(image_form(PNG_HEADER.to_vec(), "image/png"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    let filename = body["filename"].as_str().unwrap().to_string();
    assert!(filename.starts_with("image-"));
    assert!(filename.ends_with(".png"));
    assert_eq!(
        body["imageUrl"],
        format!("http://localhost:4000/uploads/{}", filename)
    );
    assert!(app.uploads.path().join(&filename).exists());

    let served = app.server.get(&format!("/uploads/{}", filename)).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert_eq!(served.header("cache-control"), "public, max-age=86400");
    assert_eq!(served.as_bytes().as_ref(), PNG_HEADER);
}

#[tokio::test]
async fn test_upload_rejections() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;

    let anonymous = app
        .server
        .post("/api/upload")
        .multipart(image_form(PNG_HEADER.to_vec(), "image/png"))
        .await;
    assert_error(&anonymous, StatusCode::UNAUTHORIZED, "No token");

    let missing = app
        .server
        .post("/api/upload")
        .authorization_bearer(&alice.token)
        .multipart(MultipartForm::new().add_text("caption", "no file"))
        .await;
    assert_error(&missing, StatusCode::BAD_REQUEST, "No image provided");

    let wrong_type = app
        .server
        .post("/api/upload")
        .authorization_bearer(&alice.token)
        .multipart(image_form(b"<svg/>".to_vec(), "image/svg+xml"))
        .await;
    assert_eq!(wrong_type.status_code(), StatusCode::BAD_REQUEST);

    let too_large = app
        .server
        .post("/api/upload")
        .authorization_bearer(&alice.token)
        .multipart(image_form(vec![0u8; MAX_IMAGE_BYTES + 1], "image/png"))
        .await;
    assert_error(&too_large, StatusCode::BAD_REQUEST, "Image too large");
}
