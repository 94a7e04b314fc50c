use axum::http::StatusCode;
use axum::response::IntoResponse;

use frntx_api::error::ApiError;
use frntx_assistants::AssistantsError;
use frntx_chat::ChatError;

#[tokio::test]
async fn bad_request_maps_to_400() {
    let error = ApiError::BadRequest("content must not be empty".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_message_maps_to_400() {
    let error = ApiError::Chat(ChatError::EmptyMessage);
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn merchant_not_found_maps_to_404() {
    let error = ApiError::MerchantNotFound("m-123".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upstream_api_error_maps_to_502() {
    let error = ApiError::Assistants(AssistantsError::Api {
        status: 500,
        message: "server had a problem".to_string(),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn upstream_not_found_maps_to_404() {
    let error = ApiError::Assistants(AssistantsError::NotFound("thread_abc".to_string()));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
