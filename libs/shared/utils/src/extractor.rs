use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use shared_models::error::AppError;
use shared_models::RecordId;

/// JSON body extractor whose rejections use the shared error shape.
///
/// Type and missing-field errors surface as 422 like any other validation
/// failure; a request that is not JSON at all is a 400.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(match rejection {
                JsonRejection::JsonDataError(e) => AppError::ValidationError(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => AppError::ValidationError(e.body_text()),
                other => AppError::BadRequest(other.body_text()),
            }),
        }
    }
}

/// Extracts a single `{id}` path segment.
///
/// Any integer is accepted. One that cannot be a [`RecordId`] (negative, or
/// wider than 64 bits) comes through as `None`, which handlers answer with
/// their own not-found error. Segments that are not integers are a 422.
pub struct RecordIdPath(pub Option<RecordId>);

impl<S> FromRequestParts<S> for RecordIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;

        parse_record_id(&segment).map(RecordIdPath)
    }
}

fn parse_record_id(segment: &str) -> Result<Option<RecordId>, AppError> {
    let (negative, digits) = match segment.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, segment.strip_prefix('+').unwrap_or(segment)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::ValidationError(format!(
            "Invalid URL: Cannot parse `{segment}` as an integer id"
        )));
    }

    if negative {
        return Ok(None);
    }
    Ok(digits.parse::<RecordId>().ok())
}

/// Query-string extractor whose rejections use the shared error shape.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| QueryParams(value))
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    #[derive(Deserialize)]
    struct Paging {
        page: Option<u32>,
    }

    fn app() -> Router {
        Router::new()
            .route("/echo", post(|JsonBody(body): JsonBody<Named>| async move { body.name }))
            .route(
                "/items/{id}",
                get(|RecordIdPath(id): RecordIdPath| async move {
                    id.map_or_else(|| "none".to_string(), |id| id.to_string())
                }),
            )
            .route(
                "/pages",
                get(|QueryParams(paging): QueryParams<Paging>| async move {
                    paging.page.unwrap_or(1).to_string()
                }),
            )
    }

    async fn get_text(uri: &str) -> (StatusCode, String) {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post_json(body: &'static str, content_type: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().method("POST").uri("/echo");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn well_formed_body_is_accepted() {
        assert_eq!(post_json(r#"{"name":"Alice"}"#, Some("application/json")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_field_is_unprocessable() {
        assert_eq!(post_json(r#"{}"#, Some("application/json")).await, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn malformed_json_is_unprocessable() {
        assert_eq!(post_json(r#"{"name":"#, Some("application/json")).await, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        assert_eq!(post_json(r#"{"name":"Alice"}"#, None).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_id_is_unprocessable() {
        let (status, body) = get_text("/items/abc").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("error"));

        let (status, _) = get_text("/items/-").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn numeric_id_is_extracted() {
        assert_eq!(get_text("/items/42").await, (StatusCode::OK, "42".to_string()));
    }

    #[tokio::test]
    async fn negative_id_matches_no_record() {
        assert_eq!(get_text("/items/-1").await, (StatusCode::OK, "none".to_string()));
    }

    #[tokio::test]
    async fn oversized_id_matches_no_record() {
        assert_eq!(
            get_text("/items/99999999999999999999999").await,
            (StatusCode::OK, "none".to_string())
        );
    }

    #[tokio::test]
    async fn query_params_are_extracted() {
        assert_eq!(get_text("/pages?page=3").await, (StatusCode::OK, "3".to_string()));
        assert_eq!(get_text("/pages").await, (StatusCode::OK, "1".to_string()));
    }

    #[tokio::test]
    async fn bad_query_param_is_unprocessable_json() {
        let (status, body) = get_text("/pages?page=abc").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(body["error"].is_string());
    }
}
