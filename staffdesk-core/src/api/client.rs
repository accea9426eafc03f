//! src/api/client.rs
//! ============================================================================
//! # EmployeeApi: the backend seam
//!
//! The controller only ever talks to the backend through this trait. The
//! production implementation is [`HttpEmployeeApi`](crate::api::http::HttpEmployeeApi);
//! tests plug in an in-memory double.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::employee::{Employee, EmployeeId};

/// Failure of a single backend call. Nothing here is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The list body was not a JSON array of employees.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// REST operations over the employee collection.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    /// `GET <base>`
    async fn list(&self) -> ApiResult<Vec<Employee>>;

    /// `POST <base>` with a body that carries no id.
    async fn create(&self, employee: &Employee) -> ApiResult<()>;

    /// `PUT <base>/<id>` with the full record.
    async fn update(&self, id: EmployeeId, employee: &Employee) -> ApiResult<()>;

    /// `DELETE <base>/<id>`
    async fn delete(&self, id: EmployeeId) -> ApiResult<()>;
}
