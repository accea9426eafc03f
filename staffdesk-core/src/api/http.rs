//! src/api/http.rs
//! HTTP implementation of [`EmployeeApi`] over reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use crate::api::client::{ApiError, ApiResult, EmployeeApi};
use crate::model::employee::{Employee, EmployeeId};

/// REST client for the employee collection at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpEmployeeApi {
    client: Client,
    base_url: String,
}

impl HttpEmployeeApi {
    /// Builds the client. `timeout` is off unless configured.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: EmployeeId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Maps non-2xx responses to [`ApiError::Status`] and hands back the body.
    async fn check(response: Response) -> ApiResult<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), body));
        }

        Ok(body)
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    #[instrument(level = "debug", skip(self), fields(url = %self.base_url))]
    async fn list(&self) -> ApiResult<Vec<Employee>> {
        let response = self.client.get(&self.base_url).send().await?;
        let body = Self::check(response).await?;
        let employees: Vec<Employee> = serde_json::from_str(&body)?;

        debug!(count = employees.len(), "Fetched employee collection");
        Ok(employees)
    }

    #[instrument(level = "debug", skip_all, fields(url = %self.base_url))]
    async fn create(&self, employee: &Employee) -> ApiResult<()> {
        let body = Employee {
            id: None,
            ..employee.clone()
        };

        let response = self.client.post(&self.base_url).json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, employee))]
    async fn update(&self, id: EmployeeId, employee: &Employee) -> ApiResult<()> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(employee)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete(&self, id: EmployeeId) -> ApiResult<()> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::get,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Backend {
        records: Vec<Employee>,
        next_id: EmployeeId,
        create_bodies: Vec<serde_json::Value>,
        fail_all: bool,
    }

    type Shared = Arc<Mutex<Backend>>;

    async fn list(State(db): State<Shared>) -> Result<Json<Vec<Employee>>, StatusCode> {
        let db = db.lock().unwrap();
        if db.fail_all {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(Json(db.records.clone()))
    }

    async fn create(
        State(db): State<Shared>,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, Json<Employee>) {
        let mut db = db.lock().unwrap();
        db.create_bodies.push(body.clone());
        db.next_id += 1;
        let mut emp: Employee = serde_json::from_value(body).unwrap();
        emp.id = Some(db.next_id);
        db.records.push(emp.clone());
        (StatusCode::CREATED, Json(emp))
    }

    async fn update(
        State(db): State<Shared>,
        Path(id): Path<EmployeeId>,
        Json(emp): Json<Employee>,
    ) -> StatusCode {
        let mut db = db.lock().unwrap();
        match db.records.iter_mut().find(|e| e.id == Some(id)) {
            Some(slot) => {
                *slot = emp;
                StatusCode::NO_CONTENT
            }
            None => StatusCode::NOT_FOUND,
        }
    }

    async fn remove(State(db): State<Shared>, Path(id): Path<EmployeeId>) -> StatusCode {
        let mut db = db.lock().unwrap();
        let before = db.records.len();
        db.records.retain(|e| e.id != Some(id));
        if db.records.len() == before {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::NO_CONTENT
        }
    }

    async fn spawn_backend(db: Shared) -> String {
        let app = Router::new()
            .route("/api/Employees", get(list).post(create))
            .route("/api/Employees/{id}", axum::routing::put(update).delete(remove))
            .with_state(db);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/api/Employees/")
    }

    fn draft(first: &str) -> Employee {
        Employee {
            id: None,
            first_name: first.into(),
            last_name: "Tester".into(),
            email: format!("{}@corp.test", first.to_lowercase()),
            salary: 40_000.0,
        }
    }

    #[tokio::test]
    async fn full_crud_cycle() {
        let db: Shared = Arc::default();
        let base = spawn_backend(db.clone()).await;
        let api = HttpEmployeeApi::new(base, Some(Duration::from_secs(5))).unwrap();
        assert!(api.base_url().ends_with("/api/Employees"));

        assert!(api.list().await.unwrap().is_empty());

        api.create(&draft("Anil")).await.unwrap();
        let listed = api.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        let id = listed[0].id.expect("server assigns id");

        let mut edited = listed[0].clone();
        edited.salary = 45_000.0;
        api.update(id, &edited).await.unwrap();
        assert_eq!(api.list().await.unwrap()[0].salary, 45_000.0);

        api.delete(id).await.unwrap();
        assert!(api.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_body_never_carries_id() {
        let db: Shared = Arc::default();
        let api = HttpEmployeeApi::new(spawn_backend(db.clone()).await, None).unwrap();

        let mut stale = draft("Bela");
        stale.id = Some(99);
        api.create(&stale).await.unwrap();

        let bodies = db.lock().unwrap().create_bodies.clone();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].get("id").is_none());
        assert_eq!(bodies[0]["firstName"], "Bela");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let db: Shared = Arc::default();
        let api = HttpEmployeeApi::new(spawn_backend(db.clone()).await, None).unwrap();

        let err = api.delete(12345).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));

        let err = api.update(7, &draft("Ghost")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));

        db.lock().unwrap().fail_all = true;
        let err = api.list().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpEmployeeApi::new(format!("http://{addr}/api/Employees"), None).unwrap();
        assert!(matches!(api.list().await.unwrap_err(), ApiError::Http(_)));
    }
}
