//! src/api/mock.rs
//! In-memory [`EmployeeApi`] double that records every call.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::api::client::{ApiError, ApiResult, EmployeeApi};
use crate::model::employee::{Employee, EmployeeId};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Create(Employee),
    Update(EmployeeId, Employee),
    Delete(EmployeeId),
}

#[derive(Debug, Default)]
pub struct MockBackend {
    pub records: Vec<Employee>,
    pub next_id: EmployeeId,
    pub calls: Vec<ApiCall>,
    pub fail_list: bool,
    pub fail_save: bool,
    pub fail_delete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<MockBackend>>,
}

impl MockApi {
    pub fn with_records(records: Vec<Employee>) -> Self {
        let next_id = records.iter().filter_map(|e| e.id).max().unwrap_or(0);
        Self {
            inner: Arc::new(Mutex::new(MockBackend {
                records,
                next_id,
                ..MockBackend::default()
            })),
        }
    }

    pub fn backend(&self) -> MutexGuard<'_, MockBackend> {
        self.inner.lock().expect("mock backend poisoned")
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.backend().calls.clone()
    }

    fn scripted_failure() -> ApiError {
        ApiError::status(500, "scripted failure")
    }
}

#[async_trait]
impl EmployeeApi for MockApi {
    async fn list(&self) -> ApiResult<Vec<Employee>> {
        let mut db = self.backend();
        db.calls.push(ApiCall::List);
        if db.fail_list {
            return Err(Self::scripted_failure());
        }
        Ok(db.records.clone())
    }

    async fn create(&self, employee: &Employee) -> ApiResult<()> {
        let mut db = self.backend();
        db.calls.push(ApiCall::Create(employee.clone()));
        if db.fail_save {
            return Err(Self::scripted_failure());
        }
        db.next_id += 1;
        let record = Employee {
            id: Some(db.next_id),
            ..employee.clone()
        };
        db.records.push(record);
        Ok(())
    }

    async fn update(&self, id: EmployeeId, employee: &Employee) -> ApiResult<()> {
        let mut db = self.backend();
        db.calls.push(ApiCall::Update(id, employee.clone()));
        if db.fail_save {
            return Err(Self::scripted_failure());
        }
        match db.records.iter_mut().find(|e| e.id == Some(id)) {
            Some(slot) => {
                *slot = employee.clone();
                Ok(())
            }
            None => Err(ApiError::status(404, "not found")),
        }
    }

    async fn delete(&self, id: EmployeeId) -> ApiResult<()> {
        let mut db = self.backend();
        db.calls.push(ApiCall::Delete(id));
        if db.fail_delete {
            return Err(Self::scripted_failure());
        }
        db.records.retain(|e| e.id != Some(id));
        Ok(())
    }
}
