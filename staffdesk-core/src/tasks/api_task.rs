//! src/tasks/api_task.rs
//! ============================================================================
//! # Background Backend Requests
//!
//! Each network operation runs in its own tokio task and reports back over the
//! task channel. Tasks never touch application state, are never cancelled,
//! and are never retried.

use std::sync::Arc;

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::{debug, warn};

use crate::api::client::EmployeeApi;
use crate::controller::event_loop::{SaveOp, TaskResult};
use crate::model::employee::{Employee, EmployeeId};

fn report(task_tx: &UnboundedSender<TaskResult>, result: TaskResult) {
    if task_tx.send(result).is_err() {
        warn!("Task result dropped: event loop has shut down");
    }
}

/// `GET` the whole collection.
pub fn spawn_fetch(
    api: Arc<dyn EmployeeApi>,
    task_tx: UnboundedSender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Fetching employee collection");
        let result = api.list().await;
        report(&task_tx, TaskResult::Fetched(result));
    })
}

/// Create or update `employee`, then refetch the collection on success.
pub fn spawn_save(
    api: Arc<dyn EmployeeApi>,
    employee: Employee,
    task_tx: UnboundedSender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let op = match employee.id {
            Some(id) => SaveOp::Update(id),
            None => SaveOp::Create,
        };
        debug!(?op, "Saving employee");

        let saved = match op {
            SaveOp::Update(id) => api.update(id, &employee).await,
            SaveOp::Create => api.create(&employee).await,
        };

        let result = match saved {
            Ok(()) => TaskResult::Saved {
                op,
                refreshed: api.list().await,
            },
            Err(error) => TaskResult::SaveFailed { op, error },
        };
        report(&task_tx, result);
    })
}

/// Delete the record with `id`, then refetch the collection on success.
pub fn spawn_delete(
    api: Arc<dyn EmployeeApi>,
    id: EmployeeId,
    task_tx: UnboundedSender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(id, "Deleting employee");

        let result = match api.delete(id).await {
            Ok(()) => TaskResult::Deleted {
                id,
                refreshed: api.list().await,
            },
            Err(error) => TaskResult::DeleteFailed { id, error },
        };
        report(&task_tx, result);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{ApiCall, MockApi};
    use tokio::sync::mpsc;

    fn named(first: &str, id: Option<EmployeeId>) -> Employee {
        Employee {
            id,
            first_name: first.into(),
            last_name: "X".into(),
            email: "x@y.z".into(),
            salary: 1.0,
        }
    }

    #[tokio::test]
    async fn save_with_id_updates_then_lists() {
        let api = MockApi::with_records(vec![named("Old", Some(4))]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_save(Arc::new(api.clone()), named("New", Some(4)), tx)
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![ApiCall::Update(4, named("New", Some(4))), ApiCall::List]
        );
        match rx.recv().await.unwrap() {
            TaskResult::Saved { op, refreshed } => {
                assert_eq!(op, SaveOp::Update(4));
                assert_eq!(refreshed.unwrap()[0].first_name, "New");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn save_without_id_creates() {
        let api = MockApi::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_save(Arc::new(api.clone()), named("Fresh", None), tx)
            .await
            .unwrap();

        assert!(matches!(api.calls()[0], ApiCall::Create(_)));
        assert!(matches!(
            rx.recv().await.unwrap(),
            TaskResult::Saved {
                op: SaveOp::Create,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn failed_save_skips_refresh() {
        let api = MockApi::default();
        api.backend().fail_save = true;
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_save(Arc::new(api.clone()), named("Nope", None), tx)
            .await
            .unwrap();

        assert_eq!(api.calls().len(), 1);
        assert!(matches!(
            rx.recv().await.unwrap(),
            TaskResult::SaveFailed { .. }
        ));
    }

    #[tokio::test]
    async fn closed_channel_does_not_panic() {
        let api = MockApi::default();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        spawn_fetch(Arc::new(api), tx).await.unwrap();
    }
}
