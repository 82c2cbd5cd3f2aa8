use super::*;
use agentcore_error::ErrorExt;
use std::sync::Mutex as StdMutex;
use std::time::Duration as StdDuration;

fn config_with(depth: u32, task_timeout: StdDuration) -> RunnerConfig {
    RunnerConfig { run_queue_depth: depth, run_queue_task_timeout: task_timeout, ..RunnerConfig::default() }
}

fn record_task(log: Arc<StdMutex<Vec<u32>>>, id: u32) -> Task {
    Box::new(move |_cancel| {
        Box::pin(async move {
            log.lock().expect("mutex poisoned").push(id);
        })
    })
}

#[tokio::test]
async fn tasks_for_a_session_run_in_fifo_order() {
    let queue = RunQueue::new(&config_with(10, StdDuration::from_secs(60)));
    let log = Arc::new(StdMutex::new(Vec::new()));
    let cancel = CancellationToken::new();

    let handles: Vec<_> = (0..5).map(|id| queue.enqueue("s1", &cancel, record_task(log.clone(), id)).expect("enqueue")).collect();
    for handle in handles {
        handle.join().await;
    }

    assert_eq!(*log.lock().expect("mutex poisoned"), vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn distinct_sessions_do_not_serialize_against_each_other() {
    let queue = RunQueue::new(&config_with(10, StdDuration::from_secs(60)));
    let log = Arc::new(StdMutex::new(Vec::new()));
    let cancel = CancellationToken::new();

    let a = queue.enqueue("a", &cancel, record_task(log.clone(), 1)).expect("enqueue a");
    let b = queue.enqueue("b", &cancel, record_task(log.clone(), 2)).expect("enqueue b");
    a.join().await;
    b.join().await;

    let recorded = log.lock().expect("mutex poisoned");
    assert_eq!(recorded.len(), 2);
    assert!(recorded.contains(&1));
    assert!(recorded.contains(&2));
}

#[tokio::test]
async fn enqueue_past_the_depth_bound_returns_busy() {
    let queue = RunQueue::new(&config_with(2, StdDuration::from_secs(60)));
    let log = Arc::new(StdMutex::new(Vec::new()));
    let cancel = CancellationToken::new();

    // No await between these calls: the worker has no chance to drain
    // anything, so pending genuinely fills to the bound.
    let first = queue.enqueue("s1", &cancel, record_task(log.clone(), 0));
    let second = queue.enqueue("s1", &cancel, record_task(log.clone(), 1));
    let third = queue.enqueue("s1", &cancel, record_task(log.clone(), 2));

    assert!(first.is_ok());
    assert!(second.is_ok());
    let err = third.expect_err("third enqueue should be rejected as busy");
    assert_eq!(err.status_code(), agentcore_error::StatusCode::QueueFull);

    first.unwrap().join().await;
    second.unwrap().join().await;
}

#[tokio::test]
async fn cancel_drops_pending_tasks_and_stops_the_running_one() {
    let queue = RunQueue::new(&config_with(10, StdDuration::from_secs(60)));
    let cancel = CancellationToken::new();
    let ran_long = Arc::new(StdMutex::new(false));
    let ran_second = Arc::new(StdMutex::new(false));

    let long_flag = ran_long.clone();
    let long_task: Task = Box::new(move |task_cancel| {
        Box::pin(async move {
            tokio::select! {
                _ = task_cancel.cancelled() => {}
                _ = tokio::time::sleep(StdDuration::from_secs(60)) => {
                    *long_flag.lock().expect("mutex poisoned") = true;
                }
            }
        })
    });
    let second_flag = ran_second.clone();
    let second_task: Task = Box::new(move |_cancel| {
        Box::pin(async move {
            *second_flag.lock().expect("mutex poisoned") = true;
        })
    });

    let first_handle = queue.enqueue("s1", &cancel, long_task).expect("enqueue long task");
    let second_handle = queue.enqueue("s1", &cancel, second_task).expect("enqueue second task");

    // Give the worker a chance to start running the first task before cancelling.
    tokio::task::yield_now().await;
    queue.cancel("s1");

    first_handle.join().await;
    second_handle.join().await;

    assert!(!*ran_long.lock().expect("mutex poisoned"), "the long task should never reach its sleep branch");
    assert!(!*ran_second.lock().expect("mutex poisoned"), "the pending task should be dropped without running");
}

#[tokio::test]
async fn has_pending_work_reflects_queue_state() {
    let queue = RunQueue::new(&config_with(10, StdDuration::from_secs(60)));
    let cancel = CancellationToken::new();
    assert!(!queue.has_pending_work("s1"));

    let log = Arc::new(StdMutex::new(Vec::new()));
    let handle = queue.enqueue("s1", &cancel, record_task(log, 0)).expect("enqueue");
    handle.join().await;

    assert!(!queue.has_pending_work("s1"));
}
