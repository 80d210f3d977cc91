//! 串行动作队列 - 基础设施层
//!
//! 保证同一时刻最多只有一个出站动作在执行，并严格按提交顺序执行。
//!
//! 状态机：
//!
//! ```text
//! Idle --(enqueue)--> Draining --(队列为空)--> Idle
//!                      ↺ 队列非空时持续出队
//! ```
//!
//! 空闲时入队会启动一个 worker 任务；worker 把队列排空后退出并回到空闲。
//! 某个动作失败（返回 Err 或 panic）只影响它自己的调用方，队列继续执行下一项。

use std::collections::VecDeque;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// 排队中的动作：调用后产出一个执行动作并投递结果的 future
type QueuedAction = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

#[derive(Default)]
struct QueueInner {
    pending: VecDeque<QueuedAction>,
    draining: bool,
}

/// 串行动作队列
///
/// 克隆后共享同一条队列。
#[derive(Clone, Default)]
pub struct ActionQueue {
    inner: Arc<Mutex<QueueInner>>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 提交一个动作并等待它的结果
    ///
    /// 动作一旦入队就一定会被执行，即使调用方不再等待结果。
    pub async fn submit<T, F, Fut>(&self, action: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();

        let queued: QueuedAction = Box::new(move || {
            async move {
                let outcome = AssertUnwindSafe(async move { action().await })
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| Err(AppError::queue("排队动作执行时发生 panic")));
                // 调用方可能已放弃等待
                let _ = tx.send(outcome);
            }
            .boxed()
        });

        if self.enqueue(queued) {
            debug!("动作队列由空闲转为执行");
            tokio::spawn(Self::drain(self.inner.clone()));
        }

        rx.await
            .map_err(|_| AppError::queue("动作结果通道已关闭"))?
    }

    /// 当前等待执行的动作数（不含正在执行的）
    pub fn depth(&self) -> usize {
        self.lock().pending.len()
    }

    /// 队列是否处于空闲状态
    pub fn is_idle(&self) -> bool {
        !self.lock().draining
    }

    /// 入队；返回是否需要启动 worker
    fn enqueue(&self, action: QueuedAction) -> bool {
        let mut inner = self.lock();
        inner.pending.push_back(action);
        if inner.draining {
            false
        } else {
            inner.draining = true;
            true
        }
    }

    async fn drain(inner: Arc<Mutex<QueueInner>>) {
        loop {
            // 出队与"回到空闲"在同一把锁内完成，避免丢失唤醒
            let next = {
                let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
                match guard.pending.pop_front() {
                    Some(action) => action,
                    None => {
                        guard.draining = false;
                        break;
                    }
                }
            };
            next().await;
        }
        debug!("动作队列已排空");
    }

    fn lock(&self) -> MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("动作队列锁已中毒，继续使用");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_actions_run_in_submission_order_and_failures_are_isolated() {
        let queue = ActionQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let calls = (1..=3).map(|i| {
            let queue = queue.clone();
            let log = log.clone();
            async move {
                queue
                    .submit(move || async move {
                        // 越早提交的动作睡得越久，顺序仍应保持
                        tokio::time::sleep(Duration::from_millis(30 / i)).await;
                        log.lock().unwrap().push(i);
                        if i == 2 {
                            Err(AppError::queue("第二个动作失败"))
                        } else {
                            Ok(i)
                        }
                    })
                    .await
            }
        });

        let results = join_all(calls).await;

        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(assert_ok!(&results[0]), &1);
        assert_err!(&results[1]);
        assert_eq!(assert_ok!(&results[2]), &3);
    }

    #[tokio::test]
    async fn test_at_most_one_action_in_flight() {
        let queue = ActionQueue::new();
        let in_flight = Arc::new(Mutex::new((0usize, 0usize)));

        let calls = (0..5).map(|_| {
            let queue = queue.clone();
            let in_flight = in_flight.clone();
            async move {
                queue
                    .submit(move || async move {
                        {
                            let mut g = in_flight.lock().unwrap();
                            g.0 += 1;
                            g.1 = g.1.max(g.0);
                        }
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        in_flight.lock().unwrap().0 -= 1;
                        Ok(())
                    })
                    .await
            }
        });
        join_all(calls).await;

        assert_eq!(in_flight.lock().unwrap().1, 1);
    }

    #[tokio::test]
    async fn test_panicking_action_does_not_poison_queue() {
        let queue = ActionQueue::new();

        let panicked = queue
            .submit(|| async {
                if true {
                    panic!("boom");
                }
                Ok(0)
            })
            .await;
        assert!(matches!(panicked, Err(AppError::Queue(_))));

        let next = queue.submit(|| async { Ok(42) }).await;
        assert_eq!(assert_ok!(next), 42);
    }

    #[tokio::test]
    async fn test_queue_returns_to_idle_after_draining() {
        let queue = ActionQueue::new();
        assert!(queue.is_idle());

        assert_ok!(queue.submit(|| async { Ok(()) }).await);

        // worker 在投递结果后才检查队列是否为空
        for _ in 0..100 {
            if queue.is_idle() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(queue.is_idle());
        assert_eq!(queue.depth(), 0);
    }
}
