//! 按课程串行化验证尝试
//!
//! 名册和成员状态每次都是现读的，两个成员用同一标识并发验证时都能通过
//! 重复检测。持有课程锁直到昵称与角色修改完成即可避免重复认领。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct CourseLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CourseLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取课程锁，返回的守卫被丢弃时释放
    pub async fn acquire(&self, course: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(course.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_course_is_serialized() {
        let locks = Arc::new(CourseLocks::new());
        let guard = locks.acquire("CS 2100").await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire("CS 2100").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_holders_never_overlap() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let locks = CourseLocks::new();
        let inside = AtomicUsize::new(0);
        let max_inside = AtomicUsize::new(0);

        futures::future::join_all((0..8).map(|_| async {
            let _guard = locks.acquire("CS 2100").await;
            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
            max_inside.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            inside.fetch_sub(1, Ordering::SeqCst);
        }))
        .await;

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_courses_do_not_block() {
        let locks = CourseLocks::new();
        let _first = locks.acquire("CS 2100").await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire("CS 3100")).await;
        assert!(second.is_ok());
    }
}
