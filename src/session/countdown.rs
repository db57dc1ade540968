//! 考试倒计时
//!
//! 由会话持有的可取消定时任务：每秒递减一次共享的剩余秒数，
//! 归零时恰好发布一次到期通知后停止。

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// 考试倒计时任务
pub struct Countdown {
    remaining: Arc<AtomicI64>,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    /// 启动倒计时
    ///
    /// # 参数
    /// - `duration_minutes`: 考试时长（分钟），须大于 0
    ///
    /// # 返回
    /// 返回倒计时句柄和到期通知接收端；到期时接收端观察到 `true`，
    /// 且整个生命周期内至多发布一次
    pub fn start(duration_minutes: i64) -> (Self, watch::Receiver<bool>) {
        let remaining = Arc::new(AtomicI64::new(duration_minutes * 60));
        let (expired_tx, expired_rx) = watch::channel(false);

        let shared = remaining.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            // interval 的第一次 tick 立即完成，先消耗掉
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let left = shared.fetch_sub(1, Ordering::SeqCst) - 1;
                if left <= 0 {
                    shared.store(0, Ordering::SeqCst);
                    debug!("倒计时归零，发布到期通知");
                    let _ = expired_tx.send(true);
                    break;
                }
            }
        });

        (
            Self {
                remaining,
                handle: Some(handle),
            },
            expired_rx,
        )
    }

    /// 剩余秒数（不会小于 0）
    pub fn remaining_seconds(&self) -> i64 {
        self.remaining.load(Ordering::SeqCst).max(0)
    }

    /// 取消倒计时
    ///
    /// 重复取消是无操作，不是错误
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("倒计时已取消");
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn countdown_decrements_once_per_second() {
        let (mut countdown, _rx) = Countdown::start(3);
        assert_eq!(countdown.remaining_seconds(), 180);

        // 让倒计时任务先注册定时器
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(countdown.remaining_seconds(), 175);

        countdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_expires_after_full_duration() {
        // 模拟考试时长 180 分钟：经过 180×60 次 tick 后到期
        let (countdown, mut rx) = Countdown::start(180);

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(180 * 60)).await;
        rx.changed().await.unwrap();

        assert!(*rx.borrow());
        assert_eq!(countdown.remaining_seconds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_is_published_exactly_once() {
        let (_countdown, mut rx) = Countdown::start(1);

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(60)).await;
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());

        // 继续推进时间不会再次触发通知
        tokio::time::advance(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;
        assert!(!rx.has_changed().unwrap_or(false));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent_and_stops_ticking() {
        let (mut countdown, rx) = Countdown::start(2);

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        let before = countdown.remaining_seconds();

        countdown.cancel();
        countdown.cancel(); // 重复取消是无操作

        tokio::time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert_eq!(countdown.remaining_seconds(), before);
        // 取消后不会再发布到期
        assert!(!*rx.borrow());
    }
}
