// ============================================================================
// LingoSync - 请求节流
// ============================================================================
//
// 文件: src/core/throttle.rs
// 职责: 每次调用翻译服务之前的等待策略
// 边界:
//   - ✅ 节流策略 trait 定义
//   - ✅ 随机延迟实现
//   - ❌ 不负责调用顺序（顺序由任务内的串行循环保证）
//
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// 调用翻译服务之前的节流策略
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn wait(&self);
}

/// 在 `[min, max]` 区间内随机等待
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl RandomDelay {
    /// 创建随机延迟，上下限颠倒时自动交换
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    /// 抽取下一次等待时长
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

#[async_trait]
impl Throttle for RandomDelay {
    async fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_stay_within_bounds() {
        let throttle = RandomDelay::from_millis(200, 300);
        for _ in 0..200 {
            let delay = throttle.next_delay();
            assert!(delay >= Duration::from_millis(200));
            assert!(delay <= Duration::from_millis(300));
        }
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let throttle = RandomDelay::from_millis(50, 10);
        let delay = throttle.next_delay();
        assert!(delay >= Duration::from_millis(10) && delay <= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_sleeps_exactly() {
        let throttle = RandomDelay::from_millis(250, 250);
        let started = tokio::time::Instant::now();
        throttle.wait().await;
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(250));
        assert!(elapsed < Duration::from_millis(260));
    }
}
