use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};

use super::{CounterId, DashboardView};

/// Linear counter animation. Yields one display value per tick and always
/// ends on the exact target, whichever direction it moves.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    current: f64,
    target: i64,
    increment: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(from: i64, to: i64, duration_ms: u64, tick_ms: u64) -> Self {
        let steps = (duration_ms as f64 / tick_ms.max(1) as f64).max(1.0);
        Self {
            current: from as f64,
            target: to,
            increment: (to as f64 - from as f64) / steps,
            finished: false,
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.increment == 0.0 {
            self.finished = true;
            return Some(self.target);
        }

        self.current += self.increment;
        let target = self.target as f64;
        let overshot = (self.increment > 0.0 && self.current >= target)
            || (self.increment < 0.0 && self.current <= target);
        if overshot {
            self.finished = true;
            return Some(self.target);
        }

        Some((self.current + 0.5).floor() as i64)
    }
}

/// Running counter animations keyed by counter. Starting an animation for a
/// counter aborts the one already running for it.
#[derive(Default)]
pub struct AnimationRegistry {
    running: HashMap<CounterId, JoinHandle<()>>,
}

impl AnimationRegistry {
    pub fn start(
        &mut self,
        view: Arc<Mutex<DashboardView>>,
        counter: CounterId,
        animation: CounterAnimation,
        tick: Duration,
    ) {
        self.running.retain(|_, handle| !handle.is_finished());
        if let Some(previous) = self.running.remove(&counter) {
            previous.abort();
            log::debug!("counter_animation_replaced counter={:?}", counter);
        }

        let handle = tokio::spawn(async move {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            for frame in animation {
                ticker.tick().await;
                view.lock().await.set_counter(counter, frame.to_string());
            }
        });
        self.running.insert(counter, handle);
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.running
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Drop for AnimationRegistry {
    fn drop(&mut self) {
        for handle in self.running.values() {
            handle.abort();
        }
    }
}
