// =============================================================================
// LATENCY MODULE
// =============================================================================
// Every API call waits before answering so the dashboard sees the same
// loading states it would against a remote backend.
//
// LEARNING NOTES:
// - tokio::time::sleep yields to the runtime; it never blocks a worker thread
// - Tests construct the API with `Latency::None` and never sleep
// =============================================================================

use std::time::Duration;

/// How expensive a call pretends to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallWeight {
    /// Regular reads and writes
    Standard,
    /// Unread counter and search suggestions
    Light,
    /// Report generation
    Heavy,
}

/// Delay strategy awaited at the start of every API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    None,
    Fixed {
        standard: Duration,
        light: Duration,
        heavy: Duration,
    },
}

impl Default for Latency {
    fn default() -> Self {
        Latency::from_millis(500, 100, 2000)
    }
}

impl Latency {
    pub fn from_millis(standard: u64, light: u64, heavy: u64) -> Self {
        Latency::Fixed {
            standard: Duration::from_millis(standard),
            light: Duration::from_millis(light),
            heavy: Duration::from_millis(heavy),
        }
    }

    pub fn delay(&self, weight: CallWeight) -> Duration {
        match (self, weight) {
            (Latency::None, _) => Duration::ZERO,
            (Latency::Fixed { standard, .. }, CallWeight::Standard) => *standard,
            (Latency::Fixed { light, .. }, CallWeight::Light) => *light,
            (Latency::Fixed { heavy, .. }, CallWeight::Heavy) => *heavy,
        }
    }

    pub async fn pause(&self, weight: CallWeight) {
        let delay = self.delay(weight);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays() {
        let latency = Latency::default();
        assert_eq!(latency.delay(CallWeight::Standard), Duration::from_millis(500));
        assert_eq!(latency.delay(CallWeight::Light), Duration::from_millis(100));
        assert_eq!(latency.delay(CallWeight::Heavy), Duration::from_millis(2000));
    }

    #[test]
    fn test_none_never_waits() {
        for weight in [CallWeight::Standard, CallWeight::Light, CallWeight::Heavy] {
            assert_eq!(Latency::None.delay(weight), Duration::ZERO);
        }
    }

    #[tokio::test]
    async fn test_pause_sleeps_for_the_weight() {
        let latency = Latency::from_millis(5, 1, 20);
        let start = tokio::time::Instant::now();
        latency.pause(CallWeight::Heavy).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
