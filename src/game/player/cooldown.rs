// Countdown timers for buffered input windows

/// A countdown that is "running" while time remains.
///
/// Ticking never takes the remaining time below zero, so an expired
/// cooldown and a cleared one are indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// Create a stopped cooldown
    pub fn new() -> Self {
        Self { remaining: 0.0 }
    }

    /// Create a cooldown already armed with `duration` seconds
    pub fn armed(duration: f32) -> Self {
        let mut cooldown = Self::new();
        cooldown.arm(duration);
        cooldown
    }

    /// (Re)start the countdown
    pub fn arm(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Stop the countdown
    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    /// Whether any time remains
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Seconds left before the window closes
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_stopped() {
        let cooldown = Cooldown::new();
        assert!(!cooldown.is_running());
        assert_eq!(cooldown.remaining(), 0.0);
    }

    #[test]
    fn test_tick_until_expired() {
        let mut cooldown = Cooldown::armed(0.1);
        cooldown.tick(0.05);
        assert!(cooldown.is_running());

        cooldown.tick(0.06);
        assert!(!cooldown.is_running());
        assert_eq!(cooldown.remaining(), 0.0, "never goes below zero");
    }

    #[test]
    fn test_clear_and_rearm() {
        let mut cooldown = Cooldown::armed(0.1);
        cooldown.clear();
        assert!(!cooldown.is_running());

        cooldown.arm(0.2);
        assert_eq!(cooldown.remaining(), 0.2);
    }

    #[test]
    fn test_negative_duration_stays_stopped() {
        let cooldown = Cooldown::armed(-1.0);
        assert!(!cooldown.is_running());
    }
}
