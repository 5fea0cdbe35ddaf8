//! Cancellable repeating timers driven by simulation time
//!
//! Timers only advance when the controller feeds them a timestep, so a
//! frozen simulation freezes its timers too.

/// Slack for accumulated float error (a 1.5 s period fed 1/60 s steps must
/// fire on tick 90, not 91)
const FIRE_EPSILON: f32 = 1e-4;

/// Shortest allowed period, keeps `advance` from spinning
const MIN_PERIOD: f32 = 1e-3;

/// A repeating interval with an explicit cancel handle
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period: f32,
    elapsed: f32,
    cancelled: bool,
}

impl Interval {
    pub fn new(period_secs: f32) -> Self {
        Self {
            period: period_secs.max(MIN_PERIOD),
            elapsed: 0.0,
            cancelled: false,
        }
    }

    /// Advance by `dt` seconds, returning how many times the interval fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.cancelled {
            return 0;
        }

        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed + FIRE_EPSILON >= self.period {
            self.elapsed -= self.period;
            fires += 1;
        }
        // Swallow the negative slack left by an epsilon fire
        self.elapsed = self.elapsed.max(0.0);
        fires
    }

    /// Stop the interval; later `advance` calls never fire
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_fires_on_exact_tick_despite_float_drift() {
        let mut interval = Interval::new(1.5);
        let mut fired_at = None;
        for tick in 1..=100 {
            if interval.advance(SIM_DT) > 0 {
                fired_at = Some(tick);
                break;
            }
        }
        assert_eq!(fired_at, Some(90));
    }

    #[test]
    fn test_large_step_fires_multiple_times() {
        let mut interval = Interval::new(1.0);
        assert_eq!(interval.advance(3.5), 3);
        // Leftover half period carries into the next fire
        assert_eq!(interval.advance(0.5), 1);
    }

    #[test]
    fn test_cancelled_interval_never_fires() {
        let mut interval = Interval::new(1.0);
        interval.advance(0.9);
        interval.cancel();
        assert_eq!(interval.advance(5.0), 0);
        assert!(interval.is_cancelled());
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut interval = Interval::new(0.0);
        let fires = interval.advance(0.01);
        assert!((9..=11).contains(&fires));
    }
}
