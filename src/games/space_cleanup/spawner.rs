use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnKind {
    Debris,
    Resource,
}

/// Fixed-period timer stepped by elapsed time. Fires once per full period,
/// carrying the remainder over.
#[derive(Clone, Debug)]
struct IntervalTimer {
    period: Duration,
    elapsed: Duration,
}

impl IntervalTimer {
    fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// The two independent spawn timers. Produces requests only; the session
/// decides when to apply them.
#[derive(Clone, Debug)]
pub struct Spawner {
    debris: IntervalTimer,
    resources: IntervalTimer,
    running: bool,
}

impl Spawner {
    pub fn new(debris_every: Duration, resources_every: Duration) -> Self {
        Self {
            debris: IntervalTimer::new(debris_every),
            resources: IntervalTimer::new(resources_every),
            running: true,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<SpawnKind> {
        if !self.running {
            return Vec::new();
        }
        let mut due = Vec::new();
        for _ in 0..self.debris.advance(dt) {
            due.push(SpawnKind::Debris);
        }
        for _ in 0..self.resources.advance(dt) {
            due.push(SpawnKind::Resource);
        }
        due
    }

    /// Stops both timers for good. Safe to call more than once.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn count(kinds: &[SpawnKind], kind: SpawnKind) -> usize {
        kinds.iter().filter(|k| **k == kind).count()
    }

    #[test]
    fn fires_on_period_boundaries() {
        let mut spawner = Spawner::new(ms(1500), ms(2000));
        assert!(spawner.advance(ms(1499)).is_empty());
        assert_eq!(spawner.advance(ms(1)), vec![SpawnKind::Debris]);
        assert_eq!(spawner.advance(ms(500)), vec![SpawnKind::Resource]);
    }

    #[test]
    fn frame_sized_steps_accumulate() {
        let mut spawner = Spawner::new(ms(1500), ms(2000));
        let mut all = Vec::new();
        // 6 seconds in 16ms frames, plus the remainder.
        for _ in 0..375 {
            all.extend(spawner.advance(ms(16)));
        }
        assert_eq!(count(&all, SpawnKind::Debris), 4);
        assert_eq!(count(&all, SpawnKind::Resource), 3);
    }

    #[test]
    fn long_frame_yields_several() {
        let mut spawner = Spawner::new(ms(1500), ms(2000));
        let due = spawner.advance(ms(4500));
        assert_eq!(count(&due, SpawnKind::Debris), 3);
        assert_eq!(count(&due, SpawnKind::Resource), 2);
    }

    #[test]
    fn stop_is_idempotent_and_silences() {
        let mut spawner = Spawner::new(ms(1500), ms(2000));
        spawner.stop();
        spawner.stop();
        assert!(!spawner.is_running());
        assert!(spawner.advance(ms(10_000)).is_empty());
    }
}
