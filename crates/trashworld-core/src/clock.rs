use instant::Instant;

/// Time values for one frame. `elapsed` is seconds since the loop started,
/// `delta` is seconds since the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed: f64,
    pub delta: f32,
}

/// Master clock read exactly once per frame.
pub trait Clock {
    fn tick(&mut self) -> FrameTime;
    fn reset(&mut self);
}

/// Wall clock backed by `instant`, which maps to `performance.now()` on the web.
#[derive(Debug)]
pub struct MasterClock {
    start: Instant,
    last: Instant,
}

impl MasterClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }
}

impl Default for MasterClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MasterClock {
    fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;
        FrameTime {
            elapsed: (now - self.start).as_secs_f64(),
            delta: delta.as_secs_f32(),
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Clock advanced by hand, one fixed step per tick.
#[derive(Clone, Debug)]
pub struct ManualClock {
    step: f32,
    elapsed: f64,
}

impl ManualClock {
    pub fn new(step: f32) -> Self {
        Self { step, elapsed: 0.0 }
    }

    pub fn set_step(&mut self, step: f32) {
        self.step = step;
    }
}

impl Clock for ManualClock {
    fn tick(&mut self) -> FrameTime {
        self.elapsed += self.step as f64;
        FrameTime {
            elapsed: self.elapsed,
            delta: self.step,
        }
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
