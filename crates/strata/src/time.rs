/// Frame timing derived from the platform clock.
///
/// The application samples the platform once at the top of every frame and
/// feeds the sample to [`FrameClock::tick`]. The clock never reports a
/// negative delta, even if the platform clock misbehaves.
///
/// # Example
/// ```
/// use strata::time::FrameClock;
///
/// let mut clock = FrameClock::new(1.0);
/// assert_eq!(clock.tick(1.0), 0.0);
/// assert_eq!(clock.tick(1.5), 0.5);
/// assert_eq!(clock.frame_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Platform time when the clock was created
    start: f64,
    /// Platform time sampled at the start of the last frame
    last: f64,
    /// Seconds between the last two samples
    delta: f32,
    frame_count: u64,
}

impl FrameClock {
    pub fn new(now: f64) -> Self {
        Self {
            start: now,
            last: now,
            delta: 0.0,
            frame_count: 0,
        }
    }

    /// Records a new frame at platform time `now` and returns the seconds
    /// since the previous sample.
    ///
    /// A sample earlier than the previous one yields a delta of 0 and becomes
    /// the new reference, so the following delta is measured from it.
    pub fn tick(&mut self, now: f64) -> f32 {
        self.delta = (now - self.last).max(0.0) as f32;
        self.last = now;
        self.frame_count += 1;
        self.delta
    }

    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Seconds between clock creation and the last sample.
    #[inline]
    pub fn elapsed_seconds(&self) -> f64 {
        self.last - self.start
    }

    #[inline]
    pub fn last_frame_time(&self) -> f64 {
        self.last
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
