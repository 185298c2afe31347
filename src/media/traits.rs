use std::ops::Range;

/// A span of media time in seconds.
pub type TimeRange = Range<f64>;

/// Capability over whatever actually plays the episode.
///
/// Setters mirror a media element: out-of-range values are clamped by the
/// implementation, never rejected.
pub trait MediaHandle {
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);

    /// Total length in seconds, `0.0` while unknown.
    fn duration(&self) -> f64;

    /// Downloaded ranges, sorted by start time.
    fn buffered_ranges(&self) -> Vec<TimeRange>;

    /// End of the last buffered range.
    fn buffered_end(&self) -> Option<f64> {
        self.buffered_ranges().last().map(|range| range.end)
    }

    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;

    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);
}
