use std::time::Duration;

use flume::Sender;
use tracing::{debug, warn};

use crate::{
    event::events::Event,
    media::{
        error::MediaError,
        traits::{MediaHandle, TimeRange},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct MediaSource {
    pub title: String,
    pub duration: Duration,
}

/// Headless media element.
///
/// Time only moves when [`PlaybackClock::advance`] is called, so the owner
/// decides the tick rate. Download progress is simulated at `download_rate`
/// seconds of media per second of wall time and playback stalls at the edge
/// of the buffered range it is in.
pub struct PlaybackClock {
    event_tx: Sender<Event>,
    source: Option<MediaSource>,
    position: f64,
    duration: f64,
    buffered: Vec<TimeRange>,
    download_rate: f64,
    paused: bool,
    volume: f64,
    rate: f64,
}

impl PlaybackClock {
    pub fn new(event_tx: Sender<Event>, download_rate: f64) -> Self {
        Self {
            event_tx,
            source: None,
            position: 0.0,
            duration: 0.0,
            buffered: Vec::new(),
            download_rate: if download_rate.is_finite() {
                download_rate.max(0.0)
            } else {
                0.0
            },
            paused: true,
            volume: 1.0,
            rate: 1.0,
        }
    }

    pub fn load(&mut self, source: MediaSource) -> Result<(), MediaError> {
        let duration = source.duration.as_secs_f64();
        if !(duration.is_finite() && duration > 0.0) {
            return Err(MediaError::InvalidDuration(duration));
        }

        debug!(title = %source.title, duration, "loading media source");
        self.source = Some(source);
        self.duration = duration;
        self.position = 0.0;
        self.buffered = vec![0.0..0.0];
        self.paused = true;

        self.emit(Event::LoadedData);
        self.emit(Event::TimeUpdate);
        self.emit(Event::Progress);
        Ok(())
    }

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn is_ended(&self) -> bool {
        self.duration > 0.0 && self.position >= self.duration
    }

    /// Playing, but waiting for data past the current position.
    #[cfg(test)]
    pub fn is_stalled(&self) -> bool {
        !self.paused && !self.is_ended() && self.playable_until() <= self.position
    }

    pub fn advance(&mut self, elapsed: Duration) {
        if self.source.is_none() {
            return;
        }

        let secs = elapsed.as_secs_f64();
        if self.download(secs * self.download_rate) {
            self.emit(Event::Progress);
        }

        if self.paused {
            return;
        }

        let target = (self.position + secs * self.rate)
            .min(self.playable_until())
            .min(self.duration);
        if target > self.position {
            self.position = target;
            self.emit(Event::TimeUpdate);
        }

        if self.is_ended() {
            self.paused = true;
            self.emit(Event::Pause);
            self.emit(Event::Ended);
        }
    }

    pub fn try_set_playback_rate(&mut self, rate: f64) -> Result<(), MediaError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(MediaError::InvalidRate(rate));
        }
        if rate != self.rate {
            self.rate = rate;
            self.emit(Event::RateChange);
        }
        Ok(())
    }

    fn active_range(&self) -> Option<usize> {
        self.buffered
            .iter()
            .position(|range| range.start <= self.position && self.position <= range.end)
    }

    fn playable_until(&self) -> f64 {
        self.active_range()
            .map_or(self.position, |index| self.buffered[index].end)
    }

    fn download(&mut self, amount: f64) -> bool {
        if amount <= 0.0 {
            return false;
        }

        let index = match self.active_range() {
            Some(index) => index,
            None => self.insert_range(self.position),
        };

        let before = self.buffered[index].end;
        self.buffered[index].end = (before + amount).min(self.duration);

        while index + 1 < self.buffered.len()
            && self.buffered[index + 1].start <= self.buffered[index].end
        {
            let next = self.buffered.remove(index + 1);
            self.buffered[index].end = self.buffered[index].end.max(next.end);
        }

        self.buffered[index].end > before
    }

    fn insert_range(&mut self, at: f64) -> usize {
        let index = self
            .buffered
            .iter()
            .position(|range| range.start > at)
            .unwrap_or(self.buffered.len());
        self.buffered.insert(index, at..at);
        index
    }

    fn emit(&self, event: Event) {
        let _ = self.event_tx.send(event);
    }
}

impl MediaHandle for PlaybackClock {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.position = seconds.clamp(0.0, self.duration);
        self.emit(Event::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn buffered_ranges(&self) -> Vec<TimeRange> {
        self.buffered
            .iter()
            .filter(|range| range.end > range.start)
            .cloned()
            .collect()
    }

    fn play(&mut self) {
        if self.source.is_none() {
            return;
        }
        if self.is_ended() {
            self.position = 0.0;
            self.emit(Event::TimeUpdate);
        }
        if self.paused {
            self.paused = false;
            self.emit(Event::Play);
        }
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.emit(Event::Pause);
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        if volume != self.volume {
            self.volume = volume;
            self.emit(Event::VolumeChange);
        }
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if let Err(e) = self.try_set_playback_rate(rate) {
            warn!("Ignoring playback rate change: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(duration: u64, download_rate: f64) -> (PlaybackClock, flume::Receiver<Event>) {
        let (tx, rx) = flume::unbounded();
        let mut clock = PlaybackClock::new(tx, download_rate);
        clock
            .load(MediaSource {
                title: "Episode 1".to_string(),
                duration: Duration::from_secs(duration),
            })
            .unwrap();
        rx.drain().for_each(drop);
        (clock, rx)
    }

    #[test]
    fn load_rejects_empty_media() {
        let (tx, _rx) = flume::unbounded();
        let mut clock = PlaybackClock::new(tx, 1.0);
        let err = clock
            .load(MediaSource {
                title: "empty".to_string(),
                duration: Duration::ZERO,
            })
            .unwrap_err();
        assert_eq!(err, MediaError::InvalidDuration(0.0));
        assert!(clock.source().is_none());
    }

    #[test]
    fn load_announces_metadata() {
        let (tx, rx) = flume::unbounded();
        let mut clock = PlaybackClock::new(tx, 1.0);
        clock
            .load(MediaSource {
                title: "Episode 1".to_string(),
                duration: Duration::from_secs(90),
            })
            .unwrap();
        let events: Vec<_> = rx.drain().collect();
        assert_eq!(events[0], Event::LoadedData);
        assert_eq!(clock.duration(), 90.0);
        assert!(clock.is_paused());
    }

    #[test]
    fn paused_clock_only_downloads() {
        let (mut clock, rx) = loaded(120, 4.0);
        clock.advance(Duration::from_secs(1));

        assert_eq!(clock.current_time(), 0.0);
        assert_eq!(clock.buffered_end(), Some(4.0));
        assert_eq!(rx.drain().collect::<Vec<_>>(), vec![Event::Progress]);
    }

    #[test]
    fn playback_moves_within_buffered_data() {
        let (mut clock, _rx) = loaded(120, 4.0);
        clock.play();
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.current_time(), 1.0);

        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.current_time(), 11.0);
        assert_eq!(clock.buffered_end(), Some(44.0));
    }

    #[test]
    fn playback_stalls_at_buffer_edge() {
        let (mut clock, _rx) = loaded(120, 0.5);
        clock.play();
        clock.advance(Duration::from_secs(1));

        assert_eq!(clock.current_time(), 0.5);
        assert!(clock.is_stalled());
    }

    #[test]
    fn seeking_past_buffer_starts_new_range() {
        let (mut clock, _rx) = loaded(120, 4.0);
        clock.play();
        clock.advance(Duration::from_secs(10));
        clock.set_current_time(100.0);
        clock.advance(Duration::from_secs(1));

        assert_eq!(clock.buffered_ranges(), vec![0.0..40.0, 100.0..104.0]);
        assert_eq!(clock.buffered_end(), Some(104.0));
        assert_eq!(clock.current_time(), 101.0);
    }

    #[test]
    fn ranges_merge_when_download_catches_up() {
        let (mut clock, _rx) = loaded(120, 4.0);
        clock.advance(Duration::from_secs(2));
        clock.set_current_time(10.0);
        clock.advance(Duration::from_secs(1));
        clock.set_current_time(0.0);
        clock.advance(Duration::from_secs(1));

        assert_eq!(clock.buffered_ranges(), vec![0.0..14.0]);
    }

    #[test]
    fn seek_is_clamped_to_media_bounds() {
        let (mut clock, _rx) = loaded(90, 1.0);
        clock.set_current_time(-3.0);
        assert_eq!(clock.current_time(), 0.0);
        clock.set_current_time(500.0);
        assert_eq!(clock.current_time(), 90.0);
        clock.set_current_time(f64::NAN);
        assert_eq!(clock.current_time(), 90.0);
    }

    #[test]
    fn reaching_the_end_pauses() {
        let (mut clock, rx) = loaded(2, 10.0);
        clock.play();
        rx.drain().for_each(drop);
        clock.advance(Duration::from_secs(5));

        assert!(clock.is_paused());
        assert!(clock.is_ended());
        let events: Vec<_> = rx.drain().collect();
        assert!(events.ends_with(&[Event::Pause, Event::Ended]));

        clock.play();
        assert_eq!(clock.current_time(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn volume_is_clamped() {
        let (mut clock, rx) = loaded(60, 1.0);
        clock.set_volume(1.7);
        assert_eq!(clock.volume(), 1.0);
        assert!(rx.is_empty());

        clock.set_volume(-0.2);
        assert_eq!(clock.volume(), 0.0);
        assert_eq!(rx.drain().collect::<Vec<_>>(), vec![Event::VolumeChange]);
    }

    #[test]
    fn invalid_rate_is_ignored() {
        let (mut clock, _rx) = loaded(60, 1.0);
        clock.set_playback_rate(0.0);
        assert_eq!(clock.playback_rate(), 1.0);
        assert_eq!(
            clock.try_set_playback_rate(-1.0),
            Err(MediaError::InvalidRate(-1.0))
        );
        clock.set_playback_rate(1.5);
        assert_eq!(clock.playback_rate(), 1.5);
    }
}
