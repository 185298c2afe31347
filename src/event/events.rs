/// Timing and state signals raised by a media element.
///
/// They carry no payload: receivers read whatever they need back from the
/// handle, so only the last delivered signal matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    LoadedData,
    TimeUpdate,
    Progress,
    Play,
    Pause,
    VolumeChange,
    RateChange,
    Ended,
}
