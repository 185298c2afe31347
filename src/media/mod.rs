pub mod clock;
pub mod error;
pub mod traits;

pub use clock::{MediaSource, PlaybackClock};
pub use error::MediaError;
pub use traits::{MediaHandle, TimeRange};
