pub mod reader;
pub mod resolver;

pub use reader::{read_raw_tag, RawTag};
pub use resolver::{resolve_track, DurationPolicy, ResolvedTrack};
