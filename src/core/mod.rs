mod destinations;
mod path_filter;
mod queue;
mod search;
mod session;
mod statistics;

pub use destinations::DestinationSet;
pub use path_filter::{FAVORITE_PATHS_FILE, IGNORED_PATHS_FILE, PathFilterStore};
pub use queue::ImageQueue;
pub use search::ReverseImageSearch;
pub use session::{
    CommitOutcome, EntryProbe, FileProbe, HotkeyAction, Session, SessionEvent, SessionState,
};
pub use statistics::StatisticsRecorder;
