mod destination;
mod image_entry;
mod statistics;

pub use destination::DestinationFolder;
pub use image_entry::ImageEntry;
pub use statistics::SessionStatistics;
