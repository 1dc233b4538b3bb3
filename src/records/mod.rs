//! Path records parsed from the two git listings.
//!
//! A record is a repository path split on `/`, optionally tagged with the
//! status git reported for it. Records are the input to the tree builder.

mod path_record;
mod status;

pub use path_record::{PathRecord, RecordError, parse_path_lines, parse_status_lines};
pub use status::Status;
