mod document;
mod id;
mod outcome;

pub use document::{Document, InvalidPath};
pub use id::{DocumentId, InvalidId};
pub use outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
