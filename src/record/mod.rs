mod identity;

pub use identity::{Mate, RecordIdentity};
