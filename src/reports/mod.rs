//! Output records and their serialization
//!
//! One [`ScoredRecord`] is built per input URL once all four metrics have settled. The
//! NDJSON generator writes records in the order given, one JSON object per line, using the
//! field names consumers of the tool expect (`NetScore`, `RampUp_Latency`, and so on).

mod ndjson;
mod scored_record;

pub use ndjson::generate as generate_ndjson;
pub use scored_record::ScoredRecord;
