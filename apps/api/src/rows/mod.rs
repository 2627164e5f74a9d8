// Row ingestion: payload-shape extraction and field repair.
// Everything downstream (analytics, prompting, deck) consumes the
// `Vec<serde_json::Value>` rows produced here.

pub mod normalize;
pub mod payload;
