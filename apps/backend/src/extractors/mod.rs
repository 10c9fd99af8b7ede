pub mod session_query;
pub mod validated_json;

pub use session_query::SessionQuery;
pub use validated_json::ValidatedJson;
