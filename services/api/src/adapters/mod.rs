pub mod db;
pub mod memory;

pub use db::PgDocumentStore;
pub use memory::InMemoryStore;

use serde_json::Value;
use tutorhub_core::domain::integral_value;
use tutorhub_core::ports::{PortError, PortResult};

/// The value a counter field takes after one increment. Absent and `null`
/// count as zero; anything that is not a whole number is refused.
pub(crate) fn next_counter_value(field: &str, current: Option<&Value>) -> PortResult<i64> {
    let current = match current {
        None | Some(Value::Null) => 0,
        Some(value) => integral_value(value).ok_or_else(|| {
            PortError::Unexpected(format!("Cannot increment non-integer field '{}'", field))
        })?,
    };
    current.checked_add(1).ok_or_else(|| {
        PortError::Unexpected(format!("Incrementing field '{}' would overflow", field))
    })
}
