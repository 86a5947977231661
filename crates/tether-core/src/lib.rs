//! Core data model shared by the tether crates: scalar values, records, the
//! per-table fetch cache, and the join instructions that relate its tables.

mod cache;
mod instruction;
mod record;
mod value;

pub use cache::TableCache;
pub use instruction::JoinInstruction;
pub use record::{ColumnSet, Record};
pub use value::Value;

/// Build a [`Record`] from `column => value` pairs.
///
/// ```
/// use tether_core::{record, Value};
///
/// let user = record! { "id" => 1, "name" => "A" };
/// assert_eq!(user.get("name"), Some(&Value::from("A")));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert($column, $value);
        )+
        record
    }};
}
