/// Precondition failures detected before any row is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("Invalid input: `{argument}` must be an object")]
    NotAnObject { argument: String },

    #[error("Invalid input: `{argument}` must be an array")]
    NotAnArray { argument: String },

    #[error("Invalid input: `{argument}` must be a string")]
    NotAString { argument: String },

    #[error("Invalid input: join instructions must be a non-empty sequence")]
    EmptyInstructions,

    #[error("Invalid input: join instruction {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Invalid input: parent table `{table}` is absent from the cache")]
    UnknownParentTable { table: String },

    #[error("Invalid input: table `{table}` referenced by association `{alias}` is absent from the cache")]
    UnknownTable { table: String, alias: String },

    #[error("Invalid input: malformed `{argument}`: {message}")]
    Malformed { argument: String, message: String },
}
