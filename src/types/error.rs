use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("table '{name}' not found")]
    TableNotFound { name: String },

    #[error("table '{name}' already exists")]
    TableAlreadyExists { name: String },

    #[error("too many tables (max: {max})")]
    TooManyTables { max: usize },

    #[error("too many columns (max: {max})")]
    TooManyColumns { max: usize },

    #[error("column '{name}' not found in table '{table}'")]
    ColumnNotFound { name: String, table: String },

    #[error("column index {index} out of bounds")]
    ColumnIndexOutOfBounds { index: usize },

    #[error("SQL parsing error: {0}")]
    SqlParser(#[from] sqlparser::parser::ParserError),

    #[error("unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    #[error("unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("value for column '{column}' exceeds declared width (max: {max}, got: {actual})")]
    TextTooLong {
        column: String,
        max: usize,
        actual: usize,
    },

    #[error("table '{table}' is full")]
    CapacityExceeded { table: String },

    #[error("page {page} beyond table limit (max: {max})")]
    PageLimitExceeded { page: usize, max: usize },

    #[error("row of {width} bytes does not fit in a {max}-byte page")]
    RowTooLarge { width: usize, max: usize },

    #[error("invalid data: {details}")]
    InvalidData { details: String },
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
