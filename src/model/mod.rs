//! Domain model: rows, identifiers and errors.

pub mod error;
pub mod identifiers;
pub mod row;

pub use error::{AppError, ControllerError, InputError};
pub use identifiers::{
    FieldName, InvalidFieldName, InvalidPageNumber, InvalidRowsPerPage, PageNumber, RowKey,
    RowsPerPage,
};
pub use row::Row;
