use std::{error::Error, fmt, io, num::ParseFloatError};

#[derive(Debug)]
pub enum DataLoadError {
    IoError(io::Error),
    CsvError(csv::Error),
    ParseFloatError(ParseFloatError),
    MissingColumn(String),
    EmptyTable(String),
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLoadError::IoError(e) => write!(f, "I/O error: {}", e),
            DataLoadError::CsvError(e) => write!(f, "CSV parsing error: {}", e),
            DataLoadError::ParseFloatError(e) => write!(f, "Float parsing error: {}", e),
            DataLoadError::MissingColumn(c) => write!(f, "Table is missing column: {}", c),
            DataLoadError::EmptyTable(name) => write!(f, "Table {} has no data rows", name),
        }
    }
}

impl Error for DataLoadError {}

#[derive(Debug)]
pub enum ScopeError {
    /// Two quantities of incompatible physical dimension were combined.
    UnitMismatch { expected: String, found: String },
    DataLoad(DataLoadError),
    DivisionByZero(&'static str),
    ValueOutOfRange { what: &'static str, value: f64 },
    /// Curves sampled on different wavelength grids were combined.
    GridMismatch { expected: usize, found: usize },
    UnknownBody(String),
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeError::UnitMismatch { expected, found } => {
                write!(f, "Unit mismatch: expected {}, found {}", expected, found)
            }
            ScopeError::DataLoad(e) => write!(f, "Failed to load table: {}", e),
            ScopeError::DivisionByZero(what) => write!(f, "Division by zero: {} is zero", what),
            ScopeError::ValueOutOfRange { what, value } => {
                write!(f, "Value out of range for {}: {}", what, value)
            }
            ScopeError::GridMismatch { expected, found } => write!(
                f,
                "Wavelength grid mismatch: expected {} samples, found {}",
                expected, found
            ),
            ScopeError::UnknownBody(name) => write!(f, "Unknown body: {}", name),
        }
    }
}

impl Error for ScopeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScopeError::DataLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl ScopeError {
    pub(crate) fn unit_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        ScopeError::UnitMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

// Implement `From<T>` conversions for automatic error mapping
impl From<DataLoadError> for ScopeError {
    fn from(err: DataLoadError) -> Self {
        ScopeError::DataLoad(err)
    }
}

impl From<io::Error> for ScopeError {
    fn from(err: io::Error) -> Self {
        ScopeError::DataLoad(DataLoadError::IoError(err))
    }
}

impl From<csv::Error> for ScopeError {
    fn from(err: csv::Error) -> Self {
        ScopeError::DataLoad(DataLoadError::CsvError(err))
    }
}

impl From<ParseFloatError> for ScopeError {
    fn from(err: ParseFloatError) -> Self {
        ScopeError::DataLoad(DataLoadError::ParseFloatError(err))
    }
}
