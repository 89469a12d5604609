//! Board error types

use thiserror::Error;

use crate::columns::ColumnId;

/// Errors that can occur during board mutations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    /// A drag or reorder referenced an index no longer valid for its column.
    /// The mutation is aborted before any store is touched.
    #[error("Index {index} out of bounds for column {column} (len {len})")]
    InvalidIndex { column: ColumnId, index: usize, len: usize },

    /// Lookup failure for a column during a transfer
    #[error("Unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// Lookup failure for a spot during a transfer
    #[error("Unknown spot: {0}")]
    UnknownSpot(String),
}

impl BoardError {
    /// Lenient failures are treated as logged no-ops by the coordinator;
    /// only stale-index failures abort the gesture with an error.
    pub fn is_lenient(&self) -> bool {
        matches!(self, Self::UnknownColumn(_) | Self::UnknownSpot(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_lenient() {
        assert!(BoardError::UnknownColumn(ColumnId::Staging).is_lenient());
        assert!(BoardError::UnknownSpot("s1".to_string()).is_lenient());
        assert!(
            !BoardError::InvalidIndex {
                column: ColumnId::Staging,
                index: 3,
                len: 2
            }
            .is_lenient()
        );
    }

    #[test]
    fn test_display() {
        let err = BoardError::InvalidIndex {
            column: ColumnId::Staging,
            index: 5,
            len: 2,
        };
        assert!(err.to_string().contains("out of bounds"));
    }
}
