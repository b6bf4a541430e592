use std::fmt;

use thiserror::Error;

/// Which key space of a map an error refers to.
///
/// Single-sided containers (the instance registry, plain hash maps) always report [`Side::Key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Key,
    Value,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Key => f.write_str("key"),
            Side::Value => f.write_str("value"),
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// Insert would break uniqueness
    #[error("{0} is already present")]
    DuplicateKey(Side),
    /// A `must_*` operation did not find what it was asked for
    #[error("{0} was not found")]
    KeyNotFound(Side),
}

impl MapError {
    /// Turns a failed removal into [`MapError::KeyNotFound`]
    pub(crate) fn ensure_removed(was_removed: bool, side: Side) -> Result<(), MapError> {
        if was_removed {
            Ok(())
        } else {
            Err(MapError::KeyNotFound(side))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MapError, Side};

    #[test]
    fn messages_name_the_side() {
        assert_eq!(
            MapError::DuplicateKey(Side::Value).to_string(),
            "value is already present"
        );
        assert_eq!(MapError::KeyNotFound(Side::Key).to_string(), "key was not found");
    }

    #[test]
    fn successful_removal_is_not_an_error() {
        assert_eq!(MapError::ensure_removed(true, Side::Key), Ok(()));
        assert_eq!(
            MapError::ensure_removed(false, Side::Value),
            Err(MapError::KeyNotFound(Side::Value))
        );
    }
}
