use core::fmt;

/// Errors returned by the range structures of this crate
///
/// All preconditions are checked before a structure is mutated, so a returned
/// error always leaves the structure unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A constructor argument was rejected (e.g., a zero size)
    InvalidArgument {
        /// Description of the rejected argument
        reason: &'static str,
    },
    /// An index or range endpoint fell outside `[0, len)`
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Logical length of the structure
        len: usize,
    },
}

impl Error {
    /// Returns `true` if the error is [Error::InvalidArgument]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
    /// Returns `true` if the error is [Error::IndexOutOfRange]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Error::IndexOutOfRange { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

cfg_std! {
    impl std::error::Error for Error {}
}

/// Returns `Ok(())` if `index` is a valid position in a structure of length `len`
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Error> {
    if index < len {
        Ok(())
    } else {
        log::debug!("rejected index {} for length {}", index, len);
        Err(Error::IndexOutOfRange { index, len })
    }
}

/// Validates a construction size
#[inline]
pub(crate) fn check_size(size: usize) -> Result<(), Error> {
    if size == 0 {
        log::debug!("rejected zero-sized construction");
        Err(Error::InvalidArgument {
            reason: "size must be greater than zero",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = Error::IndexOutOfRange { index: 7, len: 5 };
        assert_eq!(err.to_string(), "index 7 out of range for length 5");
        assert!(err.is_index_out_of_range());

        let err = check_size(0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument: size must be greater than zero"
        );
    }

    #[test]
    fn index_checks() {
        assert!(check_index(0, 1).is_ok());
        assert_eq!(
            check_index(1, 1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(check_size(1).is_ok());
    }
}
