//! Operation status surface.

/// Errors reported by key-exchange operations and their collaborators.
///
/// Successful completion is `Ok(_)`; every operation propagates the first
/// failing step's status unchanged, after zeroizing any secret temporaries
/// it had allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Unspecified failure in a collaborator.
    #[error("generic failure")]
    Generic,
    /// Failure raised while running a self-test harness.
    #[error("error during test")]
    DuringTest,
    /// Internal inconsistency that should be unreachable.
    #[error("unknown error")]
    Unknown,
    /// Requested capability is not provided by this build.
    #[error("not implemented")]
    NotImplemented,
    /// A collaborator could not allocate working memory.
    #[error("out of memory")]
    OutOfMemory,
    /// Null or wrongly-sized input.
    #[error("invalid parameter")]
    InvalidParameter,
    /// Shared-key derivation failed.
    #[error("shared key computation failed")]
    SharedKey,
    /// A bounded sampling loop exhausted its budget.
    #[error("too many iterations")]
    TooManyIterations,
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn status_strings_are_stable() {
        assert_eq!(Error::Generic.to_string(), "generic failure");
        assert_eq!(Error::InvalidParameter.to_string(), "invalid parameter");
        assert_eq!(Error::TooManyIterations.to_string(), "too many iterations");
    }
}
