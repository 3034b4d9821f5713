//! Delivery outcome of a coordinated request.

/// The caller-visible result of a coordinated request that did not fail.
///
/// `Cancelled` covers both an explicit [`cancel`] and supersession by a
/// newer request under the same key; the two are deliberately
/// indistinguishable. A cancelled request should produce no UI update at
/// all: no data, no error surface.
///
/// [`cancel`]: crate::coordinator::RequestCoordinator::cancel
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The operation ran to completion as the current generation for its
    /// key; `T` is its value.
    Completed(T),
    /// The operation was cancelled or superseded; there is no result.
    Cancelled,
}

impl<T> Outcome<T> {
    /// Whether this outcome carries a value.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Whether this outcome was cancelled or superseded.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Converts into `Some(value)` for a completed outcome, `None`
    /// otherwise.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    /// Maps the completed value, preserving `Cancelled`.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Completed(value) => Outcome::Completed(f(value)),
            Self::Cancelled => Outcome::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let completed: Outcome<u32> = Outcome::Completed(7);
        let cancelled: Outcome<u32> = Outcome::Cancelled;

        assert!(completed.is_completed());
        assert!(!completed.is_cancelled());
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_completed());
    }

    #[test]
    fn test_into_option() {
        assert_eq!(Outcome::Completed(7).into_option(), Some(7));
        assert_eq!(Outcome::<u32>::Cancelled.into_option(), None);
    }

    #[test]
    fn test_map() {
        assert_eq!(Outcome::Completed(7).map(|n| n * 2), Outcome::Completed(14));
        assert_eq!(
            Outcome::<u32>::Cancelled.map(|n| n * 2),
            Outcome::Cancelled
        );
    }
}
