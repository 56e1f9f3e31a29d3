//! Aggregate veto results for preview rounds.
//!
//! When the editor controller asks its listeners whether an edit may start
//! or finish, each listener casts a [`Vote`]. The round's tally starts at
//! [`Vote::Approve`] and any `Deny` cast makes the result `Deny` for the
//! remainder of the round, regardless of later `Approve` casts.

/// A single listener's answer to a preview question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vote {
    /// Allow the operation to proceed. The initial tally value.
    #[default]
    Approve,
    /// Veto the operation. Absorbing: once cast, the round is denied.
    Deny,
}

impl Vote {
    /// Fold another cast into this tally. `Deny` wins over `Approve`.
    #[must_use]
    pub fn merge(self, other: Vote) -> Vote {
        match (self, other) {
            (Vote::Approve, Vote::Approve) => Vote::Approve,
            _ => Vote::Deny,
        }
    }

    /// Whether the tally allows the operation.
    pub fn is_approved(self) -> bool {
        self == Vote::Approve
    }
}

impl FromIterator<Vote> for Vote {
    fn from_iter<I: IntoIterator<Item = Vote>>(iter: I) -> Self {
        iter.into_iter().fold(Vote::Approve, Vote::merge)
    }
}
