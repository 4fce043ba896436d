use std::fmt;

/// Outcome of a single-ref update, as reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateResult {
    /// The update has not been attempted yet.
    NotAttempted,
    /// Another commit got in first; retrying may succeed.
    LockFailure,
    /// The ref already held the requested value.
    NoChange,
    /// The ref did not exist and was created.
    New,
    /// The ref was overwritten without a history check.
    Forced,
    /// The ref moved forward along its history.
    FastForward,
    /// The change was refused.
    Rejected,
    /// The change would have moved or removed the checked-out branch.
    RejectedCurrentBranch,
    /// Storage failed while applying the change.
    IoFailure,
    /// The requested new object does not exist.
    RejectedMissingObject,
    /// The ref no longer holds the value the caller expected.
    RejectedOtherReason,
}

impl UpdateResult {
    /// Every variant, in declaration order.
    pub const ALL: [UpdateResult; 11] = [
        Self::NotAttempted,
        Self::LockFailure,
        Self::NoChange,
        Self::New,
        Self::Forced,
        Self::FastForward,
        Self::Rejected,
        Self::RejectedCurrentBranch,
        Self::IoFailure,
        Self::RejectedMissingObject,
        Self::RejectedOtherReason,
    ];

    /// Returns `true` for outcomes that leave the ref holding the requested
    /// value.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::NoChange | Self::New | Self::Forced | Self::FastForward
        )
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotAttempted => "not attempted",
            Self::LockFailure => "lock failure",
            Self::NoChange => "no change",
            Self::New => "new",
            Self::Forced => "forced",
            Self::FastForward => "fast-forward",
            Self::Rejected => "rejected",
            Self::RejectedCurrentBranch => "rejected: current branch",
            Self::IoFailure => "io failure",
            Self::RejectedMissingObject => "rejected: missing object",
            Self::RejectedOtherReason => "rejected: other reason",
        };
        f.write_str(s)
    }
}
