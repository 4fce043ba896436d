//! Mapping from batch command outcomes to single-ref update outcomes.

use reftree_refs::CommandResult;

use crate::result::UpdateResult;

/// Translate the outcome of a batch command into an [`UpdateResult`].
///
/// A successful command reports `desired`, the result the caller asked to
/// see on success. Every other outcome ignores `desired`.
pub fn translate(outcome: CommandResult, desired: UpdateResult) -> UpdateResult {
    match outcome {
        CommandResult::Ok => desired,
        CommandResult::LockFailure => UpdateResult::LockFailure,
        CommandResult::NotAttempted => UpdateResult::NotAttempted,
        CommandResult::RejectedMissingObject => UpdateResult::IoFailure,
        CommandResult::RejectedCurrentBranch => UpdateResult::RejectedCurrentBranch,
        CommandResult::RejectedNoCreate
        | CommandResult::RejectedNoDelete
        | CommandResult::RejectedNonFastForward
        | CommandResult::RejectedOtherReason => UpdateResult::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome() -> impl Strategy<Value = CommandResult> {
        prop::sample::select(CommandResult::ALL.to_vec())
    }

    fn desired() -> impl Strategy<Value = UpdateResult> {
        prop::sample::select(UpdateResult::ALL.to_vec())
    }

    #[test]
    fn table() {
        use CommandResult as C;
        use UpdateResult as U;
        let cases = [
            (C::LockFailure, U::LockFailure),
            (C::NotAttempted, U::NotAttempted),
            (C::RejectedMissingObject, U::IoFailure),
            (C::RejectedCurrentBranch, U::RejectedCurrentBranch),
            (C::RejectedNoCreate, U::Rejected),
            (C::RejectedNoDelete, U::Rejected),
            (C::RejectedNonFastForward, U::Rejected),
            (C::RejectedOtherReason, U::Rejected),
        ];
        for (outcome, expected) in cases {
            assert_eq!(translate(outcome, U::FastForward), expected, "{outcome:?}");
        }
        assert_eq!(translate(C::Ok, U::New), U::New);
    }

    proptest! {
        #[test]
        fn ok_echoes_desired(d in desired()) {
            prop_assert_eq!(translate(CommandResult::Ok, d), d);
        }

        #[test]
        fn failures_ignore_desired(o in outcome(), a in desired(), b in desired()) {
            prop_assume!(o != CommandResult::Ok);
            prop_assert_eq!(translate(o, a), translate(o, b));
        }

        #[test]
        fn failures_never_report_success(o in outcome(), d in desired()) {
            prop_assume!(o != CommandResult::Ok);
            prop_assert!(!translate(o, d).is_success());
        }
    }
}
