//! Vote tallying and settlement.
//!
//! Tallies are always recomputed from the persisted vote set rather than
//! cached on the script, so a failed vote write can never leave a drifted
//! counter behind.

use super::entities::Vote;
use super::status::Status;

/// Counts of approving and rejecting votes for one script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub approved: usize,
    pub rejected: usize,
}

/// Recompute the tally from the full vote set of a script.
pub fn tally(votes: &[Vote]) -> Tally {
    let approved = votes.iter().filter(|v| v.approved).count();
    Tally {
        approved,
        rejected: votes.len() - approved,
    }
}

/// Derive the script status after a vote has been recorded.
///
/// A single rejecting vote is a veto and wins over any number of approvals.
/// Otherwise the script is approved once the approving count reaches the
/// quorum, and stays in EM_APROVACAO while below it.
pub fn settle(tally: &Tally, quorum: usize) -> Status {
    if tally.rejected > 0 {
        Status::Rejected
    } else if tally.approved >= quorum {
        Status::Approved
    } else {
        Status::InApproval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn vote(approved: bool) -> Vote {
        Vote::new(Uuid::new_v4(), Uuid::new_v4(), approved, "voto".into())
    }

    #[test]
    fn tally_counts_both_sides() {
        let votes = [vote(true), vote(false), vote(true)];
        assert_eq!(
            tally(&votes),
            Tally {
                approved: 2,
                rejected: 1
            }
        );
    }

    #[test]
    fn single_rejection_vetoes() {
        let t = Tally {
            approved: 5,
            rejected: 1,
        };
        assert_eq!(settle(&t, 2), Status::Rejected);
    }

    #[test]
    fn quorum_of_approvals_approves() {
        let t = Tally {
            approved: 2,
            rejected: 0,
        };
        assert_eq!(settle(&t, 2), Status::Approved);
    }

    #[test]
    fn below_quorum_stays_in_approval() {
        let t = Tally {
            approved: 1,
            rejected: 0,
        };
        assert_eq!(settle(&t, 2), Status::InApproval);
    }

    #[test]
    fn higher_quorum_demands_more_votes() {
        let t = Tally {
            approved: 2,
            rejected: 0,
        };
        assert_eq!(settle(&t, 3), Status::InApproval);
    }
}
