use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight stations of the script review pipeline.
///
/// A script flows through: AGUARDANDO_ANALISE → EM_ANALISE →
/// AGUARDANDO_REVISAO → EM_REVISAO → AGUARDANDO_APROVACAO → EM_APROVACAO,
/// ending in APROVADO or REJEITADO. The rejected branch can be taken
/// directly from analysis or from any vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "AGUARDANDO_ANALISE")]
    AwaitingAnalysis,
    #[serde(rename = "EM_ANALISE")]
    InAnalysis,
    #[serde(rename = "AGUARDANDO_REVISAO")]
    AwaitingRevision,
    #[serde(rename = "EM_REVISAO")]
    InRevision,
    #[serde(rename = "AGUARDANDO_APROVACAO")]
    AwaitingApproval,
    #[serde(rename = "EM_APROVACAO")]
    InApproval,
    #[serde(rename = "APROVADO")]
    Approved,
    #[serde(rename = "REJEITADO")]
    Rejected,
}

impl Status {
    /// Wire name as exposed to clients, matching the serialized form.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Status::AwaitingAnalysis => "AGUARDANDO_ANALISE",
            Status::InAnalysis => "EM_ANALISE",
            Status::AwaitingRevision => "AGUARDANDO_REVISAO",
            Status::InRevision => "EM_REVISAO",
            Status::AwaitingApproval => "AGUARDANDO_APROVACAO",
            Status::InApproval => "EM_APROVACAO",
            Status::Approved => "APROVADO",
            Status::Rejected => "REJEITADO",
        }
    }

    /// APROVADO and REJEITADO are absorbing: no operation leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Approved | Status::Rejected)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_uses_wire_names() {
        assert_eq!(Status::AwaitingAnalysis.to_string(), "AGUARDANDO_ANALISE");
        assert_eq!(Status::InApproval.to_string(), "EM_APROVACAO");
        assert_eq!(Status::Rejected.to_string(), "REJEITADO");
    }

    #[test]
    fn only_final_verdicts_are_terminal() {
        assert!(Status::Approved.is_terminal());
        assert!(Status::Rejected.is_terminal());
        assert!(!Status::AwaitingAnalysis.is_terminal());
        assert!(!Status::InApproval.is_terminal());
    }

    #[test]
    fn status_serialization_roundtrip() {
        let json = serde_json::to_string(&Status::AwaitingRevision).unwrap();
        assert_eq!(json, "\"AGUARDANDO_REVISAO\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::AwaitingRevision);
    }
}
