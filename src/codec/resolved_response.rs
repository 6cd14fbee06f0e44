/// What a response header resolved to once matched against the pending
/// call table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedResponse {
    pub sequence_id: u64,

    /// Method of the matching call, or empty when no call was pending under
    /// `sequence_id`.
    pub method: String,

    /// Remote error string; empty on success.
    pub error: String,
}

impl ResolvedResponse {
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// `false` for duplicate or unsolicited responses.
    pub fn is_matched(&self) -> bool {
        !self.method.is_empty()
    }
}
