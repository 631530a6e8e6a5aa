/// Custom actions for Review entities.
#[derive(Debug, Clone, Copy)]
pub enum ReviewAction {
    /// Pending -> Approved.
    Approve,
    /// Pending -> Rejected.
    Reject,
    /// Approved -> Pending, issued only when the rating could not be
    /// applied to the product after approval.
    RevertApproval,
}
