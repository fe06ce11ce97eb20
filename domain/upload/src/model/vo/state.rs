/// Upload session lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Built, nothing sent yet.
    #[default]
    Idle,
    /// The transport started sending the body.
    Sending,
    /// A success response was received.
    Completed,
    /// The transfer failed or the server rejected it.
    Failed,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }
}
