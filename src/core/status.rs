//! Status of a single movement request.

crate::state_enum! {
    /// Lifecycle status of the request bound to one slot.
    ///
    /// `None` is the idle slot. `Ready` and `InProgress` are the active
    /// statuses. `Complete` and `EmergencyStop` are terminal until the
    /// controller resets the slot.
    pub enum RequestStatus {
        /// No request has been issued.
        None,
        /// Issued and validated against the track direction, not yet moving.
        Ready,
        /// The train is moving under this request's authority.
        InProgress,
        /// The movement finished normally.
        Complete,
        /// Movement was interrupted by a safety stop.
        EmergencyStop,
    }
    final: [Complete, EmergencyStop]
    error: [EmergencyStop]
}

impl RequestStatus {
    /// `Ready` or `InProgress`: a request holds movement authority.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Ready | Self::InProgress)
    }

    /// The slot holds no request.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::None
    }
}
