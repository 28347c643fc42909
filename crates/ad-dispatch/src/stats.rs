//! Running session statistics.

/// Totals accumulated over a dispatch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    /// Requests that got an ambulance.
    pub served:         u64,
    /// Requests dropped because no ambulance could reach them.
    pub unassigned:     u64,
    /// Sum of reported (base) distances over served requests.
    pub total_distance: u64,
}

impl SessionStats {
    pub fn record_served(&mut self, distance: u64) {
        self.served += 1;
        self.total_distance += distance;
    }

    pub fn record_unassigned(&mut self) {
        self.unassigned += 1;
    }

    /// Integer mean distance per served request; `None` before the first.
    pub fn average_distance(&self) -> Option<u64> {
        (self.served > 0).then(|| self.total_distance / self.served)
    }
}
