use std::ops::AddAssign;

/// Tally of the mutations applied during a sweep.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurationStats {
    pub tagged: usize,
    pub rolled_over: usize,
    pub aliases_deleted: usize,
    pub indices_deleted: usize,
    pub skipped: usize,
}

impl AddAssign<CurationStats> for CurationStats {
    fn add_assign(&mut self, rhs: CurationStats) {
        self.tagged += rhs.tagged;
        self.rolled_over += rhs.rolled_over;
        self.aliases_deleted += rhs.aliases_deleted;
        self.indices_deleted += rhs.indices_deleted;
        self.skipped += rhs.skipped;
    }
}
