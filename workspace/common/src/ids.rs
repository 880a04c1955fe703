/// A scoped, 1-based, monotonically increasing id allocator.
///
/// Each entity family with synthetic identity (documents, history lines,
/// KPI data) owns its own sequence for the duration of one run. The
/// sequence is passed explicitly to whatever assigns identity, so identity
/// allocation can be exercised without constructing a whole pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: i64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id. The first call returns 1.
    pub fn next_id(&mut self) -> i64 {
        self.last += 1;
        self.last
    }

    /// The most recently allocated id, or 0 if nothing was allocated yet.
    pub fn last_id(&self) -> i64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_from_one() {
        let mut ids = IdSequence::new();
        assert_eq!(ids.last_id(), 0);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
        assert_eq!(ids.last_id(), 3);
    }

    #[test]
    fn sequences_are_independent() {
        let mut documents = IdSequence::new();
        let mut lines = IdSequence::new();
        documents.next_id();
        documents.next_id();
        assert_eq!(lines.next_id(), 1);
        assert_eq!(documents.last_id(), 2);
    }
}
