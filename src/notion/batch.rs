//! Batch planning for the Notion API's 100-children-per-call cap.

/// Maximum children Notion accepts in one page-create or append call.
pub const MAX_BLOCKS_PER_CALL: usize = 100;

/// A publishing schedule for a block sequence: the first call creates the
/// page with up to 100 blocks, every later call appends up to 100 more.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan<T> {
    /// Blocks sent with the page-creation call.
    pub create: Vec<T>,

    /// Remaining blocks, in append calls of at most 100.
    pub appends: Vec<Vec<T>>,
}

impl<T> BatchPlan<T> {
    pub fn new(blocks: Vec<T>) -> Self {
        let mut iter = blocks.into_iter();
        let create: Vec<T> = iter.by_ref().take(MAX_BLOCKS_PER_CALL).collect();

        let mut appends: Vec<Vec<T>> = Vec::new();
        loop {
            let batch: Vec<T> = iter.by_ref().take(MAX_BLOCKS_PER_CALL).collect();
            if batch.is_empty() {
                break;
            }
            appends.push(batch);
        }

        Self { create, appends }
    }

    /// Total number of blocks across all calls.
    pub fn total(&self) -> usize {
        self.create.len() + self.appends.iter().map(Vec::len).sum::<usize>()
    }
}
