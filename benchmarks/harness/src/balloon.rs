//! Memory balloon: pin most of RAM so the page cache cannot absorb writes.
//!
//! Every block is written end to end after allocation so the pages are
//! actually backed, not just reserved.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// One GiB.
pub const GIB: usize = 1 << 30;

/// Blocks allocated when no count is given.
pub const DEFAULT_BLOCKS: usize = 29;

/// Zero-filled blocks held until dropped.
#[derive(Debug, Default)]
pub struct Balloon {
    blocks: Vec<Vec<u8>>,
    block_size: usize,
}

impl Balloon {
    /// Allocate up to `count` blocks of `block_size` bytes, stopping at the
    /// first allocation failure.
    pub fn inflate(count: usize, block_size: usize) -> Self {
        let mut blocks = Vec::with_capacity(count);
        for i in 0..count {
            let mut block = Vec::new();
            if let Err(e) = block.try_reserve_exact(block_size) {
                warn!(allocated = i, requested = count, "out of memory: {e}");
                break;
            }
            block.resize(block_size, 0u8);
            debug!(block = i, "allocated");
            blocks.push(block);
        }
        Self { blocks, block_size }
    }

    /// Number of blocks actually held.
    pub fn blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Total bytes held.
    pub fn bytes(&self) -> u64 {
        (self.blocks.len() * self.block_size) as u64
    }

    /// Keep the memory for `hold`, then release all of it.
    pub fn hold_then_release(self, hold: Duration) -> usize {
        thread::sleep(hold);
        let n = self.blocks.len();
        drop(self);
        n
    }
}
