//! # Fixed-Block Arena
//!
//! `ObjectHeap<T>` reserves a fixed number of blocks up front and hands them
//! out through an O(1) stack of free block indices. Handles carry a
//! generation so a freed or recycled block is never reachable through an old
//! handle.

use crate::error::{KernelError, KernelResult};

/// Generation-checked reference to a block in an [`ObjectHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// Block index this handle points at.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Generation the block had when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Block<T> {
    generation: u32,
    value: Option<T>,
}

/// Fixed-capacity block allocator.
///
/// # Example
///
/// ```rust
/// use geometry_kernel::epa::ObjectHeap;
///
/// let mut heap = ObjectHeap::with_capacity(2);
/// let a = heap.allocate("a").unwrap();
/// let _b = heap.allocate("b").unwrap();
/// assert!(heap.allocate("c").is_err());
///
/// heap.deallocate(a).unwrap();
/// assert!(heap.deallocate(a).is_err());
/// ```
#[derive(Debug)]
pub struct ObjectHeap<T> {
    blocks: Vec<Block<T>>,
    free_stack: Vec<u32>,
}

impl<T> ObjectHeap<T> {
    /// Largest number of blocks a heap can address.
    pub const MAX_CAPACITY: usize = u32::MAX as usize;

    /// Creates a heap with `capacity` blocks, all free.
    ///
    /// Block indices are `u32`, so the capacity is clamped to
    /// [`ObjectHeap::MAX_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(Self::MAX_CAPACITY);
        let blocks = (0..capacity)
            .map(|_| Block {
                generation: 0,
                value: None,
            })
            .collect();
        // Lowest index on top so allocation order is deterministic
        let free_stack = (0..capacity)
            .filter_map(|index| u32::try_from(index).ok())
            .rev()
            .collect();
        Self { blocks, free_stack }
    }

    /// Total number of blocks.
    pub fn capacity(&self) -> usize {
        self.blocks.len()
    }

    /// Number of blocks currently holding a value.
    pub fn live_count(&self) -> usize {
        self.blocks.len() - self.free_stack.len()
    }

    /// Number of blocks available for allocation.
    pub fn free_count(&self) -> usize {
        self.free_stack.len()
    }

    /// Stores `value` in a free block.
    ///
    /// Fails with [`KernelError::ArenaExhausted`] when no block is free.
    pub fn allocate(&mut self, value: T) -> KernelResult<Handle> {
        let index = self.free_stack.pop().ok_or(KernelError::ArenaExhausted {
            capacity: self.blocks.len(),
        })?;
        let block = &mut self.blocks[index as usize];
        block.value = Some(value);
        Ok(Handle {
            index,
            generation: block.generation,
        })
    }

    /// Frees the block behind `handle` and returns its value.
    ///
    /// Fails with [`KernelError::InvalidHandle`] for out-of-range, stale or
    /// already freed handles.
    pub fn deallocate(&mut self, handle: Handle) -> KernelResult<T> {
        let invalid = KernelError::InvalidHandle {
            index: handle.index as usize,
            generation: handle.generation,
        };
        let Some(block) = self.blocks.get_mut(handle.index as usize) else {
            return Err(invalid);
        };
        if block.generation != handle.generation {
            return Err(invalid);
        }
        let value = block.value.take().ok_or(invalid)?;
        block.generation = block.generation.wrapping_add(1);
        self.free_stack.push(handle.index);
        Ok(value)
    }

    /// Value behind `handle`, if the handle is still live.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.blocks
            .get(handle.index as usize)
            .filter(|block| block.generation == handle.generation)
            .and_then(|block| block.value.as_ref())
    }

    /// Frees every block, invalidating all outstanding handles.
    pub fn clear(&mut self) {
        self.free_stack.clear();
        for (index, block) in self.blocks.iter_mut().enumerate().rev() {
            if block.value.take().is_some() {
                block.generation = block.generation.wrapping_add(1);
            }
            self.free_stack.push(index as u32);
        }
    }
}
