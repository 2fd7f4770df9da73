//! Aligned allocations for buffers handed to the engine.
//!
//! Owned pixel copies and duplicated byte payloads live in a [`RawAlloc`]
//! aligned to 64 bytes, which keeps row starts friendly to the engine's
//! vectorised scanners.

use core::alloc::{Layout, LayoutError};
use safe_allocator_api::RawAlloc;
use safe_allocator_api::allocator_api::*;
use thiserror::Error;

/// Alignment of every owned buffer passed across the boundary.
pub const BUFFER_ALIGNMENT: usize = 64;

/// An error that happened in memory allocation.
#[derive(Debug, Error)]
pub enum AllocateError {
    /// The requested size cannot form a valid layout.
    #[error(transparent)]
    LayoutError(#[from] LayoutError),

    /// The allocator returned no memory.
    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}

/// Allocates `num_bytes` of uninitialized memory aligned to [`BUFFER_ALIGNMENT`].
pub fn allocate_align_64(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let layout = Layout::from_size_align(num_bytes, BUFFER_ALIGNMENT)?;
    Ok(RawAlloc::new(layout)?)
}

/// Allocates an aligned buffer holding a copy of `data`.
///
/// `data` must not be empty; zero-sized layouts are rejected by the allocator.
pub fn copy_align_64(data: &[u8]) -> Result<RawAlloc, AllocateError> {
    let mut alloc = allocate_align_64(data.len())?;
    // SAFETY: `alloc` is a fresh allocation of exactly `data.len()` bytes which
    // cannot overlap the borrowed source.
    unsafe {
        core::ptr::copy_nonoverlapping(data.as_ptr(), alloc.as_mut_ptr(), data.len());
    }
    Ok(alloc)
}
