//! Aligned heap storage for render-node buffers.
//!
//! Blocks start at an address that is a multiple of a caller-chosen power of
//! two. Allocation never fails from the caller's point of view:
//!
//! - a size computation `count * element_size` that overflows `usize`,
//! - an alignment that is not a power of two,
//! - the system allocator running out of memory,
//!
//! all terminate the process. Sizes come from internal scene-graph
//! bookkeeping, so any of these is a bug or unrecoverable exhaustion, and
//! continuing with a truncated block would corrupt memory.
//!
//! A block must be released through [`aligned_free`] (or by dropping it),
//! which uses the layout it was allocated with.

use std::alloc::{self, Layout};
use std::fmt;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

/// Log and abort. Used for programmer errors in size or alignment.
#[cold]
fn fatal(message: fmt::Arguments<'_>) -> ! {
    log::error!("aligned allocation: {message}");
    std::process::abort()
}

/// An owned, aligned heap block.
///
/// The block spans at least `element_size * count` bytes; the allocation is
/// rounded up to a multiple of the alignment.
pub struct AlignedBlock {
    ptr: NonNull<u8>,
    layout: Layout,
    len: usize,
}

// SAFETY: the block exclusively owns plain bytes with no thread affinity.
unsafe impl Send for AlignedBlock {}
// SAFETY: shared access only hands out `*const u8`.
unsafe impl Sync for AlignedBlock {}

impl AlignedBlock {
    fn allocate(element_size: usize, count: usize, alignment: usize, zeroed: bool) -> Self {
        let Some(len) = element_size.checked_mul(count) else {
            fatal(format_args!(
                "overflow computing size of {count} elements of {element_size} bytes"
            ));
        };

        // Zero-sized requests still get a real, aligned allocation.
        let layout = match Layout::from_size_align(len.max(1), alignment) {
            Ok(layout) => layout.pad_to_align(),
            Err(_) => fatal(format_args!(
                "invalid request of {len} bytes aligned to {alignment}"
            )),
        };

        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe {
            if zeroed {
                alloc::alloc_zeroed(layout)
            } else {
                alloc::alloc(layout)
            }
        };
        let Some(ptr) = NonNull::new(raw) else {
            log::error!("aligned allocation of {} bytes failed", layout.size());
            alloc::handle_alloc_error(layout);
        };

        log::trace!(
            "allocated {} bytes at {:p} (align {alignment}, zeroed: {zeroed})",
            layout.size(),
            ptr
        );
        Self { ptr, layout, len }
    }

    /// Requested size in bytes: `element_size * count`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes actually reserved, a multiple of the alignment.
    pub fn capacity(&self) -> usize {
        self.layout.size()
    }

    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// The requested bytes, possibly uninitialized.
    pub fn as_uninit_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        // SAFETY: the allocation holds at least `len` bytes and we hold the
        // only reference; `MaybeUninit` makes no initialization claim.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.len) }
    }
}

impl Drop for AlignedBlock {
    fn drop(&mut self) {
        // SAFETY: `ptr` was returned by the global allocator for `layout`.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

impl fmt::Debug for AlignedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBlock")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("alignment", &self.alignment())
            .finish()
    }
}

/// Allocate `element_size * count` bytes aligned to `alignment`.
///
/// Aborts the process on size overflow, on a non-power-of-two alignment and
/// when memory is exhausted.
pub fn aligned_alloc(element_size: usize, count: usize, alignment: usize) -> AlignedBlock {
    AlignedBlock::allocate(element_size, count, alignment, false)
}

/// Like [`aligned_alloc`], with the block zero-filled.
pub fn aligned_alloc_zeroed(element_size: usize, count: usize, alignment: usize) -> AlignedBlock {
    AlignedBlock::allocate(element_size, count, alignment, true)
}

/// Release a block from [`aligned_alloc`] or [`aligned_alloc_zeroed`].
pub fn aligned_free(block: AlignedBlock) {
    log::trace!("freeing {} bytes at {:p}", block.capacity(), block.as_ptr());
    drop(block);
}
