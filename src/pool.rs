//! Fixed-block slab allocator backed by page-granularity OS mappings.
//!
//! Holders are small and short-lived in bulk (a large document parses into
//! thousands of them), so we avoid round-tripping every one through the
//! global allocator. Each block carries a one-word header recording its
//! payload size: `0` means the block came from this pool's free list (its
//! real size is `SIZE`, implied by the `Pool` it was handed out from),
//! anything else is the payload size of a foreign block obtained straight
//! from the system allocator. `free` reads the header to decide where the
//! memory goes back to, and to reconstruct the exact `Layout` a foreign
//! block needs for `dealloc`.

use std::alloc::{alloc, dealloc, Layout};
use std::cell::Cell;
use std::mem;
use std::ptr::{self, NonNull};

const PAGE_SIZE: usize = 4096;
const POOL_TAG: usize = 0;

#[repr(C)]
struct BlockHeader {
    /// 0 for a pool-owned block; otherwise the foreign block's payload size.
    foreign_size: usize,
}

struct FreeNode {
    next: *mut FreeNode,
}

/// A thread-local pool of fixed-size blocks, one instance per `SIZE`.
///
/// `SIZE` is the payload size requested by callers; the actual allocation
/// carries one extra `usize` header in front of it.
pub struct Pool<const SIZE: usize> {
    free_list: Cell<*mut FreeNode>,
}

impl<const SIZE: usize> Pool<SIZE> {
    const HEADER_SIZE: usize = mem::size_of::<BlockHeader>();

    const fn payload_size() -> usize {
        // Round up to pointer alignment so a FreeNode fits in the payload.
        let align = mem::align_of::<usize>();
        (SIZE + align - 1) / align * align
    }

    const fn block_size() -> usize {
        Self::HEADER_SIZE + Self::payload_size()
    }

    pub const fn new() -> Self {
        Pool {
            free_list: Cell::new(ptr::null_mut()),
        }
    }

    /// Allocates one `SIZE`-byte block. Never returns a null pointer; an OS
    /// mapping failure is treated as fatal, matching the allocator this is
    /// modeled on.
    ///
    /// # Safety
    /// The returned pointer must be passed to [`free`](Self::free) (not the
    /// global allocator) exactly once.
    pub unsafe fn alloc(&self) -> NonNull<u8> {
        if self.free_list.get().is_null() {
            self.refill();
        }
        let node = self.free_list.get();
        self.free_list.set((*node).next);
        let header = node as *mut BlockHeader;
        (*header).foreign_size = POOL_TAG;
        let payload = (header as *mut u8).add(Self::HEADER_SIZE);
        NonNull::new_unchecked(payload)
    }

    /// Allocates a single block directly from the system allocator of
    /// `payload_len` bytes, tagged foreign so `free` routes it back to
    /// `dealloc` instead of this pool's free list. Used for variable-sized
    /// payloads (e.g. a committed string buffer) that don't fit `SIZE`.
    pub fn alloc_foreign(payload_len: usize) -> NonNull<u8> {
        assert!(payload_len > 0, "foreign allocation must be nonempty");
        let layout = Layout::from_size_align(Self::HEADER_SIZE + payload_len, mem::align_of::<usize>())
            .expect("foreign layout");
        unsafe {
            let raw = alloc(layout);
            if raw.is_null() {
                std::alloc::handle_alloc_error(layout);
            }
            let header = raw as *mut BlockHeader;
            (*header).foreign_size = payload_len;
            NonNull::new_unchecked(raw.add(Self::HEADER_SIZE))
        }
    }

    /// Returns a block previously obtained from [`alloc`](Self::alloc) or
    /// [`alloc_foreign`](Self::alloc_foreign) back to wherever it came from.
    ///
    /// # Safety
    /// `ptr` must have come from this `Pool<SIZE>`, and must not be used
    /// again afterward.
    pub unsafe fn free(&self, ptr: NonNull<u8>) {
        let header = ptr.as_ptr().sub(Self::HEADER_SIZE) as *mut BlockHeader;
        let foreign_size = (*header).foreign_size;
        if foreign_size == POOL_TAG {
            let node = header as *mut FreeNode;
            (*node).next = self.free_list.get();
            self.free_list.set(node);
        } else {
            let layout =
                Layout::from_size_align(Self::HEADER_SIZE + foreign_size, mem::align_of::<usize>())
                    .expect("foreign layout");
            dealloc(header as *mut u8, layout);
        }
    }

    unsafe fn refill(&self) {
        let pages = (Self::block_size() + PAGE_SIZE - 1) / PAGE_SIZE;
        let region_size = pages.max(1) * PAGE_SIZE;
        let region = map_pages(region_size);
        let block_count = region_size / Self::block_size();
        let mut head: *mut FreeNode = ptr::null_mut();
        for i in (0..block_count).rev() {
            let block = region.add(i * Self::block_size()) as *mut FreeNode;
            (*block).next = head;
            head = block;
        }
        self.free_list.set(head);
    }
}

impl<const SIZE: usize> Default for Pool<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
unsafe fn map_pages(len: usize) -> *mut u8 {
    let addr = libc::mmap(
        ptr::null_mut(),
        len,
        libc::PROT_READ | libc::PROT_WRITE,
        libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
        -1,
        0,
    );
    if addr == libc::MAP_FAILED {
        panic!("lightning-json: mmap failed while growing pool");
    }
    addr as *mut u8
}

#[cfg(not(unix))]
unsafe fn map_pages(len: usize) -> *mut u8 {
    let layout = Layout::from_size_align(len, PAGE_SIZE).expect("page layout");
    let raw = alloc(layout);
    if raw.is_null() {
        std::alloc::handle_alloc_error(layout);
    }
    raw
}
