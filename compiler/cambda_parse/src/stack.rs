//! Stack safety for deep recursion.
//!
//! Deeply nested source (`((((...))))`) recurses once per level in both the
//! parser and the resolver. On native targets the stack is grown on demand
//! with `stacker`; on WASM the closure is called directly.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
