//! Stack growth for deep recursion.
//!
//! The parser descends once per nesting level of an expression, and the
//! interpreter recurses once per nested expression and once per user
//! function call. A Garnet program like `def f(n) return f(n - 1) end`
//! would otherwise abort the host process with a native stack overflow.
//!
//! On native targets [`ensure_sufficient_stack`] checks how much stack is
//! left and, when below [`RED_ZONE`], switches to a freshly allocated
//! segment of [`GROWTH`] bytes before running the closure. On `wasm32` it
//! calls the closure directly.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// Wrap the body of any function that recurses on input-controlled depth.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
