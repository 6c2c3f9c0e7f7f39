//! Centralized recursion/resource limits.
//!
//! Every recursive entry point (substitution, instantiation, assignability,
//! expression checking, the usage reference visitor) is bounded by one of
//! these constants rather than left to overflow the native stack on a
//! pathological (or malicious) input.

/// Maximum recursion depth for `substitute`/`instantiate`/`isAssignableTo`
/// over compound types. A legitimate program's deepest generic nesting is
/// nowhere near this; it exists to turn a cyclic-type bug into a bounded
/// diagnostic instead of a stack overflow.
pub const MAX_TYPE_RECURSION_DEPTH: u32 = 256;

/// Maximum recursion depth for expression/statement checking.
pub const MAX_CHECK_DEPTH: u32 = 512;

/// Maximum recursion depth for the usage analyzer's reference visitor.
pub const MAX_USAGE_VISIT_DEPTH: u32 = 512;

/// Maximum number of worklist iterations before usage analysis gives up
/// and treats the remainder of the program as used (conservative
/// fallback). Guards against a corrupt `subclasses`/`implements` cycle
/// turning the worklist into an infinite loop.
pub const MAX_USAGE_WORKLIST_ITERATIONS: usize = 1_000_000;
