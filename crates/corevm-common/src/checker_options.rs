//! Checker configuration.
//!
//! Lives in `corevm-common` so both the type system and the checker crates
//! can reference it without a circular dependency.

/// Options controlling the semantic checker and usage analyzer.
#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Enforce that reading `this.x` before `x` is in `initializedFields`
    /// (and before `super()` in a derived constructor) is a
    /// `FIELD_USED_BEFORE_INITIALIZED` diagnostic. When disabled, the
    /// checker still tracks initialization state (usage analysis's field
    /// read/write info depends on it) but does not report it as an error.
    pub strict_property_initialization: bool,

    /// Surface "declared but never used" findings for local (non-exported,
    /// non-top-level) declarations, not just whole-program DCE roots.
    pub no_unused_locals: bool,

    /// Surface "declared but never used" findings for function parameters.
    pub no_unused_parameters: bool,

    /// Suppress `RETURN_OUTSIDE_FUNCTION`-adjacent unreachable-code
    /// diagnostics after an unconditional `return`/`throw`.
    pub allow_unreachable_code: bool,

    pub max_type_recursion_depth: u32,
    pub max_check_depth: u32,
    pub max_usage_visit_depth: u32,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            strict_property_initialization: true,
            no_unused_locals: false,
            no_unused_parameters: false,
            allow_unreachable_code: false,
            max_type_recursion_depth: crate::limits::MAX_TYPE_RECURSION_DEPTH,
            max_check_depth: crate::limits::MAX_CHECK_DEPTH,
            max_usage_visit_depth: crate::limits::MAX_USAGE_VISIT_DEPTH,
        }
    }
}

impl CheckerOptions {
    /// The "strict" bundle: every opt-in diagnostic category turned on.
    /// Mirrors `CheckerOptions::apply_strict_defaults` in spirit (OR-ing a
    /// family of flags on rather than replacing the whole struct).
    pub fn strict() -> Self {
        Self {
            strict_property_initialization: true,
            no_unused_locals: true,
            no_unused_parameters: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_turns_on_unused_checks() {
        let opts = CheckerOptions::strict();
        assert!(opts.no_unused_locals);
        assert!(opts.no_unused_parameters);
    }
}
