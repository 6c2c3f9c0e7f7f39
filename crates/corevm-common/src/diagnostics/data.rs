//! The fixed diagnostic code/message enumeration.
//!
//! Codes are grouped by error taxonomy (resolution, type, arity,
//! mutability, semantic, inference, internal). The set is meant to stay
//! fixed — implementers of the code generator downstream match on these
//! numerically, so codes are never renumbered, only added to.

use super::DiagnosticMessage;
use crate::diagnostics::DiagnosticCategory;

pub mod diagnostic_codes {
    // Resolution errors (1000s)
    pub const SYMBOL_NOT_FOUND: u32 = 1001;
    pub const PRIVATE_MEMBER_ACCESS_VIOLATION: u32 = 1002;

    // Type errors (2000s)
    pub const TYPE_MISMATCH: u32 = 2001;
    pub const NOT_INDEXABLE: u32 = 2002;
    pub const PROPERTY_NOT_FOUND: u32 = 2003;
    pub const INVALID_UNION_MEMBER: u32 = 2004;
    pub const DISTINCT_ALIAS_VIOLATION: u32 = 2005;
    pub const INDEX_OUT_OF_BOUNDS: u32 = 2006;

    // Arity errors (3000s)
    pub const ARGUMENT_COUNT_MISMATCH: u32 = 3001;
    pub const GENERIC_TYPE_ARGUMENT_MISMATCH: u32 = 3002;
    pub const OPERATOR_ARITY_MISMATCH: u32 = 3003;

    // Mutability errors (4000s)
    pub const INVALID_ASSIGNMENT: u32 = 4001;

    // Semantic errors (5000s)
    pub const DUPLICATE_DECLARATION: u32 = 5001;
    pub const CANNOT_INSTANTIATE_ABSTRACT_CLASS: u32 = 5002;
    pub const THIS_BEFORE_SUPER: u32 = 5003;
    pub const RETURN_OUTSIDE_FUNCTION: u32 = 5004;
    pub const ABSTRACT_FIELD_NOT_IMPLEMENTED: u32 = 5005;
    pub const FIELD_USED_BEFORE_INITIALIZED: u32 = 5006;
    pub const INVALID_SUPER_CALL: u32 = 5007;

    // Inference failures (6000s)
    pub const CANNOT_INFER_TYPE_ARGUMENT: u32 = 6001;

    // Internal errors (9000s)
    pub const INTERNAL_COMPILER_ERROR: u32 = 9001;
}

pub mod diagnostic_messages {
    use super::diagnostic_codes::*;
    use super::{DiagnosticCategory, DiagnosticMessage};

    pub const SYMBOL_NOT_FOUND: DiagnosticMessage = DiagnosticMessage {
        code: SYMBOL_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: "Cannot find name '{0}'.",
    };
    pub const PRIVATE_MEMBER_ACCESS_VIOLATION: DiagnosticMessage = DiagnosticMessage {
        code: PRIVATE_MEMBER_ACCESS_VIOLATION,
        category: DiagnosticCategory::Error,
        message: "Property '{0}' is private and only accessible within class '{1}'.",
    };
    pub const TYPE_MISMATCH: DiagnosticMessage = DiagnosticMessage {
        code: TYPE_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Type '{0}' is not assignable to type '{1}'.",
    };
    pub const NOT_INDEXABLE: DiagnosticMessage = DiagnosticMessage {
        code: NOT_INDEXABLE,
        category: DiagnosticCategory::Error,
        message: "Type '{0}' cannot be indexed.",
    };
    pub const PROPERTY_NOT_FOUND: DiagnosticMessage = DiagnosticMessage {
        code: PROPERTY_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: "Property '{0}' does not exist on type '{1}'.",
    };
    pub const INVALID_UNION_MEMBER: DiagnosticMessage = DiagnosticMessage {
        code: INVALID_UNION_MEMBER,
        category: DiagnosticCategory::Error,
        message: "Type '{0}' cannot be a member of this union.",
    };
    pub const DISTINCT_ALIAS_VIOLATION: DiagnosticMessage = DiagnosticMessage {
        code: DISTINCT_ALIAS_VIOLATION,
        category: DiagnosticCategory::Error,
        message: "Type '{0}' is a distinct alias and is not assignable to or from '{1}'.",
    };
    pub const INDEX_OUT_OF_BOUNDS: DiagnosticMessage = DiagnosticMessage {
        code: INDEX_OUT_OF_BOUNDS,
        category: DiagnosticCategory::Error,
        message: "Index is out of bounds.",
    };
    pub const ARGUMENT_COUNT_MISMATCH: DiagnosticMessage = DiagnosticMessage {
        code: ARGUMENT_COUNT_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Expected {0} arguments, but got {1}.",
    };
    pub const GENERIC_TYPE_ARGUMENT_MISMATCH: DiagnosticMessage = DiagnosticMessage {
        code: GENERIC_TYPE_ARGUMENT_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Expected {0} type arguments, but got {1}.",
    };
    pub const OPERATOR_ARITY_MISMATCH: DiagnosticMessage = DiagnosticMessage {
        code: OPERATOR_ARITY_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Operator method '{0}' must declare exactly {1} parameters.",
    };
    pub const INVALID_ASSIGNMENT: DiagnosticMessage = DiagnosticMessage {
        code: INVALID_ASSIGNMENT,
        category: DiagnosticCategory::Error,
        message: "Cannot assign to '{0}' because it is not declared with 'var'.",
    };
    pub const DUPLICATE_DECLARATION: DiagnosticMessage = DiagnosticMessage {
        code: DUPLICATE_DECLARATION,
        category: DiagnosticCategory::Error,
        message: "Duplicate declaration '{0}'.",
    };
    pub const CANNOT_INSTANTIATE_ABSTRACT_CLASS: DiagnosticMessage = DiagnosticMessage {
        code: CANNOT_INSTANTIATE_ABSTRACT_CLASS,
        category: DiagnosticCategory::Error,
        message: "Cannot create an instance of abstract class '{0}'.",
    };
    pub const THIS_BEFORE_SUPER: DiagnosticMessage = DiagnosticMessage {
        code: THIS_BEFORE_SUPER,
        category: DiagnosticCategory::Error,
        message: "'this' cannot be referenced before 'super()' is called.",
    };
    pub const RETURN_OUTSIDE_FUNCTION: DiagnosticMessage = DiagnosticMessage {
        code: RETURN_OUTSIDE_FUNCTION,
        category: DiagnosticCategory::Error,
        message: "A 'return' statement can only be used within a function body.",
    };
    pub const ABSTRACT_FIELD_NOT_IMPLEMENTED: DiagnosticMessage = DiagnosticMessage {
        code: ABSTRACT_FIELD_NOT_IMPLEMENTED,
        category: DiagnosticCategory::Error,
        message: "Non-abstract class '{0}' does not implement inherited abstract member '{1}'.",
    };
    pub const FIELD_USED_BEFORE_INITIALIZED: DiagnosticMessage = DiagnosticMessage {
        code: FIELD_USED_BEFORE_INITIALIZED,
        category: DiagnosticCategory::Error,
        message: "Field '{0}' is used before being initialized.",
    };
    pub const INVALID_SUPER_CALL: DiagnosticMessage = DiagnosticMessage {
        code: INVALID_SUPER_CALL,
        category: DiagnosticCategory::Error,
        message: "'super(...)' can only be called as the first statement of a constructor whose class has a superclass.",
    };
    pub const CANNOT_INFER_TYPE_ARGUMENT: DiagnosticMessage = DiagnosticMessage {
        code: CANNOT_INFER_TYPE_ARGUMENT,
        category: DiagnosticCategory::Error,
        message: "Could not infer type argument for '{0}'.",
    };
    pub const INTERNAL_COMPILER_ERROR: DiagnosticMessage = DiagnosticMessage {
        code: INTERNAL_COMPILER_ERROR,
        category: DiagnosticCategory::Error,
        message: "Internal compiler error: {0}.",
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::SYMBOL_NOT_FOUND,
    diagnostic_messages::PRIVATE_MEMBER_ACCESS_VIOLATION,
    diagnostic_messages::TYPE_MISMATCH,
    diagnostic_messages::NOT_INDEXABLE,
    diagnostic_messages::PROPERTY_NOT_FOUND,
    diagnostic_messages::INVALID_UNION_MEMBER,
    diagnostic_messages::DISTINCT_ALIAS_VIOLATION,
    diagnostic_messages::INDEX_OUT_OF_BOUNDS,
    diagnostic_messages::ARGUMENT_COUNT_MISMATCH,
    diagnostic_messages::GENERIC_TYPE_ARGUMENT_MISMATCH,
    diagnostic_messages::OPERATOR_ARITY_MISMATCH,
    diagnostic_messages::INVALID_ASSIGNMENT,
    diagnostic_messages::DUPLICATE_DECLARATION,
    diagnostic_messages::CANNOT_INSTANTIATE_ABSTRACT_CLASS,
    diagnostic_messages::THIS_BEFORE_SUPER,
    diagnostic_messages::RETURN_OUTSIDE_FUNCTION,
    diagnostic_messages::ABSTRACT_FIELD_NOT_IMPLEMENTED,
    diagnostic_messages::FIELD_USED_BEFORE_INITIALIZED,
    diagnostic_messages::INVALID_SUPER_CALL,
    diagnostic_messages::CANNOT_INFER_TYPE_ARGUMENT,
    diagnostic_messages::INTERNAL_COMPILER_ERROR,
];
