// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Fatal errors of the branch-and-bound engine.
//!
//! Both variants abort a solve immediately. An infeasible instance is not an
//! error; it is reported through the outcome.

/// Errors that abort a branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BnbError {
    /// A checked addition, subtraction or multiplication left the range of the cost type.
    #[error("arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    /// The incremental state was asked to do something that only a broken
    /// traversal could ask for, such as removing a customer out of order.
    #[error("search invariant violated: {context}")]
    InvariantViolation { context: String },
}

impl BnbError {
    #[inline]
    pub(crate) fn overflow<S>(context: S) -> Self
    where
        S: Into<String>,
    {
        Self::ArithmeticOverflow {
            context: context.into(),
        }
    }

    #[inline]
    pub(crate) fn invariant<S>(context: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvariantViolation {
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            BnbError::overflow("stage cost").to_string(),
            "arithmetic overflow in stage cost"
        );
        assert_eq!(
            BnbError::invariant("stack order").to_string(),
            "search invariant violated: stack order"
        );
    }
}
