//! Positional lookups of argument values in an invocation record.

use std::fmt;

use crate::error::LinkError;
use crate::invocation::InvocationRecord;
use crate::value::ArgValue;

/// The argument list an accessor indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgSource {
    /// Resolved object arguments
    Object,
    /// Raw method arguments
    Argument,
}

impl fmt::Display for ArgSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => write!(f, "object argument"),
            Self::Argument => write!(f, "method argument"),
        }
    }
}

/// Resolves the current value of a bound argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamAccessor {
    /// Index into the resolved object arguments
    Object(usize),
    /// Index into the raw method arguments
    Argument(usize),
}

impl ParamAccessor {
    /// Looks the value up in `invocation`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::AccessorOutOfRange`] if the index is past the
    /// end of its argument list, which means the template was compiled for
    /// a different method.
    pub fn get<'a>(&self, invocation: &InvocationRecord<'a>) -> Result<&'a ArgValue, LinkError> {
        let (source, index, values) = match *self {
            Self::Object(index) => (ArgSource::Object, index, invocation.object_arguments()),
            Self::Argument(index) => (ArgSource::Argument, index, invocation.raw_arguments()),
        };
        values.get(index).ok_or(LinkError::AccessorOutOfRange {
            source,
            index,
            len: values.len(),
        })
    }
}

impl fmt::Display for ParamAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(index) => write!(f, "obj{index}"),
            Self::Argument(index) => write!(f, "arg{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::invocation::MethodInvocation;
    use crate::meta::{ControllerMeta, MethodMeta};

    fn invocation() -> MethodInvocation {
        MethodInvocation::new(
            Arc::new(ControllerMeta::new("Sample")),
            Arc::new(MethodMeta::builder("Sample", "show").build()),
            vec![1_i64.into(), ArgValue::Null],
        )
    }

    #[test]
    fn argument_lookup() {
        let invocation = invocation();
        let objects: [ArgValue; 1] = ["first".into()];
        let record = InvocationRecord::new(&invocation, &objects);

        assert!(matches!(ParamAccessor::Argument(0).get(&record), Ok(ArgValue::Long(1))));
        assert!(matches!(ParamAccessor::Argument(1).get(&record), Ok(ArgValue::Null)));
        assert!(matches!(ParamAccessor::Object(0).get(&record), Ok(ArgValue::Str(s)) if s == "first"));
    }

    #[test]
    fn out_of_range_is_reported() {
        let invocation = invocation();
        let record = InvocationRecord::new(&invocation, &[]);

        assert_eq!(
            ParamAccessor::Object(0).get(&record).unwrap_err(),
            LinkError::AccessorOutOfRange {
                source: ArgSource::Object,
                index: 0,
                len: 0,
            }
        );
        assert!(ParamAccessor::Argument(2).get(&record).is_err());
    }
}
