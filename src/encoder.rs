//! Encoding of single argument values into link text.

use crate::charset::SegmentKind;
use crate::convert::ValueConverter;
use crate::error::EncodeError;
use crate::meta::TypeDescriptor;
use crate::value::ArgValue;

/// Strategy turning one argument value into text for a segment kind.
///
/// Chosen once at compile time from the parameter's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoder {
    /// Stringifies the value directly (strings, enums, scalars, arrays, collections)
    Direct(SegmentKind),
    /// Delegates to the [`ValueConverter`]
    Converted(SegmentKind, TypeDescriptor),
    /// Refuses every non-null value (maps)
    Unsupported(TypeDescriptor),
}

impl Encoder {
    /// Chooses the strategy for a parameter declared as `descriptor`.
    #[must_use]
    pub fn for_parameter(descriptor: &TypeDescriptor, kind: SegmentKind) -> Self {
        if descriptor.ty.is_simple() {
            Self::Direct(kind)
        } else if descriptor.ty.is_unsupported() {
            Self::Unsupported(descriptor.clone())
        } else {
            Self::Converted(kind, descriptor.clone())
        }
    }

    /// Encodes `value`; a null value encodes to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Rejected`] if the text contains characters not
    /// allowed in the segment, [`EncodeError::Unsupported`] for a non-null
    /// value of an unsupported type, or the conversion failure.
    pub fn encode(
        &self,
        value: &ArgValue,
        converter: &dyn ValueConverter,
    ) -> Result<Option<String>, EncodeError> {
        if value.is_null() {
            return Ok(None);
        }

        let (text, kind) = match self {
            Self::Direct(kind) => (value.to_link_string()?, *kind),
            Self::Converted(kind, descriptor) => match converter.convert(value, descriptor)? {
                Some(text) => (text, *kind),
                None => return Ok(None),
            },
            Self::Unsupported(descriptor) => {
                return Err(EncodeError::Unsupported {
                    type_name: descriptor.ty.type_name(),
                });
            }
        };

        verify(text, kind).map(Some)
    }
}

fn verify(value: String, kind: SegmentKind) -> Result<String, EncodeError> {
    match kind.first_disallowed(&value) {
        None => Ok(value),
        Some((position, character)) => Err(EncodeError::Rejected {
            value,
            kind,
            position,
            character,
        }),
    }
}
