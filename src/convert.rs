//! Value-to-text conversion for richly typed arguments.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};

use crate::error::ConversionError;
use crate::meta::{IsoFormat, TypeDescriptor};
use crate::value::ArgValue;

/// Converts an argument value to its canonical text form.
///
/// Used by links for parameters whose declared type is not stringified
/// directly (dates, custom types).
pub trait ValueConverter: Send + Sync {
    /// Converts `value`, declared as `descriptor`, to text.
    ///
    /// Returns `Ok(None)` only for a null value.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if the value cannot be converted.
    fn convert(
        &self,
        value: &ArgValue,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<String>, ConversionError>;
}

/// Default converter: ISO-8601 dates, natural text for scalars.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fast_links::{ArgValue, FormattingConverter, IsoFormat, ParamType, TypeDescriptor, ValueConverter};
///
/// let date = ArgValue::from(NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());
/// let descriptor = TypeDescriptor::new(ParamType::Date).with_format(IsoFormat::DateTime);
///
/// let text = FormattingConverter.convert(&date, &descriptor).unwrap();
/// assert_eq!(text.as_deref(), Some("2015-03-01T00:00:00.000Z"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FormattingConverter;

impl ValueConverter for FormattingConverter {
    fn convert(
        &self,
        value: &ArgValue,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<String>, ConversionError> {
        let text = match value {
            ArgValue::Null => return Ok(None),
            ArgValue::Date(date) => format_date(*date, descriptor.format),
            ArgValue::DateTime(dt) => format_date_time(dt, descriptor.format),
            ArgValue::Str(s) => s.clone(),
            ArgValue::Bool(b) => b.to_string(),
            ArgValue::Int(i) => i.to_string(),
            ArgValue::Long(l) => l.to_string(),
            ArgValue::Enum(e) => e.name().to_string(),
            ArgValue::Array(_) | ArgValue::List(_) | ArgValue::Map(_) | ArgValue::Opaque(_) => {
                return Err(ConversionError {
                    type_name: descriptor.ty.type_name(),
                    reason: format!("no converter for {} values", value.kind_name()),
                });
            }
        };
        Ok(Some(text))
    }
}

impl<F> ValueConverter for F
where
    F: Fn(&ArgValue, &TypeDescriptor) -> Result<Option<String>, ConversionError> + Send + Sync,
{
    fn convert(
        &self,
        value: &ArgValue,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<String>, ConversionError> {
        self(value, descriptor)
    }
}

/// Formats a date; without a hint as an ISO date.
pub(crate) fn format_date(date: NaiveDate, format: Option<IsoFormat>) -> String {
    match format {
        Some(IsoFormat::DateTime) => date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        Some(IsoFormat::Date) | None => date.format("%Y-%m-%d").to_string(),
    }
}

/// Formats an instant; without a hint as RFC 3339 with milliseconds.
pub(crate) fn format_date_time(dt: &DateTime<FixedOffset>, format: Option<IsoFormat>) -> String {
    match format {
        Some(IsoFormat::Date) => format_date(dt.date_naive(), Some(IsoFormat::Date)),
        Some(IsoFormat::DateTime) | None => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::meta::ParamType;
    use crate::value::EnumValue;

    fn moment() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2015, 3, 1, 12, 30, 5)
            .unwrap()
    }

    #[test]
    fn null_converts_to_none() {
        let descriptor = TypeDescriptor::new(ParamType::Date);
        assert_eq!(FormattingConverter.convert(&ArgValue::Null, &descriptor), Ok(None));
    }

    #[test]
    fn date_time_as_date() {
        let descriptor = TypeDescriptor::new(ParamType::DateTime).with_format(IsoFormat::Date);
        let text = FormattingConverter.convert(&ArgValue::from(moment()), &descriptor).unwrap();
        assert_eq!(text.as_deref(), Some("2015-03-01"));
    }

    #[test]
    fn date_time_keeps_offset() {
        let descriptor = TypeDescriptor::new(ParamType::DateTime).with_format(IsoFormat::DateTime);
        let text = FormattingConverter.convert(&ArgValue::from(moment()), &descriptor).unwrap();
        assert_eq!(text.as_deref(), Some("2015-03-01T12:30:05.000+01:00"));
    }

    #[test]
    fn utc_uses_zulu() {
        let utc = chrono::Utc.with_ymd_and_hms(2015, 3, 1, 0, 0, 0).unwrap();
        let descriptor = TypeDescriptor::new(ParamType::DateTime);
        let text = FormattingConverter.convert(&ArgValue::from(utc), &descriptor).unwrap();
        assert_eq!(text.as_deref(), Some("2015-03-01T00:00:00.000Z"));
    }

    #[test]
    fn enum_converts_to_name() {
        let descriptor = TypeDescriptor::new(ParamType::Other("Status".to_string()));
        let value: ArgValue = EnumValue::with_text("ACTIVE", "Active!").into();
        let text = FormattingConverter.convert(&value, &descriptor).unwrap();
        assert_eq!(text.as_deref(), Some("ACTIVE"));
    }

    #[test]
    fn opaque_needs_custom_converter() {
        let descriptor = TypeDescriptor::new(ParamType::Other("Money".to_string()));
        let result = FormattingConverter.convert(&ArgValue::opaque(12_u8), &descriptor);
        assert_eq!(result.unwrap_err().type_name, "Money");
    }

    #[test]
    fn closure_converter_downcasts_opaque() {
        struct Money(u32);
        let converter = |value: &ArgValue, _: &TypeDescriptor| match value {
            ArgValue::Opaque(any) => Ok::<_, ConversionError>(
                any.downcast_ref::<Money>().map(|m| format!("{}EUR", m.0)),
            ),
            _ => Ok(None),
        };
        let descriptor = TypeDescriptor::new(ParamType::Other("Money".to_string()));
        let text = converter.convert(&ArgValue::opaque(Money(12)), &descriptor).unwrap();
        assert_eq!(text.as_deref(), Some("12EUR"));
    }
}
