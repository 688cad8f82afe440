//! Partial-precision date normalization.
//!
//! Dates arrive as strings like `"2009-09"` plus a strftime-style
//! template like `"%m-%Y"`. The template decides precision: the result
//! always has a year, and has a month or day only when the template
//! carries the matching token. Time-of-day and timezones are out of
//! scope.

use crate::error::ConvertError;
use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::Datelike;
use itemforge_domain::DateValue;

fn date_error(text: &str, template: &str, source: chrono::format::ParseError) -> ConvertError {
    ConvertError::Date {
        text: text.to_string(),
        template: template.to_string(),
        source,
    }
}

/// Parse `text` strictly against `template` into a [`DateValue`].
///
/// The template's own separators must match exactly and the whole input
/// must be consumed; wrong digit counts, invalid calendar values, and
/// trailing fields all reject. Full dates are calendar-validated, so
/// `"2009-02-30"` fails even though every field is in range on its own.
///
/// # Examples
///
/// ```
/// use itemforge_convert::dates::normalize;
///
/// let date = normalize("09-12-1999", "%d-%m-%Y").unwrap();
/// assert_eq!((date.year, date.month, date.day), (1999, Some(12), Some(9)));
///
/// assert!(normalize("1999-12-09", "%Y").is_err());
/// ```
pub fn normalize(text: &str, template: &str) -> Result<DateValue, ConvertError> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, text, StrftimeItems::new(template))
        .map_err(|e| date_error(text, template, e))?;

    if template.contains("%d") {
        // Day precision: let the calendar reject impossible dates.
        let date = parsed
            .to_naive_date()
            .map_err(|e| date_error(text, template, e))?;
        return Ok(DateValue::full(date.year(), date.month(), date.day()));
    }

    let year = parsed
        .year
        .ok_or_else(|| ConvertError::TemplateWithoutYear(template.to_string()))?;
    let month = if template.contains("%m") { parsed.month } else { None };
    Ok(DateValue { year, month, day: None })
}
