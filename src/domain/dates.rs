use chrono::NaiveDate;

use crate::domain::entities::query::DateRange;
use crate::domain::entities::row::CellValue;

/// Strict `DD-MM-YYYY` parse: two-digit day, two-digit month, four-digit year, and a
/// real calendar date. Anything else is "no date".
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return None;
    }
    let all_digits = [day, month, year]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()));
    if !all_digits {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

pub fn parse_cell_date(value: Option<&CellValue>) -> Option<NaiveDate> {
    value.and_then(CellValue::as_text).and_then(parse_date)
}

/// Inclusive day bounds of a range, earliest first. `None` when `from` is unset.
pub fn range_bounds(range: &DateRange) -> Option<(NaiveDate, NaiveDate)> {
    let from = range.from?;
    let to = range.to.unwrap_or(from);
    Some(if to < from { (to, from) } else { (from, to) })
}

/// Whether a cell passes a range filter. An inactive range passes everything; an
/// active one drops cells without a parseable date.
pub fn is_date_in_range(value: Option<&CellValue>, range: &DateRange) -> bool {
    let Some((start, end)) = range_bounds(range) else {
        return true;
    };
    match parse_cell_date(value) {
        Some(date) => start <= date && date <= end,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn parse_date_reads_day_month_year() {
        assert_eq!(parse_date("05-03-2021"), Some(ymd(2021, 3, 5)));
        assert_eq!(parse_date("29-02-2024"), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn parse_date_rejects_other_layouts() {
        assert_eq!(parse_date("2021-03-05"), None);
        assert_eq!(parse_date("5-3-2021"), None);
        assert_eq!(parse_date("05/03/2021"), None);
        assert_eq!(parse_date("31-02-2021"), None);
        assert_eq!(parse_date("05-03-2021-01"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("+5-03-2021"), None);
    }

    #[test]
    fn numbers_are_never_dates() {
        let value = CellValue::Number(5032021.0);
        assert_eq!(parse_cell_date(Some(&value)), None);
    }

    #[test]
    fn reversed_range_is_normalized() {
        let range = DateRange::between(ymd(2021, 3, 10), ymd(2021, 3, 1));
        assert_eq!(range_bounds(&range), Some((ymd(2021, 3, 1), ymd(2021, 3, 10))));
    }

    #[test]
    fn inactive_range_passes_missing_dates() {
        let range = DateRange {
            from: None,
            to: Some(ymd(2021, 3, 1)),
        };
        assert!(is_date_in_range(None, &range));
    }
}
