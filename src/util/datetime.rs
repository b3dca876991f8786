use chrono::{DateTime, Utc, Weekday};

/// RFC-1123 layout used by RSS 2.0 date elements, always in GMT.
const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats a timestamp for `<pubDate>` and `<lastBuildDate>`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use feedwright::util::format_rfc1123;
///
/// let date = Utc.with_ymd_and_hms(2002, 9, 7, 0, 0, 1).unwrap();
/// assert_eq!(format_rfc1123(&date), "Sat, 07 Sep 2002 00:00:01 GMT");
/// ```
pub fn format_rfc1123(date: &DateTime<Utc>) -> String {
    date.format(RFC1123_FORMAT).to_string()
}

/// Full English weekday name, as expected inside `<skipDays>`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
