use chrono::{Datelike, NaiveDate, Weekday};

/// Working days of the kitchen week, Monday through Friday.
pub const WORKING_DAYS: [i32; 5] = [1, 2, 3, 4, 5];

/// Map a day number to a weekday: `1..=6` are Monday..Saturday, `0` and `7`
/// are Sunday.
pub fn weekday_from_number(day: i32) -> Option<Weekday> {
    match day {
        0 | 7 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Calendar date of a day inside an ISO week.
pub fn iso_week_date(year: i32, week_number: i32, day_of_week: i32) -> Option<NaiveDate> {
    let week = u32::try_from(week_number).ok()?;
    let weekday = weekday_from_number(day_of_week)?;
    NaiveDate::from_isoywd_opt(year, week, weekday)
}

/// ISO week number and ISO year of a date.
pub fn iso_week_of(date: NaiveDate) -> (i32, i32) {
    let week = date.iso_week();
    (week.week() as i32, week.year())
}
