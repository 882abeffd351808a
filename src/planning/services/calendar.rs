//! Calendar math: Easter, French public holidays, semester and year grids.

use crate::planning::domain::{ClosedDay, Event};
use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Language used for month and day names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fr" => Ok(Locale::Fr),
            "en" => Ok(Locale::En),
            _ => Err(format!("Invalid locale: {}. Use 'fr' or 'en'", s)),
        }
    }
}

const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const DAYS_FR: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];
const DAYS_EN: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Full month name, `month` in `1..=12`.
pub fn month_name(month: u32, locale: Locale) -> &'static str {
    let names = match locale {
        Locale::Fr => &MONTHS_FR,
        Locale::En => &MONTHS_EN,
    };
    names[(month.clamp(1, 12) - 1) as usize]
}

/// Three-letter month name ("janv.", "Jan").
pub fn short_month_name(month: u32, locale: Locale) -> String {
    let full = month_name(month, locale);
    match locale {
        Locale::Fr if full.chars().count() > 4 => {
            format!("{}.", full.chars().take(4).collect::<String>())
        }
        Locale::Fr => full.to_string(),
        Locale::En => full.chars().take(3).collect(),
    }
}

pub fn day_name(weekday: Weekday, locale: Locale) -> &'static str {
    let names = match locale {
        Locale::Fr => &DAYS_FR,
        Locale::En => &DAYS_EN,
    };
    names[weekday.num_days_from_monday() as usize]
}

/// Uppercase initial of the day name: `L M M J V S D` in French.
pub fn day_letter(weekday: Weekday, locale: Locale) -> String {
    day_name(weekday, locale)
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

pub fn iso_week(day: NaiveDate) -> u32 {
    day.iso_week().week()
}

pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|d| NaiveDate::from_ymd_opt(year, month, *d).is_some())
        .unwrap_or(28)
}

// Only called with components already known to form a valid date.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Easter Sunday of `year` (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, month as u32, day as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    Public,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub label: String,
    pub kind: HolidayKind,
}

const FIXED_HOLIDAYS: [(u32, u32, &str); 8] = [
    (1, 1, "Jour de l'an"),
    (5, 1, "Fête du Travail"),
    (5, 8, "Victoire 1945"),
    (7, 14, "Fête nationale"),
    (8, 15, "Assomption"),
    (11, 1, "Toussaint"),
    (11, 11, "Armistice 1918"),
    (12, 25, "Noël"),
];

const EASTER_OFFSETS: [(i64, &str); 4] = [
    (0, "Pâques"),
    (1, "Lundi de Pâques"),
    (39, "Ascension"),
    (50, "Lundi de Pentecôte"),
];

/// French public holidays of `year`, sorted by date.
pub fn public_holidays(year: i32) -> Vec<Holiday> {
    let easter = easter_sunday(year);
    let mut holidays: Vec<Holiday> = FIXED_HOLIDAYS
        .iter()
        .map(|(month, day, label)| (ymd(year, *month, *day), *label))
        .chain(
            EASTER_OFFSETS
                .iter()
                .map(|(offset, label)| (easter + chrono::Duration::days(*offset), *label)),
        )
        .map(|(date, label)| Holiday {
            date,
            label: label.to_string(),
            kind: HolidayKind::Public,
        })
        .collect();
    holidays.sort_by_key(|h| h.date);
    holidays
}

pub fn is_public_holiday(day: NaiveDate) -> bool {
    public_holidays(day.year()).iter().any(|h| h.date == day)
}

/// Public holidays plus the closed days declared by administrators.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    closed_days: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closed_days(days: &[ClosedDay]) -> Self {
        Self {
            closed_days: days.iter().map(|d| (d.date, d.reason.clone())).collect(),
        }
    }

    /// Label of the holiday or closed day falling on `day`
    pub fn holiday_label(&self, day: NaiveDate) -> Option<String> {
        public_holidays(day.year())
            .into_iter()
            .find(|h| h.date == day)
            .map(|h| h.label)
            .or_else(|| self.closed_days.get(&day).cloned())
    }

    pub fn is_holiday(&self, day: NaiveDate) -> bool {
        self.closed_days.contains_key(&day) || is_public_holiday(day)
    }

    /// Weekend, public holiday or closed day
    pub fn is_off_day(&self, day: NaiveDate) -> bool {
        is_weekend(day) || self.is_holiday(day)
    }

    pub fn holidays(&self, year: i32) -> Vec<Holiday> {
        let mut all = public_holidays(year);
        all.extend(
            self.closed_days
                .iter()
                .filter(|(date, _)| date.year() == year)
                .map(|(date, reason)| Holiday {
                    date: *date,
                    label: reason.clone(),
                    kind: HolidayKind::Closed,
                }),
        );
        all.sort_by_key(|h| h.date);
        all
    }
}

/// One row of a month column. Rows past the month's length are placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub day_number: u32,
    pub day_letter: String,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_today: bool,
    pub is_valid: bool,
    pub events: Vec<Event>,
}

impl DayCell {
    fn placeholder(day_number: u32) -> Self {
        Self {
            date: None,
            day_number,
            day_letter: String::new(),
            is_weekend: false,
            is_holiday: false,
            is_today: false,
            is_valid: false,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthColumn {
    pub year: i32,
    pub month: u32,
    pub name: String,
    pub cells: Vec<DayCell>,
}

/// Six months side by side, 31 rows each, like a paper wall planner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterGrid {
    pub reference: NaiveDate,
    pub year: i32,
    /// 1 for January-June, 2 for July-December
    pub semester: u8,
    pub label: String,
    pub months: Vec<MonthColumn>,
}

impl SemesterGrid {
    pub fn build(
        reference: NaiveDate,
        today: NaiveDate,
        events: &[Event],
        calendar: &HolidayCalendar,
        locale: Locale,
    ) -> Self {
        let year = reference.year();
        let (semester, first_month) = if reference.month() <= 6 { (1, 1) } else { (2, 7) };
        let label = match locale {
            Locale::Fr => format!("Semestre {} - {}", semester, year),
            Locale::En => format!("Semester {} - {}", semester, year),
        };

        let months = (first_month..first_month + 6)
            .map(|month| MonthColumn {
                year,
                month,
                name: month_name(month, locale).to_string(),
                cells: (1..=31)
                    .map(|day| match NaiveDate::from_ymd_opt(year, month, day) {
                        Some(date) => DayCell {
                            date: Some(date),
                            day_number: day,
                            day_letter: day_letter(date.weekday(), locale),
                            is_weekend: is_weekend(date),
                            is_holiday: calendar.is_holiday(date),
                            is_today: date == today,
                            is_valid: true,
                            events: events.iter().filter(|e| e.occurs_on(date)).cloned().collect(),
                        },
                        None => DayCell::placeholder(day),
                    })
                    .collect(),
            })
            .collect();

        Self {
            reference,
            year,
            semester,
            label,
            months,
        }
    }

    /// Reference date six months earlier
    pub fn previous_reference(&self) -> NaiveDate {
        self.reference
            .checked_sub_months(Months::new(6))
            .unwrap_or(self.reference)
    }

    /// Reference date six months later
    pub fn next_reference(&self) -> NaiveDate {
        self.reference
            .checked_add_months(Months::new(6))
            .unwrap_or(self.reference)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: u32,
    pub name: String,
    pub days_in_month: u32,
    pub first_weekday: Weekday,
    pub event_count: usize,
    pub holidays: Vec<Holiday>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGrid {
    pub year: i32,
    pub months: Vec<MonthSummary>,
}

impl YearGrid {
    pub fn build(
        year: i32,
        events: &[Event],
        calendar: &HolidayCalendar,
        locale: Locale,
    ) -> Self {
        let holidays = calendar.holidays(year);
        let months = (1..=12)
            .map(|month| {
                let first = ymd(year, month, 1);
                let last = ymd(year, month, days_in_month(year, month));
                MonthSummary {
                    month,
                    name: month_name(month, locale).to_string(),
                    days_in_month: last.day(),
                    first_weekday: first.weekday(),
                    event_count: events
                        .iter()
                        .filter(|e| e.date <= last && e.end_date.unwrap_or(e.date) >= first)
                        .count(),
                    holidays: holidays
                        .iter()
                        .filter(|h| h.date.month() == month)
                        .cloned()
                        .collect(),
                }
            })
            .collect();
        Self { year, months }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineView {
    #[default]
    Now,
    Semester,
}

/// Period navigation of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineState {
    pub view: TimelineView,
    pub current_date: NaiveDate,
    pub selected_date: Option<NaiveDate>,
}

impl TimelineState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: TimelineView::Now,
            current_date: today,
            selected_date: None,
        }
    }

    pub fn set_view(&mut self, view: TimelineView) {
        self.view = view;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    /// Jumps to the first day of the month three months later.
    pub fn next_period(&mut self) {
        self.current_date = shift_to_first(self.current_date, 3);
    }

    /// Jumps to the first day of the month three months earlier.
    pub fn previous_period(&mut self) {
        self.current_date = shift_to_first(self.current_date, -3);
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.current_date = today;
    }
}

fn shift_to_first(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    ymd(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}
