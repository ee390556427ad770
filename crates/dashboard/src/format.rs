//! Display formatting for prices, percentages, ratings and dates.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

pub fn currency(v: f64) -> String {
    format!("${}", fixed2(v))
}

pub fn percent(v: f64) -> String {
    format!("{}%", fixed2(v))
}

/// A fraction such as `profit_margins` shown as a percentage
pub fn ratio_percent(v: f64) -> String {
    percent(v * 100.0)
}

/// Two decimals, with exact half-cent ties rounded away from zero.
pub fn fixed2(v: f64) -> String {
    // `{:.2}` breaks ties toward the even digit. The only binary values sitting
    // exactly on a half cent are odd multiples of 1/8, and those scale to cents
    // without error.
    let eighths = v * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let cents = (v * 100.0).round();
        return format!("{:.2}", cents / 100.0);
    }
    format!("{:.2}", v)
}

/// `strong_buy` -> `Strong Buy`. Only first letters change case.
pub fn humanize_rating(rating: &str) -> String {
    let mut out = String::with_capacity(rating.len());
    let mut word_start = true;
    for c in rating.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Short US-style date (`3/5/2024`). Unrecognized input is returned unchanged.
pub fn locale_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        });

    match date {
        Some(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        None => raw.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Strictly positive is up; zero counts as down.
    pub fn from_roi(past_year_roi: f64) -> Self {
        if past_year_roi > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            Trend::Up => "\u{25B2}",
            Trend::Down => "\u{25BC}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_and_percent() {
        assert_eq!(currency(100.0), "$100.00");
        assert_eq!(currency(227.5), "$227.50");
        assert_eq!(percent(20.0), "20.00%");
        assert_eq!(percent(-3.4), "-3.40%");
        assert_eq!(fixed2(18.456), "18.46");
    }

    #[test]
    fn test_half_cent_ties_round_away_from_zero() {
        assert_eq!(currency(100.125), "$100.13");
        assert_eq!(fixed2(18.125), "18.13");
        assert_eq!(percent(2.375), "2.38%");
        assert_eq!(percent(-2.125), "-2.13%");
        assert_eq!(currency(0.625), "$0.63");
        assert_eq!(fixed2(0.25), "0.25");
        // 1.005 is stored just below the tie
        assert_eq!(currency(1.005), "$1.00");
    }

    #[test]
    fn test_ratio_percent() {
        assert_eq!(ratio_percent(0.1523), "15.23%");
        assert_eq!(ratio_percent(0.12), "12.00%");
    }

    #[test]
    fn test_humanize_rating() {
        assert_eq!(humanize_rating("strong_buy"), "Strong Buy");
        assert_eq!(humanize_rating("buy"), "Buy");
        assert_eq!(humanize_rating("none"), "None");
        assert_eq!(humanize_rating("strong_sell_now"), "Strong Sell Now");
        assert_eq!(humanize_rating(""), "");
    }

    #[test]
    fn test_humanize_rating_leaves_source_untouched() {
        let rating = String::from("underperform_hold");
        let shown = humanize_rating(&rating);
        assert_eq!(shown, "Underperform Hold");
        assert_eq!(rating, "underperform_hold");
    }

    #[test]
    fn test_locale_date() {
        assert_eq!(locale_date("2024-03-05"), "3/5/2024");
        assert_eq!(locale_date("2024-12-31T00:00:00"), "12/31/2024");
        assert_eq!(locale_date("2024-12-31T15:30:00+00:00"), "12/31/2024");
        assert_eq!(locale_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_trend_is_strict() {
        assert_eq!(Trend::from_roi(5.1), Trend::Up);
        assert_eq!(Trend::from_roi(0.0), Trend::Down);
        assert_eq!(Trend::from_roi(-3.4), Trend::Down);
    }
}
