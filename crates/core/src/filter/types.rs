//! Filter domain types.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Named day-granularity time presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePreset {
    /// The current day only.
    Today,
    /// The last 7 days including today.
    Last7Days,
    /// The last 30 days including today.
    Last30Days,
    /// The current calendar month.
    ThisMonth,
    /// The previous calendar month.
    LastMonth,
    /// No window at all.
    AllTime,
}

/// An inclusive day-granularity window, open-ended on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Inclusive lower bound, or `None` for open-ended.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound, or `None` for open-ended.
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// True if the date falls within the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

impl TimePreset {
    /// Resolves the preset to a concrete window relative to `today`.
    #[must_use]
    pub fn window(self, today: NaiveDate) -> DateWindow {
        let first_of_month = |date: NaiveDate| {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
        };

        match self {
            Self::Today => DateWindow {
                start: Some(today),
                end: Some(today),
            },
            Self::Last7Days => DateWindow {
                start: Some(today - chrono::Days::new(6)),
                end: Some(today),
            },
            Self::Last30Days => DateWindow {
                start: Some(today - chrono::Days::new(29)),
                end: Some(today),
            },
            Self::ThisMonth => {
                let start = first_of_month(today);
                let end = (start + Months::new(1)) - chrono::Days::new(1);
                DateWindow {
                    start: Some(start),
                    end: Some(end),
                }
            }
            Self::LastMonth => {
                let start = first_of_month(today) - Months::new(1);
                let end = first_of_month(today) - chrono::Days::new(1);
                DateWindow {
                    start: Some(start),
                    end: Some(end),
                }
            }
            Self::AllTime => DateWindow {
                start: None,
                end: None,
            },
        }
    }
}

/// What subset of the account's history a filter selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Selection {
    /// A financial cycle selected by index from the end; 0 is the
    /// current (last) cycle.
    Cycle {
        /// Index from the end of the cycle list.
        from_end: usize,
    },
    /// A named time preset.
    Time {
        /// The preset to resolve relative to today.
        preset: TimePreset,
    },
    /// An explicit inclusive day-granularity range.
    Custom {
        /// Inclusive lower bound.
        start: NaiveDate,
        /// Inclusive upper bound.
        end: NaiveDate,
    },
}

/// Debit/credit inclusion mask, applied after windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindMask {
    /// Include debits and credits.
    Both,
    /// Include debits only.
    DebitsOnly,
    /// Include credits only.
    CreditsOnly,
}

impl KindMask {
    /// True if debits pass the mask.
    #[must_use]
    pub fn includes_debits(self) -> bool {
        matches!(self, Self::Both | Self::DebitsOnly)
    }

    /// True if credits pass the mask.
    #[must_use]
    pub fn includes_credits(self) -> bool {
        matches!(self, Self::Both | Self::CreditsOnly)
    }
}

/// An account's active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// The selected subset of history.
    pub selection: Selection,
    /// The debit/credit inclusion mask.
    pub mask: KindMask,
}

impl Default for Filter {
    /// Current cycle, both kinds: the fallback when no preference is
    /// stored for an account.
    fn default() -> Self {
        Self {
            selection: Selection::Cycle { from_end: 0 },
            mask: KindMask::Both,
        }
    }
}
