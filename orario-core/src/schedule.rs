//! Schedule mapping
//!
//! Assigns (weekday, period) to extracted lesson slots using two
//! auxiliary per-class tables: how many periods each weekday holds, and
//! a compact code describing which leading periods are absent. The
//! tables are positional: row N belongs to the Nth extracted class.

use crate::error::{CoreError, Result};
use crate::timetable::ClassTimetable;

/// Number of school weekdays
pub const WEEKDAYS: usize = 6;

/// Per-class periods taught per weekday
#[derive(Debug, Clone)]
pub struct DailyHoursTable {
    rows: Vec<[u8; WEEKDAYS]>,
}

impl DailyHoursTable {
    /// Parse the dot-separated source: one line per class, six integers
    pub fn parse(src: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line, text) in src.lines().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = text.trim().split('.').collect();
            if fields.len() != WEEKDAYS {
                return Err(CoreError::MalformedHours {
                    line,
                    reason: format!("expected {WEEKDAYS} entries, found {}", fields.len()),
                });
            }
            let mut row = [0u8; WEEKDAYS];
            for (day, field) in fields.iter().enumerate() {
                row[day] = field.parse().map_err(|_| CoreError::MalformedHours {
                    line,
                    reason: format!("non-numeric entry {field:?}"),
                })?;
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Row for the class at `index`, if present
    pub fn class_row(&self, index: usize) -> Option<&[u8; WEEKDAYS]> {
        self.rows.get(index)
    }

    /// Number of class rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total weekly periods of the class at `index`
    pub fn weekly_total(&self, index: usize) -> Option<u32> {
        self.class_row(index)
            .map(|row| row.iter().map(|h| u32::from(*h)).sum())
    }
}

/// One period-shift correction decoded from a start-correction code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodShift {
    /// Periods strictly greater than this are shifted
    pub threshold: u8,
    /// How many periods to shift by
    pub amount: u8,
}

/// Decode one code character.
///
/// A digit `N > 0` means the first N periods of the day do not exist:
/// shift everything after period 0 by N. `q` and `w` flag a late lunch
/// break: shift everything after period 4 (resp. 5) by one. `0` is a
/// recorded no-op.
fn decode_code(ch: char) -> Option<PeriodShift> {
    match ch {
        'q' => Some(PeriodShift {
            threshold: 4,
            amount: 1,
        }),
        'w' => Some(PeriodShift {
            threshold: 5,
            amount: 1,
        }),
        '0' => None,
        d if d.is_ascii_digit() => Some(PeriodShift {
            threshold: 0,
            amount: d as u8 - b'0',
        }),
        _ => None,
    }
}

/// Per-class, per-weekday start-correction codes
#[derive(Debug, Clone)]
pub struct StartCorrections {
    rows: Vec<[String; WEEKDAYS]>,
}

impl StartCorrections {
    /// Parse the dot-separated source: one line per class, six codes
    /// made of digits and/or `q`/`w` characters
    pub fn parse(src: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line, text) in src.lines().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = text.trim().split('.').collect();
            if fields.len() != WEEKDAYS {
                return Err(CoreError::MalformedCorrections {
                    line,
                    reason: format!("expected {WEEKDAYS} entries, found {}", fields.len()),
                });
            }
            let mut row: [String; WEEKDAYS] = Default::default();
            for (day, field) in fields.iter().enumerate() {
                if let Some(bad) = field
                    .chars()
                    .find(|c| !c.is_ascii_digit() && *c != 'q' && *c != 'w')
                {
                    return Err(CoreError::MalformedCorrections {
                        line,
                        reason: format!("unknown code character {bad:?} in {field:?}"),
                    });
                }
                row[day] = (*field).to_string();
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Decoded shifts for a class and 1-based weekday, in listed order
    pub fn shifts_for(&self, index: usize, day: u8) -> Vec<PeriodShift> {
        self.rows
            .get(index)
            .map(|row| {
                row[usize::from(day) - 1]
                    .chars()
                    .filter_map(decode_code)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of class rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Assign (day, period) to every class's lesson slots in extraction
/// order, then apply the start corrections day by day.
///
/// For weekday `d`, the first `hours[class][d]` not-yet-assigned slots
/// receive `day = d, period = 1..=count`. Corrections shift the periods
/// of already-assigned slots on that day; multiple codes for one day
/// compose additively in listed order.
pub fn assign_periods(
    classes: &mut [ClassTimetable],
    hours: &DailyHoursTable,
    corrections: &StartCorrections,
) -> Result<()> {
    for (index, table) in classes.iter_mut().enumerate() {
        let row = hours
            .class_row(index)
            .ok_or_else(|| CoreError::MissingClassSchedule {
                class: table.class.clone(),
                index,
            })?;

        let mut next_slot = 0usize;
        for day in 1..=WEEKDAYS as u8 {
            let count = row[usize::from(day) - 1];
            for period in 1..=count {
                if let Some(slot) = table.lessons.get_mut(next_slot) {
                    slot.day = Some(day);
                    slot.period = Some(period);
                }
                next_slot += 1;
            }

            for shift in corrections.shifts_for(index, day) {
                for slot in table.lessons.iter_mut() {
                    if slot.day == Some(day) {
                        if let Some(period) = slot.period.as_mut() {
                            if *period > shift.threshold {
                                *period += shift.amount;
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
