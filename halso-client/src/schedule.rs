//! Weekly class timetable

use std::collections::BTreeMap;

use shared::models::{GymClass, Weekday};

/// Classes grouped by weekday, each day ordered by start time
#[derive(Debug, Clone, Default)]
pub struct WeeklySchedule {
    days: BTreeMap<Weekday, Vec<GymClass>>,
}

impl WeeklySchedule {
    /// Group `classes` by day.
    ///
    /// Times are compared as `HH:MM` strings and the sort is stable, so
    /// classes starting together keep the order the server sent them in.
    /// Classes with a day outside 0-6 are left out.
    pub fn build(classes: &[GymClass]) -> Self {
        let mut days: BTreeMap<Weekday, Vec<GymClass>> = BTreeMap::new();
        for class in classes {
            match class.weekday() {
                Some(day) => days.entry(day).or_default().push(class.clone()),
                None => tracing::warn!(
                    class = %class.id,
                    day_of_week = class.day_of_week,
                    "Class has no valid weekday, leaving it out of the schedule"
                ),
            }
        }
        for entries in days.values_mut() {
            entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        }
        Self { days }
    }

    /// Classes on `day`; empty when there are none
    pub fn day(&self, day: Weekday) -> &[GymClass] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// All seven days, Monday first, including empty ones
    pub fn week(&self) -> impl Iterator<Item = (Weekday, &[GymClass])> {
        Weekday::WEEK.into_iter().map(|day| (day, self.day(day)))
    }

    pub fn class_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
