//! Gym Class Model

use serde::{Deserialize, Serialize};

use crate::resource::{Draft, FormMode, Resource, Searchable};
use crate::types::EntityId;
use crate::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, Validator, Violation, is_time_of_day};

/// Day of the week as the backend numbers it (0 = Sunday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Display order for a weekly timetable (Monday first)
    pub const WEEK: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Sunday),
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.parse::<u8>() {
            return Self::from_index(index).ok_or_else(|| format!("day index out of range: {index}"));
        }
        let lower = s.to_ascii_lowercase();
        Self::WEEK
            .into_iter()
            .find(|day| day.name().to_ascii_lowercase().starts_with(&lower) && lower.len() >= 2)
            .ok_or_else(|| format!("unknown day: {s}"))
    }
}

/// Occupancy of a class, for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassFill {
    Open,
    Full,
    /// `enrolled > capacity`; never blocks anything, only styled differently
    Overbooked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymClass {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub facility_id: Option<EntityId>,
    pub day_of_week: u8,
    /// Zero-padded `HH:MM`
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    #[serde(default)]
    pub enrolled: u32,
}

impl GymClass {
    pub fn weekday(&self) -> Option<Weekday> {
        Weekday::from_index(self.day_of_week)
    }

    pub fn fill(&self) -> ClassFill {
        match self.enrolled.cmp(&self.capacity) {
            std::cmp::Ordering::Less => ClassFill::Open,
            std::cmp::Ordering::Equal => ClassFill::Full,
            std::cmp::Ordering::Greater => ClassFill::Overbooked,
        }
    }

    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled)
    }
}

impl Searchable for GymClass {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(instructor) = &self.instructor {
            fields.push(instructor);
        }
        fields
    }
}

impl Resource for GymClass {
    const PATH: &'static str = "classes";
    const NAME: &'static str = "Class";

    type Draft = GymClassDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Member registered to a class (`/classes/{id}/registrations`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRegistration {
    pub id: EntityId,
    pub class_id: EntityId,
    pub member_id: EntityId,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub registered_at: Option<String>,
}

/// Class form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymClassDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<EntityId>,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    pub enrolled: u32,
}

impl Default for GymClassDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            instructor: None,
            facility_id: None,
            day_of_week: Weekday::Monday.index(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            capacity: 20,
            enrolled: 0,
        }
    }
}

impl Draft for GymClassDraft {
    type Entity = GymClass;

    fn from_entity(class: &GymClass) -> Self {
        Self {
            id: Some(class.id.clone()),
            name: class.name.clone(),
            description: class.description.clone(),
            instructor: class.instructor.clone(),
            facility_id: class.facility_id.clone(),
            day_of_week: class.day_of_week,
            start_time: class.start_time.clone(),
            end_time: class.end_time.clone(),
            capacity: class.capacity,
            enrolled: class.enrolled,
        }
    }

    fn validate(&self, _mode: FormMode) -> Vec<Violation> {
        let times_valid = is_time_of_day(&self.start_time) && is_time_of_day(&self.end_time);
        Validator::new()
            .required_text("name", &self.name, MAX_NAME_LEN)
            .optional_text("description", self.description.as_deref(), MAX_ADDRESS_LEN)
            .check(
                self.day_of_week <= 6,
                "dayOfWeek",
                "day of week must be between 0 (Sunday) and 6 (Saturday)",
            )
            .time_of_day("startTime", &self.start_time)
            .time_of_day("endTime", &self.end_time)
            // zero-padded HH:MM orders correctly as plain strings
            .check(
                !times_valid || self.start_time < self.end_time,
                "endTime",
                "end time must be after start time",
            )
            .check(self.capacity > 0, "capacity", "capacity must be at least 1")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(enrolled: u32, capacity: u32) -> GymClass {
        GymClass {
            id: EntityId::from(1),
            name: "Spinning".to_string(),
            description: None,
            instructor: Some("Erik".to_string()),
            facility_id: None,
            day_of_week: 1,
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            capacity,
            enrolled,
        }
    }

    #[test]
    fn test_fill_state() {
        assert_eq!(class(3, 10).fill(), ClassFill::Open);
        assert_eq!(class(10, 10).fill(), ClassFill::Full);
        assert_eq!(class(12, 10).fill(), ClassFill::Overbooked);
        assert_eq!(class(12, 10).spots_left(), 0);
    }

    #[test]
    fn test_weekday_parsing() {
        assert_eq!("1".parse::<Weekday>(), Ok(Weekday::Monday));
        assert_eq!("0".parse::<Weekday>(), Ok(Weekday::Sunday));
        assert_eq!("mon".parse::<Weekday>(), Ok(Weekday::Monday));
        assert_eq!("Saturday".parse::<Weekday>(), Ok(Weekday::Saturday));
        assert!("7".parse::<Weekday>().is_err());
        assert!("x".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_draft_time_checks() {
        let mut draft = GymClassDraft {
            name: "Yoga".to_string(),
            ..Default::default()
        };
        assert!(draft.validate(FormMode::Create).is_empty());

        draft.start_time = "18:00".to_string();
        draft.end_time = "17:00".to_string();
        let violations = draft.validate(FormMode::Create);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "endTime");

        draft.start_time = "7:00".to_string();
        draft.day_of_week = 9;
        draft.capacity = 0;
        let fields: Vec<_> = draft
            .validate(FormMode::Create)
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, vec!["dayOfWeek", "startTime", "capacity"]);
    }
}
