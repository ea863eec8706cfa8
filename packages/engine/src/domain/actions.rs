//! Named entry points the host (menu items, JS glue) can invoke

use std::str::FromStr;

use serde::Deserialize;

use super::errors::PetError;

/// Autonomous behaviors (scene visits)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    PickFruit,
    Bathe,
    HideAtEdge,
    Toast,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::PickFruit,
        ActivityKind::Bathe,
        ActivityKind::HideAtEdge,
        ActivityKind::Toast,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ActivityKind::PickFruit => "pick-fruit",
            ActivityKind::Bathe => "bathe",
            ActivityKind::HideAtEdge => "hide",
            ActivityKind::Toast => "toast",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Greet,
    Summary,
    Remind,
    Weather,
    Encourage,
    Topping,
    Sleep,
    Settings,
    Activity(ActivityKind),
}

impl FromStr for Action {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s.trim() {
            "greet" => Action::Greet,
            "summary" => Action::Summary,
            "remind" => Action::Remind,
            "weather" => Action::Weather,
            "encourage" => Action::Encourage,
            "topping" => Action::Topping,
            "sleep" => Action::Sleep,
            "settings" => Action::Settings,
            "pick-fruit" | "pickFruit" => Action::Activity(ActivityKind::PickFruit),
            "bathe" | "bath" => Action::Activity(ActivityKind::Bathe),
            "hide" | "hide-at-edge" => Action::Activity(ActivityKind::HideAtEdge),
            "toast" => Action::Activity(ActivityKind::Toast),
            other => return Err(PetError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }
}

/// What the host has to do after an action (the core can't fetch or open modals)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// Host should fetch counts and call `deliver_summary`
    FetchSummary,
    /// Settings form was filled; host may focus it
    OpenSettings,
    /// Unknown or suppressed; nothing happened
    Ignored,
}

impl ActionOutcome {
    pub fn key(self) -> &'static str {
        match self {
            ActionOutcome::Done => "done",
            ActionOutcome::FetchSummary => "fetch-summary",
            ActionOutcome::OpenSettings => "open-settings",
            ActionOutcome::Ignored => "ignored",
        }
    }
}

/// Host alert types (`showAlert(message, type)`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Danger,
    Warning,
    Info,
}

impl NotificationKind {
    /// Bootstrap alert classes; anything unrecognised is treated as info
    pub fn from_alert_type(kind: &str) -> Self {
        match kind.trim() {
            "success" => NotificationKind::Success,
            "danger" | "error" => NotificationKind::Danger,
            "warning" => NotificationKind::Warning,
            _ => NotificationKind::Info,
        }
    }

    /// Fixed reaction line; info draws from the notice pool instead
    pub fn reaction_line(self) -> Option<&'static str> {
        match self {
            NotificationKind::Success => Some("Great! That worked~ 🎉"),
            NotificationKind::Danger => Some("Oops! Something went wrong... 😟"),
            NotificationKind::Warning => Some("Hmm... better keep an eye on that~"),
            NotificationKind::Info => None,
        }
    }
}

/// Counts the host fetched for the `summary` action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryCounts {
    #[serde(alias = "classroomCount")]
    pub classrooms: u32,
    #[serde(alias = "courseCount")]
    pub courses: u32,
    #[serde(alias = "scheduleCount")]
    pub schedules: u32,
    pub available_classrooms: u32,
}

impl SummaryCounts {
    pub fn from_json(json: &str) -> Result<Self, PetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn describe(&self) -> String {
        format!(
            "📊 Overview:\nClassrooms {}\nCourses {}\nSchedules {}\nAvailable now {}",
            self.classrooms, self.courses, self.schedules, self.available_classrooms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_menu_action() {
        for key in ["greet", "summary", "remind", "weather", "encourage", "topping", "sleep", "settings"] {
            assert!(key.parse::<Action>().is_ok(), "{}", key);
        }
        for kind in ActivityKind::ALL {
            assert_eq!(kind.key().parse::<Action>().unwrap(), Action::Activity(kind));
        }
    }

    #[test]
    fn unknown_action_is_an_error() {
        match "dance".parse::<Action>() {
            Err(PetError::UnknownAction(a)) => assert_eq!(a, "dance"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn summary_counts_parse_camel_case() {
        let c = SummaryCounts::from_json(r#"{"classrooms":12,"availableClassrooms":4}"#).unwrap();
        assert_eq!(c.classrooms, 12);
        assert_eq!(c.available_classrooms, 4);
        assert_eq!(c.courses, 0);
        assert!(c.describe().contains("Classrooms 12"));
        assert!(SummaryCounts::from_json("\"nope\"").is_err());

        let legacy = SummaryCounts::from_json(r#"{"classroomCount":3,"courseCount":5}"#).unwrap();
        assert_eq!((legacy.classrooms, legacy.courses), (3, 5));
    }

    #[test]
    fn alert_types_map_with_info_fallback() {
        assert_eq!(NotificationKind::from_alert_type("error"), NotificationKind::Danger);
        assert_eq!(NotificationKind::from_alert_type("danger"), NotificationKind::Danger);
        assert_eq!(NotificationKind::from_alert_type("primary"), NotificationKind::Info);
        assert!(NotificationKind::Info.reaction_line().is_none());
        assert!(NotificationKind::Warning.reaction_line().is_some());
    }
}
