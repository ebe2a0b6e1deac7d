use super::Choice;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementType {
    #[default]
    General,
    Urgent,
    Event,
    Academic,
}

impl Choice for AnnouncementType {
    const ALL: &'static [Self] = &[
        AnnouncementType::General,
        AnnouncementType::Urgent,
        AnnouncementType::Event,
        AnnouncementType::Academic,
    ];
    const FIELD: &'static str = "announcement type";

    fn to_db_str(&self) -> &'static str {
        match self {
            AnnouncementType::General => "general",
            AnnouncementType::Urgent => "urgent",
            AnnouncementType::Event => "event",
            AnnouncementType::Academic => "academic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    #[default]
    All,
    Students,
    Teachers,
    Parents,
    SpecificClass,
}

impl Choice for TargetAudience {
    const ALL: &'static [Self] = &[
        TargetAudience::All,
        TargetAudience::Students,
        TargetAudience::Teachers,
        TargetAudience::Parents,
        TargetAudience::SpecificClass,
    ];
    const FIELD: &'static str = "target audience";

    fn to_db_str(&self) -> &'static str {
        match self {
            TargetAudience::All => "all",
            TargetAudience::Students => "students",
            TargetAudience::Teachers => "teachers",
            TargetAudience::Parents => "parents",
            TargetAudience::SpecificClass => "specific_class",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementType,
    pub target_audience: TargetAudience,
    pub target_class_id: Option<i64>,
    pub created_by: i64,
    pub is_published: bool,
    pub publish_at: Option<NaiveDateTime>,
    pub expires_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Announcement {
    /// Published and not yet expired. An expiry equal to `now` counts as expired.
    pub fn is_visible_at(&self, now: NaiveDateTime) -> bool {
        crate::core::calculator::visibility::is_visible(self.is_published, self.expires_at, now)
    }
}

/// Listing row: announcement eager-loaded with its creator and target class.
#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementType,
    pub target_audience: TargetAudience,
    pub target_class_id: Option<i64>,
    pub target_class_name: Option<String>,
    pub created_by: i64,
    pub created_by_name: String,
    pub is_published: bool,
    pub publish_at: Option<NaiveDateTime>,
    pub expires_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub kind: AnnouncementType,
    pub target_audience: TargetAudience,
    pub target_class_id: Option<i64>,
    pub created_by: i64,
    pub is_published: bool,
    pub publish_at: Option<NaiveDateTime>,
    pub expires_at: Option<NaiveDateTime>,
}
