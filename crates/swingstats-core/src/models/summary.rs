use serde::{Deserialize, Serialize};

/// Skill tier in the competitive ladder, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Division {
    #[default]
    Newcomer,
    Novice,
    Intermediate,
    Advanced,
    #[serde(rename = "All-Star")]
    AllStar,
}

impl Division {
    pub const ALL: [Division; 5] = [
        Division::Newcomer,
        Division::Novice,
        Division::Intermediate,
        Division::Advanced,
        Division::AllStar,
    ];

    /// Map a registry division name to a tracked division.
    ///
    /// Matching is exact and case-sensitive. The registry spells the top
    /// tier "All-Stars"; both spellings are accepted. Every other division
    /// (Masters, Juniors, Invitational, ...) returns `None`.
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "Newcomer" => Some(Division::Newcomer),
            "Novice" => Some(Division::Novice),
            "Intermediate" => Some(Division::Intermediate),
            "Advanced" => Some(Division::Advanced),
            "All-Star" | "All-Stars" => Some(Division::AllStar),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Division::Newcomer => "Newcomer",
            Division::Novice => "Novice",
            Division::Intermediate => "Intermediate",
            Division::Advanced => "Advanced",
            Division::AllStar => "All-Star",
        }
    }
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Geographic region inferred from event locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "West Coast")]
    WestCoast,
    Midwest,
    #[serde(rename = "East Coast")]
    EastCoast,
    Other,
    Europe,
}

impl Region {
    /// Classification and tie-break order
    pub const ALL: [Region; 5] = [
        Region::WestCoast,
        Region::Midwest,
        Region::EastCoast,
        Region::Other,
        Region::Europe,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::WestCoast => "West Coast",
            Region::Midwest => "Midwest",
            Region::EastCoast => "East Coast",
            Region::Other => "Other",
            Region::Europe => "Europe",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Region::WestCoast => 0,
            Region::Midwest => 1,
            Region::EastCoast => 2,
            Region::Other => 3,
            Region::Europe => 4,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the exported table.
///
/// Field order is the CSV column order. Dates are kept as the registry's
/// own strings ("June 2016"); an empty string means no event recorded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DancerSummary {
    /// WSDC id
    pub id: u32,
    /// Division the dancer currently competes in
    pub division: Division,
    /// Role of the first recorded competition ("leader"/"follower")
    pub role: String,
    pub region: Option<Region>,
    pub new_points: i64,
    pub nov_points: i64,
    pub int_points: i64,
    pub adv_points: i64,
    pub als_points: i64,
    /// Most recent event date across divisions
    pub end_date: String,
    pub new_start: String,
    pub new_end: String,
    pub nov_start: String,
    pub nov_end: String,
    pub int_start: String,
    pub int_end: String,
    pub adv_start: String,
    pub adv_end: String,
    pub als_start: String,
    pub als_end: String,
    pub new_count: usize,
    pub nov_count: usize,
    pub int_count: usize,
    pub adv_count: usize,
    pub als_count: usize,
    /// Approximate count of top placements (1-5 tier 3, 1-3 tier 2)
    pub nov_place: usize,
    pub int_place: usize,
    pub adv_place: usize,
    pub als_place: usize,
    pub nov_first: bool,
    pub int_first: bool,
    pub adv_first: bool,
    pub als_first: bool,
    /// Advanced points earned inside the trailing window
    pub adv_3y: i64,
    /// All-Star points earned inside the trailing window
    pub als_3y: i64,
}

impl DancerSummary {
    /// Summary with every derived field at its default
    pub fn empty(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn points(&self, division: Division) -> i64 {
        match division {
            Division::Newcomer => self.new_points,
            Division::Novice => self.nov_points,
            Division::Intermediate => self.int_points,
            Division::Advanced => self.adv_points,
            Division::AllStar => self.als_points,
        }
    }

    pub fn event_count(&self, division: Division) -> usize {
        match division {
            Division::Newcomer => self.new_count,
            Division::Novice => self.nov_count,
            Division::Intermediate => self.int_count,
            Division::Advanced => self.adv_count,
            Division::AllStar => self.als_count,
        }
    }

    pub fn end_date_for(&self, division: Division) -> &str {
        match division {
            Division::Newcomer => &self.new_end,
            Division::Novice => &self.nov_end,
            Division::Intermediate => &self.int_end,
            Division::Advanced => &self.adv_end,
            Division::AllStar => &self.als_end,
        }
    }

    /// Dancers who competed at least once in Newcomer or Novice.
    /// Older registry entries often only carry upper-division history.
    pub fn has_entry_level_events(&self) -> bool {
        self.nov_count > 0 || self.new_count > 0
    }
}
