//! Derivation of flat dancer summaries from raw placement records.
//!
//! `summarize` is a pure function: one lookup payload in, one
//! `DancerSummary` out. Missing or empty placement data yields a summary
//! with default fields. Only a malformed event date fails.

pub mod dates;
pub mod region;

use thiserror::Error;

use crate::models::{DancerSummary, Division, DivisionEntry, LookupResponse};

pub use dates::event_year;
pub use region::{classify_location, infer_region, RegionCounts};

/// Dance style whose placements are summarized unless configured otherwise
pub const DEFAULT_DANCE_STYLE: &str = "West Coast Swing";

/// Events after this year count toward the trailing-window point totals.
/// Fixed, not relative to the current date.
const TRAILING_WINDOW_AFTER_YEAR: i32 = 2015;

/// All-Star is opt-in: a dancer counts as All-Star only with an All-Star
/// result after this year.
const ALL_STAR_ACTIVE_AFTER_YEAR: i32 = 2014;

/// Novice points that move a dancer up to Intermediate
const NOVICE_POINTS_TO_INTERMEDIATE: i64 = 15;

/// Intermediate points that move a dancer up to Advanced
const INTERMEDIATE_POINTS_TO_ADVANCED: i64 = 30;

/// Results worth more than this many points are counted as top placements
const TOP_PLACEMENT_POINTS: i64 = 5;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Malformed event date: {date:?}")]
    MalformedDate { date: String },
}

/// Figures derived from one division entry
#[derive(Debug, Default)]
struct DivisionStats {
    points: i64,
    start: String,
    end: String,
    count: usize,
    place: usize,
    first: bool,
    trailing_points: i64,
}

impl DivisionStats {
    fn from_entry(entry: &DivisionEntry, years: &[i32]) -> Self {
        let comps = &entry.competitions;

        // Competitions are listed newest first
        let end = comps.first().map(|c| c.event.date.clone()).unwrap_or_default();
        let start = comps.last().map(|c| c.event.date.clone()).unwrap_or_default();

        let place = comps.iter().filter(|c| c.points > TOP_PLACEMENT_POINTS).count();
        let first = comps.iter().any(|c| c.result == "1");
        let trailing_points = comps
            .iter()
            .zip(years)
            .filter(|(_, year)| **year > TRAILING_WINDOW_AFTER_YEAR)
            .map(|(c, _)| c.points)
            .sum();

        Self {
            points: entry.total_points,
            start,
            end,
            count: comps.len(),
            place,
            first,
            trailing_points,
        }
    }

    fn apply(self, division: Division, summary: &mut DancerSummary) {
        match division {
            Division::Newcomer => {
                summary.new_points = self.points;
                summary.new_start = self.start;
                summary.new_end = self.end;
                summary.new_count = self.count;
            }
            Division::Novice => {
                summary.nov_points = self.points;
                summary.nov_start = self.start;
                summary.nov_end = self.end;
                summary.nov_count = self.count;
                summary.nov_place = self.place;
                summary.nov_first = self.first;
            }
            Division::Intermediate => {
                summary.int_points = self.points;
                summary.int_start = self.start;
                summary.int_end = self.end;
                summary.int_count = self.count;
                summary.int_place = self.place;
                summary.int_first = self.first;
            }
            Division::Advanced => {
                summary.adv_points = self.points;
                summary.adv_start = self.start;
                summary.adv_end = self.end;
                summary.adv_count = self.count;
                summary.adv_place = self.place;
                summary.adv_first = self.first;
                summary.adv_3y = self.trailing_points;
            }
            Division::AllStar => {
                summary.als_points = self.points;
                summary.als_start = self.start;
                summary.als_end = self.end;
                summary.als_count = self.count;
                summary.als_place = self.place;
                summary.als_first = self.first;
                summary.als_3y = self.trailing_points;
            }
        }
    }
}

/// Build the summary for one dancer from their lookup payload.
pub fn summarize(record: &LookupResponse, dance_style: &str) -> Result<DancerSummary, TransformError> {
    let mut summary = DancerSummary::empty(record.wscid());

    // Early registry entries have no placements at all, and some only
    // have placements in other styles
    let Some(entries) = record.style(dance_style) else {
        return Ok(summary);
    };

    // Primary role is the role of the very first recorded competition
    summary.role = entries
        .first()
        .and_then(|entry| entry.competitions.first())
        .map(|comp| comp.role.clone())
        .unwrap_or_default();

    let mut last_entry: Option<&DivisionEntry> = None;
    for entry in entries {
        let years = entry
            .competitions
            .iter()
            .map(|c| event_year(&c.event.date))
            .collect::<Result<Vec<_>, _>>()?;

        last_entry = Some(entry);

        let Some(division) = Division::from_api_name(&entry.division.name) else {
            continue;
        };
        DivisionStats::from_entry(entry, &years).apply(division, &mut summary);
    }

    summary.end_date = latest_end_date(&summary);
    summary.division = current_division(&summary)?;

    // Region comes from the last division entry only, whatever its name
    summary.region = last_entry.and_then(|entry| infer_region(entry.locations()));

    Ok(summary)
}

/// End date of the highest division with any results. Walks the ladder
/// upward and keeps the last non-empty date, so it is not a true maximum
/// when events were recorded out of order.
fn latest_end_date(summary: &DancerSummary) -> String {
    Division::ALL
        .iter()
        .map(|division| summary.end_date_for(*division))
        .filter(|date| !date.is_empty())
        .last()
        .unwrap_or_default()
        .to_string()
}

/// Apply the promotion rules in ladder order; every rule whose guard holds
/// overrides the ones before it.
fn current_division(summary: &DancerSummary) -> Result<Division, TransformError> {
    let mut division = Division::Newcomer;

    if summary.nov_points != 0 {
        division = Division::Novice;
    }
    if summary.nov_points >= NOVICE_POINTS_TO_INTERMEDIATE {
        division = Division::Intermediate;
    }
    if summary.int_points >= INTERMEDIATE_POINTS_TO_ADVANCED {
        division = Division::Advanced;
    }
    // An All-Star entry without competitions has no end date to check
    if summary.als_points > 0
        && !summary.als_end.is_empty()
        && event_year(&summary.als_end)? > ALL_STAR_ACTIVE_AFTER_YEAR
    {
        division = Division::AllStar;
    }

    Ok(division)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use serde_json::{json, Value};

    fn comp(points: i64, result: &str, location: &str, date: &str) -> Value {
        json!({
            "role": "leader",
            "points": points,
            "result": result,
            "event": {"id": 1, "name": "Test Event", "location": location, "date": date}
        })
    }

    fn division(name: &str, total_points: i64, competitions: Vec<Value>) -> Value {
        json!({
            "division": {"id": 1, "name": name, "abbreviation": "X"},
            "total_points": total_points,
            "competitions": competitions
        })
    }

    fn record(divisions: Vec<Value>) -> LookupResponse {
        let value = json!({
            "type": "dancer",
            "dancer": {"id": 9, "first_name": "Sam", "last_name": "Doe", "wscid": 4321},
            "placements": {"West Coast Swing": divisions}
        });
        LookupResponse::from_value(value).unwrap().unwrap()
    }

    fn summarize_wcs(record: &LookupResponse) -> DancerSummary {
        summarize(record, DEFAULT_DANCE_STYLE).expect("summary")
    }

    #[test]
    fn test_missing_placements_give_default_summary() {
        let value = json!({"type": "dancer", "dancer": {"wscid": 77}, "placements": []});
        let record = LookupResponse::from_value(value).unwrap().unwrap();
        let summary = summarize_wcs(&record);

        assert_eq!(summary, DancerSummary::empty(77));
        assert_eq!(summary.division, Division::Newcomer);
        assert_eq!(summary.nov_count + summary.new_count + summary.als_count, 0);
    }

    #[test]
    fn test_other_style_only_gives_default_summary() {
        let value = json!({
            "type": "dancer",
            "dancer": {"wscid": 78},
            "placements": {"Lindy Hop": [division("Novice", 20, vec![comp(10, "1", "Berlin, Germany", "May 2017")])]}
        });
        let record = LookupResponse::from_value(value).unwrap().unwrap();
        assert_eq!(summarize_wcs(&record), DancerSummary::empty(78));
    }

    #[test]
    fn test_novice_only_with_fifteen_points_is_intermediate() {
        let record = record(vec![division(
            "Novice",
            15,
            vec![
                comp(10, "2", "Seattle, WA", "April 2017"),
                comp(3, "F", "Portland, OR", "January 2017"),
                comp(2, "5", "Phoenix, AZ", "October 2016"),
            ],
        )]);
        let summary = summarize_wcs(&record);

        assert_eq!(summary.id, 4321);
        assert_eq!(summary.division, Division::Intermediate);
        assert_eq!(summary.role, "leader");
        assert_eq!(summary.nov_points, 15);
        assert_eq!(summary.nov_count, 3);
        assert_eq!(summary.nov_end, "April 2017");
        assert_eq!(summary.nov_start, "October 2016");
        assert_eq!(summary.end_date, "April 2017");
        assert_eq!(summary.nov_place, 1);
        assert!(!summary.nov_first);
        assert_eq!(summary.region, Some(Region::WestCoast));
    }

    #[test]
    fn test_novice_under_threshold_stays_novice() {
        let record = record(vec![division("Novice", 14, vec![comp(14, "1", "Seattle, WA", "April 2017")])]);
        let summary = summarize_wcs(&record);
        assert_eq!(summary.division, Division::Novice);
        assert!(summary.nov_first);
    }

    #[test]
    fn test_intermediate_thirty_points_is_advanced_without_all_star() {
        let record = record(vec![
            division("Intermediate", 30, vec![comp(15, "1", "Chicago, IL", "March 2016")]),
            division("Novice", 16, vec![comp(16, "1", "Chicago, IL", "May 2015")]),
        ]);
        let summary = summarize_wcs(&record);
        assert_eq!(summary.division, Division::Advanced);
        assert_eq!(summary.int_points, 30);
    }

    #[test]
    fn test_advanced_points_alone_do_not_promote() {
        let record = record(vec![division("Advanced", 30, vec![comp(15, "1", "Chicago, IL", "March 2016")])]);
        let summary = summarize_wcs(&record);
        assert_eq!(summary.adv_points, 30);
        assert_eq!(summary.division, Division::Newcomer);
    }

    #[test]
    fn test_all_star_requires_recent_result() {
        let recent = record(vec![
            division("All-Stars", 3, vec![comp(3, "4", "Denver, CO", "July 2015")]),
            division("Intermediate", 45, vec![comp(15, "1", "Denver, CO", "July 2012")]),
        ]);
        assert_eq!(summarize_wcs(&recent).division, Division::AllStar);

        let stale = record(vec![
            division("All-Stars", 3, vec![comp(3, "4", "Denver, CO", "July 2014")]),
            division("Intermediate", 45, vec![comp(15, "1", "Denver, CO", "July 2012")]),
        ]);
        assert_eq!(summarize_wcs(&stale).division, Division::Advanced);
    }

    #[test]
    fn test_trailing_points_ignore_old_events() {
        let record = record(vec![
            division(
                "Advanced",
                40,
                vec![
                    comp(10, "1", "Boston, MA", "June 2016"),
                    comp(15, "1", "Boston, MA", "June 2015"),
                    comp(15, "1", "Boston, MA", "June 2014"),
                ],
            ),
            division(
                "All-Stars",
                12,
                vec![
                    comp(12, "1", "Boston, MA", "February 2015"),
                ],
            ),
        ]);
        let summary = summarize_wcs(&record);
        assert_eq!(summary.adv_3y, 10);
        assert_eq!(summary.als_3y, 0);
        assert_eq!(summary.adv_place, 3);
        assert!(summary.adv_first);
        assert_eq!(summary.adv_start, "June 2014");
        assert_eq!(summary.adv_end, "June 2016");
    }

    #[test]
    fn test_end_date_is_last_non_empty_up_the_ladder() {
        let record = record(vec![
            division("Advanced", 2, vec![comp(2, "F", "Seattle, WA", "March 2015")]),
            division("Intermediate", 31, vec![comp(6, "3", "Seattle, WA", "August 2018")]),
            division("Newcomer", 4, vec![comp(4, "1", "Seattle, WA", "May 2012")]),
        ]);
        let summary = summarize_wcs(&record);
        // Advanced is scanned after Intermediate, so its older date wins
        assert_eq!(summary.end_date, "March 2015");
        assert_eq!(summary.new_count, 1);
        assert_eq!(summary.new_points, 4);
    }

    #[test]
    fn test_unknown_divisions_are_ignored() {
        let record = record(vec![
            division("Novice", 5, vec![comp(5, "2", "Seattle, WA", "April 2017")]),
            division("Masters", 40, vec![comp(15, "1", "Berlin, Germany", "April 2017")]),
        ]);
        let summary = summarize_wcs(&record);
        assert_eq!(summary.nov_points, 5);
        assert_eq!(summary.division, Division::Novice);
        assert_eq!(summary.adv_points + summary.als_points, 0);
    }

    #[test]
    fn test_region_uses_last_division_entry_only() {
        let record = record(vec![
            division(
                "Novice",
                20,
                (0..12).map(|_| comp(1, "F", "Seattle, WA", "April 2017")).collect(),
            ),
            division("Masters", 3, vec![comp(3, "3", "Berlin, Germany", "April 2017")]),
        ]);
        // Only the Masters entry's single German event is classified
        assert_eq!(summarize_wcs(&record).region, Some(Region::Europe));
    }

    #[test]
    fn test_malformed_date_fails_the_record() {
        let record = record(vec![division("Novice", 3, vec![comp(3, "4", "Seattle, WA", "sometime")])]);
        let err = summarize(&record, DEFAULT_DANCE_STYLE).unwrap_err();
        assert!(matches!(err, TransformError::MalformedDate { ref date } if date == "sometime"));
    }

    #[test]
    fn test_malformed_date_in_ignored_division_still_fails() {
        let record = record(vec![division("Juniors", 3, vec![comp(3, "4", "Seattle, WA", "")])]);
        assert!(summarize(&record, DEFAULT_DANCE_STYLE).is_err());
    }

    #[test]
    fn test_division_without_competitions_degrades_to_defaults() {
        let record = record(vec![division("Novice", 0, vec![])]);
        let summary = summarize_wcs(&record);
        assert_eq!(summary.role, "");
        assert_eq!(summary.nov_count, 0);
        assert_eq!(summary.nov_start, "");
        assert_eq!(summary.region, None);
        assert_eq!(summary.division, Division::Newcomer);
    }

    #[test]
    fn test_all_star_points_without_competitions_keep_lower_division() {
        let record = record(vec![
            division("Novice", 16, vec![comp(16, "1", "Seattle, WA", "May 2017")]),
            division("All-Stars", 3, vec![]),
        ]);
        let summary = summarize(&record, DEFAULT_DANCE_STYLE).expect("empty All-Star entry is not an error");
        assert_eq!(summary.division, Division::Intermediate);
        assert_eq!(summary.als_points, 3);
        assert_eq!(summary.als_count, 0);
        assert_eq!(summary.als_end, "");
        assert_eq!(summary.end_date, "May 2017");
    }

    #[test]
    fn test_custom_dance_style() {
        let value = json!({
            "type": "dancer",
            "dancer": {"wscid": 5},
            "placements": {"Lindy Hop": [division("Novice", 6, vec![comp(6, "1", "Stockholm, Sweden", "May 2019")])]}
        });
        let record = LookupResponse::from_value(value).unwrap().unwrap();
        let summary = summarize(&record, "Lindy Hop").unwrap();
        assert_eq!(summary.division, Division::Novice);
        assert_eq!(summary.region, Some(Region::Europe));
    }
}
