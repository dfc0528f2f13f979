//! Region inference from event location strings.
//!
//! Locations are matched by substring against fixed keyword sets, checked
//! in order West Coast, Midwest, East Coast, Other. A location matching
//! none of them counts as Europe.

use crate::models::Region;

/// West Coast US plus British Columbia
const WEST_COAST: &[&str] = &[
    ", WA", ", OR", ", CA", " NV", " AZ", "Vancouver, Canada", ", BC", "Oregon",
];

/// Midwest US plus Texas
const MIDWEST: &[&str] = &[
    ", CO", ", MO", ", OK", ", TX", ", LA", ", IL", ", WI", ", KY", ", MI", "Texas", ", OH",
    ", IN", ", MN",
];

/// East Coast US plus the rest of Canada
const EAST_COAST: &[&str] = &[
    ", QC", ", NY", ", MA", ", PA", ", NJ", ", NC", ", GA", ", FL", ", MD", ", DC", "Alberta",
    "Canada", ", VA", ", TN", "Philadelphia", ", SC", ", CT",
];

const OTHER: &[&str] = &["Singapore", "Korea", "Australia", "New Zealand", "Brazil"];

/// Europe wins with this many events regardless of plurality
const EUROPE_OVERRIDE_MIN: usize = 5;

/// Other wins with this many events regardless of plurality
const OTHER_OVERRIDE_MIN: usize = 3;

/// Below this many events in total, a single Europe/Other event is decisive
const SPARSE_HISTORY_TOTAL: usize = 10;

/// Classify a single event location. First matching keyword set wins.
pub fn classify_location(location: &str) -> Region {
    let keyword_sets = [
        (Region::WestCoast, WEST_COAST),
        (Region::Midwest, MIDWEST),
        (Region::EastCoast, EAST_COAST),
        (Region::Other, OTHER),
    ];

    keyword_sets
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| location.contains(k)))
        .map(|(region, _)| *region)
        .unwrap_or(Region::Europe)
}

/// Per-region event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionCounts {
    counts: [usize; 5],
}

impl RegionCounts {
    pub fn from_locations<'a, I>(locations: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::default();
        for location in locations {
            counts.add(classify_location(location));
        }
        counts
    }

    pub fn add(&mut self, region: Region) {
        self.counts[region.index()] += 1;
    }

    pub fn merge(&mut self, other: &RegionCounts) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    pub fn get(&self, region: Region) -> usize {
        self.counts[region.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, usize)> + '_ {
        Region::ALL.iter().map(move |region| (*region, self.get(*region)))
    }

    /// Region with the most events; ties go to the earlier region in
    /// `Region::ALL`. All-zero counts are not treated as a tie won by
    /// West Coast: with nothing counted the result is `None`, so a dancer
    /// without locations gets an empty region column.
    pub fn plurality(&self) -> Option<Region> {
        if self.total() == 0 {
            return None;
        }
        let mut best = Region::ALL[0];
        for (region, count) in self.iter() {
            if count > self.get(best) {
                best = region;
            }
        }
        Some(best)
    }

    /// Final region: plurality, then the Europe override, then the Other
    /// override. Later overrides win.
    pub fn resolve(&self) -> Option<Region> {
        let mut region = self.plurality()?;
        let total = self.total();

        let europe = self.get(Region::Europe);
        if europe >= EUROPE_OVERRIDE_MIN || (europe >= 1 && total < SPARSE_HISTORY_TOTAL) {
            region = Region::Europe;
        }

        let other = self.get(Region::Other);
        if other >= OTHER_OVERRIDE_MIN || (other >= 1 && total < SPARSE_HISTORY_TOTAL) {
            region = Region::Other;
        }

        Some(region)
    }
}

/// Classify a dancer from a list of event locations.
pub fn infer_region<'a, I>(locations: I) -> Option<Region>
where
    I: IntoIterator<Item = &'a str>,
{
    RegionCounts::from_locations(locations).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(location: &'static str, n: usize) -> Vec<&'static str> {
        std::iter::repeat(location).take(n).collect()
    }

    #[test]
    fn test_classify_location() {
        assert_eq!(classify_location("Seattle, WA"), Region::WestCoast);
        assert_eq!(classify_location("Vancouver, Canada"), Region::WestCoast);
        assert_eq!(classify_location("Toronto, Canada"), Region::EastCoast);
        assert_eq!(classify_location("Houston, TX"), Region::Midwest);
        assert_eq!(classify_location("Singapore"), Region::Other);
        assert_eq!(classify_location("Sydney, Australia"), Region::Other);
        assert_eq!(classify_location("Berlin, Germany"), Region::Europe);
        assert_eq!(classify_location(""), Region::Europe);
    }

    #[test]
    fn test_first_matching_set_wins() {
        // ", CA" (West Coast) is checked before "Canada" (East Coast)
        assert_eq!(classify_location("Calgary, CA"), Region::WestCoast);
        // "Texas" is Midwest even though nothing else matches
        assert_eq!(classify_location("Dallas Texas"), Region::Midwest);
    }

    #[test]
    fn test_plurality_and_ties() {
        let mut locations = repeat("Seattle, WA", 6);
        locations.extend(repeat("Chicago, IL", 6));
        let counts = RegionCounts::from_locations(locations);
        assert_eq!(counts.plurality(), Some(Region::WestCoast));

        let mut locations = repeat("Boston, MA", 12);
        locations.extend(repeat("Seattle, WA", 3));
        assert_eq!(infer_region(locations), Some(Region::EastCoast));
    }

    #[test]
    fn test_europe_override_beats_plurality() {
        // 4 West Coast + 5 unmatched out of 9
        let mut locations = repeat("Seattle, WA", 4);
        locations.extend(repeat("Berlin, Germany", 5));
        let counts = RegionCounts::from_locations(locations.iter().copied());
        assert_eq!(counts.get(Region::Europe), 5);
        assert_eq!(counts.total(), 9);
        assert_eq!(counts.resolve(), Some(Region::Europe));

        // 20 West Coast still loses to 5 Europe
        let mut locations = repeat("Portland, OR", 20);
        locations.extend(repeat("Paris, France", 5));
        assert_eq!(infer_region(locations), Some(Region::Europe));

        // A single Europe event decides a sparse history
        let mut locations = repeat("Portland, OR", 8);
        locations.push("Paris, France");
        assert_eq!(infer_region(locations), Some(Region::Europe));
    }

    #[test]
    fn test_europe_minority_in_long_history_keeps_plurality() {
        let mut locations = repeat("Portland, OR", 12);
        locations.extend(repeat("Paris, France", 4));
        assert_eq!(infer_region(locations), Some(Region::WestCoast));
    }

    #[test]
    fn test_other_override_beats_europe_override() {
        let mut locations = repeat("Paris, France", 6);
        locations.extend(repeat("Singapore", 3));
        locations.extend(repeat("Seattle, WA", 10));
        assert_eq!(infer_region(locations), Some(Region::Other));

        let locations = vec!["Paris, France", "Auckland, New Zealand"];
        assert_eq!(infer_region(locations), Some(Region::Other));
    }

    #[test]
    fn test_no_locations_has_no_region() {
        assert_eq!(infer_region(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_all_zero_counts_have_no_plurality() {
        let counts = RegionCounts::default();
        assert_eq!(counts.plurality(), None);
        assert_eq!(counts.resolve(), None);
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut total = RegionCounts::from_locations(["Seattle, WA", "Berlin, Germany"]);
        total.merge(&RegionCounts::from_locations(["Seattle, WA", "Singapore"]));
        assert_eq!(total.get(Region::WestCoast), 2);
        assert_eq!(total.get(Region::Europe), 1);
        assert_eq!(total.get(Region::Other), 1);
        assert_eq!(total.total(), 4);
    }
}
