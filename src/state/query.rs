/// Query engine: filter + sort
///
/// Given the full catalog, a filter selection and a sort key, produces the
/// ordered working set. Everything here is a pure transformation of the
/// catalog; nothing is cached between runs.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::course::{CourseRecord, FieldValue};
use super::semester;

/// The four fields the user can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterField {
    Level,
    Credits,
    Instructor,
    Department,
}

impl FilterField {
    /// All filter fields, in the order the filter controls are shown
    pub const ALL: [FilterField; 4] = [
        FilterField::Level,
        FilterField::Credits,
        FilterField::Instructor,
        FilterField::Department,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Level => "Level",
            FilterField::Credits => "Credits",
            FilterField::Instructor => "Instructor",
            FilterField::Department => "Department",
        }
    }
}

/// Filter criteria applied to the catalog
///
/// Each criterion is either unset (`None`, matches everything) or an exact
/// value. All set criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub level: Option<String>,
    pub credits: Option<String>,
    pub instructor: Option<String>,
    pub department: Option<String>,
}

impl FilterSelection {
    /// Create an empty selection (matches every record)
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no criterion is set
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Clear all criteria
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Level => self.level.as_deref(),
            FilterField::Credits => self.credits.as_deref(),
            FilterField::Instructor => self.instructor.as_deref(),
            FilterField::Department => self.department.as_deref(),
        }
    }

    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        let slot = match field {
            FilterField::Level => &mut self.level,
            FilterField::Credits => &mut self.credits,
            FilterField::Instructor => &mut self.instructor,
            FilterField::Department => &mut self.department,
        };
        *slot = value;
    }

    /// Copy of this selection with one criterion replaced
    pub fn with(&self, field: FilterField, value: Option<String>) -> Self {
        let mut next = self.clone();
        next.set(field, value);
        next
    }

    /// Whether a record satisfies every set criterion
    ///
    /// Level and credits use loose equality (`3` matches `"3"`);
    /// instructor and department must match exactly.
    pub fn matches(&self, course: &CourseRecord) -> bool {
        let loose = |selected: &Option<String>, value: &Option<FieldValue>| match selected {
            None => true,
            Some(selected) => value.as_ref().is_some_and(|v| v.loosely_equals(selected)),
        };

        loose(&self.level, &course.level)
            && loose(&self.credits, &course.credits)
            && self
                .instructor
                .as_ref()
                .map_or(true, |selected| *selected == course.instructor)
            && self
                .department
                .as_ref()
                .map_or(true, |selected| course.department.as_ref() == Some(selected))
    }
}

/// Ordering applied to the filtered set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Keep catalog order
    #[default]
    None,
    TitleAsc,
    TitleDesc,
    Id,
    SemesterNewest,
    SemesterOldest,
}

impl SortKey {
    /// All sort keys, in the order the sort control lists them
    pub const ALL: [SortKey; 6] = [
        SortKey::None,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::Id,
        SortKey::SemesterNewest,
        SortKey::SemesterOldest,
    ];

    /// Short token used in configuration ("title-asc", "date-new", ...)
    pub fn token(self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::Id => "id",
            SortKey::SemesterNewest => "date-new",
            SortKey::SemesterOldest => "date-old",
        }
    }

    fn compare(self, a: &CourseRecord, b: &CourseRecord) -> Ordering {
        match self {
            SortKey::None => Ordering::Equal,
            SortKey::TitleAsc => locale_compare(text(&a.title), text(&b.title)),
            SortKey::TitleDesc => locale_compare(text(&b.title), text(&a.title)),
            SortKey::Id => locale_compare(text(&a.id), text(&b.id)),
            SortKey::SemesterNewest => semester_of(b).cmp(&semester_of(a)),
            SortKey::SemesterOldest => semester_of(a).cmp(&semester_of(b)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::None => "Unsorted",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::Id => "Course ID",
            SortKey::SemesterNewest => "Semester (newest first)",
            SortKey::SemesterOldest => "Semester (oldest first)",
        })
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(SortKey::None);
        }
        SortKey::ALL
            .into_iter()
            .find(|key| key.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn semester_of(course: &CourseRecord) -> i64 {
    semester::ordinal(course.semester.as_deref())
}

/// Positions (into `catalog`) of the working set, filtered then sorted
///
/// Filtering keeps catalog order and the sort is stable, so records that
/// compare equal stay in catalog order.
pub fn select(catalog: &[CourseRecord], filter: &FilterSelection, sort: SortKey) -> Vec<usize> {
    let mut positions: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, course)| filter.matches(course))
        .map(|(position, _)| position)
        .collect();

    if sort != SortKey::None {
        positions.sort_by(|&a, &b| sort.compare(&catalog[a], &catalog[b]));
    }

    positions
}

/// Evaluate a query over the catalog, returning the ordered working set
pub fn evaluate<'a>(
    catalog: &'a [CourseRecord],
    filter: &FilterSelection,
    sort: SortKey,
) -> Vec<&'a CourseRecord> {
    select(catalog, filter, sort)
        .into_iter()
        .map(|position| &catalog[position])
        .collect()
}

/// Human-friendly string comparison
///
/// Letters compare case- and accent-insensitively first ("Écologie" sorts
/// with "Ecologie"), and whitespace sorts before punctuation, punctuation
/// before digits, digits before letters. Ties are broken by accents
/// (unaccented first), then by case (lowercase first).
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = base_chars(a)
        .map(primary_weight)
        .cmp(base_chars(b).map(primary_weight));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = a
        .nfd()
        .flat_map(char::to_lowercase)
        .cmp(b.nfd().flat_map(char::to_lowercase));
    if secondary != Ordering::Equal {
        return secondary;
    }

    let tertiary = base_chars(a)
        .map(char::is_uppercase)
        .cmp(base_chars(b).map(char::is_uppercase));
    tertiary.then_with(|| a.cmp(b))
}

/// Decomposed characters with combining marks stripped
fn base_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|&c| !is_combining_mark(c))
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<CourseRecord> {
        catalog::parse(
            r#"[
                {"id": "C1", "title": "Intro", "level": "100", "credits": 3,
                 "department": "CS", "semester": "Fall 2023"},
                {"id": "C2", "title": "Advanced", "level": "300", "credits": 4,
                 "instructor": "Dr. X", "department": "CS", "semester": "Spring 2022"}
            ]"#,
        )
        .unwrap()
    }

    fn mixed() -> Vec<CourseRecord> {
        catalog::parse(
            r#"[
                {"id": "M3", "title": "databases", "level": 200, "credits": "3",
                 "instructor": "Lee", "department": "CS", "semester": "Winter 2024"},
                {"id": "H1", "title": "Art History", "level": "100", "credits": 2,
                 "department": "ART", "semester": "Fall 2021"},
                {"id": "m2", "title": "Calculus", "level": 200, "credits": 4,
                 "instructor": "Lee", "department": "MATH", "semester": "Summer 2024"},
                {"id": "B7", "title": "biology", "level": "200", "credits": 3,
                 "instructor": "Ng", "semester": "Fall 2024"},
                {"id": "X9", "title": "Zoology"}
            ]"#,
        )
        .unwrap()
    }

    fn ids(records: &[&CourseRecord]) -> Vec<String> {
        records
            .iter()
            .map(|course| course.id.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_round_trip_example() {
        let catalog = sample();

        let filter = FilterSelection::new().with(FilterField::Department, Some("CS".into()));
        let by_title = evaluate(&catalog, &filter, SortKey::TitleAsc);
        assert_eq!(ids(&by_title), vec!["C2", "C1"]);

        let newest = evaluate(&catalog, &FilterSelection::new(), SortKey::SemesterNewest);
        assert_eq!(ids(&newest), vec!["C1", "C2"]);
    }

    #[test]
    fn test_unset_filter_matches_everything() {
        let catalog = mixed();
        let all = evaluate(&catalog, &FilterSelection::new(), SortKey::None);
        assert_eq!(ids(&all), vec!["M3", "H1", "m2", "B7", "X9"]);
    }

    #[test]
    fn test_loose_equality_on_level_and_credits() {
        let catalog = mixed();

        let level = FilterSelection::new().with(FilterField::Level, Some("200".into()));
        assert_eq!(
            ids(&evaluate(&catalog, &level, SortKey::None)),
            vec!["M3", "m2", "B7"]
        );

        let credits = FilterSelection::new().with(FilterField::Credits, Some("3".into()));
        assert_eq!(
            ids(&evaluate(&catalog, &credits, SortKey::None)),
            vec!["M3", "B7"]
        );
    }

    #[test]
    fn test_exact_equality_on_instructor_and_department() {
        let catalog = mixed();

        let tba = FilterSelection::new().with(FilterField::Instructor, Some("TBA".into()));
        assert_eq!(ids(&evaluate(&catalog, &tba, SortKey::None)), vec!["H1", "X9"]);

        let lowercase = FilterSelection::new().with(FilterField::Department, Some("cs".into()));
        assert!(evaluate(&catalog, &lowercase, SortKey::None).is_empty());
    }

    #[test]
    fn test_boolean_levels_do_not_match_their_option_text() {
        let catalog = catalog::parse(r#"[{"id": "T", "level": true}, {"id": "O", "level": 1}]"#).unwrap();

        let by_text = FilterSelection::new().with(FilterField::Level, Some("true".into()));
        assert!(evaluate(&catalog, &by_text, SortKey::None).is_empty());

        let by_number = FilterSelection::new().with(FilterField::Level, Some("1".into()));
        assert_eq!(ids(&evaluate(&catalog, &by_number, SortKey::None)), vec!["T", "O"]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let catalog = mixed();
        let filter = FilterSelection::new()
            .with(FilterField::Instructor, Some("Lee".into()))
            .with(FilterField::Credits, Some("4".into()));

        assert_eq!(ids(&evaluate(&catalog, &filter, SortKey::None)), vec!["m2"]);
    }

    #[test]
    fn test_filter_is_idempotent_subsequence() {
        let catalog = mixed();
        let filter = FilterSelection::new().with(FilterField::Level, Some("200".into()));

        let once = select(&catalog, &filter, SortKey::None);
        let filtered: Vec<CourseRecord> = once.iter().map(|&p| catalog[p].clone()).collect();
        let twice = select(&filtered, &filter, SortKey::None);

        assert_eq!(twice, (0..filtered.len()).collect::<Vec<_>>());
        assert!(once.len() <= catalog.len());
        assert!(once.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_title_desc_is_reverse_of_title_asc() {
        let catalog = mixed();
        let filter = FilterSelection::new();

        let mut asc = ids(&evaluate(&catalog, &filter, SortKey::TitleAsc));
        let desc = ids(&evaluate(&catalog, &filter, SortKey::TitleDesc));
        asc.reverse();

        assert_eq!(asc, desc);
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let catalog = mixed();
        let sorted = evaluate(&catalog, &FilterSelection::new(), SortKey::TitleAsc);
        assert_eq!(ids(&sorted), vec!["H1", "B7", "m2", "M3", "X9"]);
    }

    #[test]
    fn test_id_sort() {
        let catalog = mixed();
        let sorted = evaluate(&catalog, &FilterSelection::new(), SortKey::Id);
        assert_eq!(ids(&sorted), vec!["B7", "H1", "m2", "M3", "X9"]);
    }

    #[test]
    fn test_semester_sorts() {
        let catalog = mixed();
        let filter = FilterSelection::new();

        let newest = evaluate(&catalog, &filter, SortKey::SemesterNewest);
        assert_eq!(ids(&newest), vec!["B7", "m2", "M3", "H1", "X9"]);

        let oldest = evaluate(&catalog, &filter, SortKey::SemesterOldest);
        assert_eq!(ids(&oldest), vec!["X9", "H1", "M3", "m2", "B7"]);
    }

    #[test]
    fn test_sort_applies_to_filtered_set_only() {
        let catalog = mixed();
        let filter = FilterSelection::new().with(FilterField::Instructor, Some("Lee".into()));

        let sorted = evaluate(&catalog, &filter, SortKey::TitleAsc);
        assert_eq!(ids(&sorted), vec!["m2", "M3"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let catalog = catalog::parse(
            r#"[
                {"id": "A", "semester": "Fall 2023"},
                {"id": "B", "semester": "Spring 2020"},
                {"id": "C", "semester": "Fall 2023"}
            ]"#,
        )
        .unwrap();

        let newest = evaluate(&catalog, &FilterSelection::new(), SortKey::SemesterNewest);
        assert_eq!(ids(&newest), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_selection_helpers() {
        let mut filter = FilterSelection::new();
        assert!(filter.is_unset());

        filter.set(FilterField::Credits, Some("3".into()));
        assert_eq!(filter.get(FilterField::Credits), Some("3"));
        assert!(!filter.is_unset());

        filter.reset();
        assert!(filter.is_unset());
    }

    #[test]
    fn test_sort_key_tokens() {
        assert_eq!("".parse::<SortKey>(), Ok(SortKey::None));
        assert_eq!("title-desc".parse::<SortKey>(), Ok(SortKey::TitleDesc));
        assert_eq!("DATE-NEW".parse::<SortKey>(), Ok(SortKey::SemesterNewest));
        assert!("sideways".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(locale_compare("10", "9"), Ordering::Less);
        assert_eq!(locale_compare("", "a"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_folds_accents() {
        assert_eq!(locale_compare("Écologie", "Finance"), Ordering::Less);
        assert_eq!(locale_compare("Écologie", "Dance"), Ordering::Greater);
        assert_eq!(locale_compare("Ecologie", "Écologie"), Ordering::Less);
        assert_eq!(locale_compare("écologie", "Ecologie"), Ordering::Greater);
        assert_eq!(locale_compare("café", "cafe"), Ordering::Greater);
        assert_eq!(locale_compare("cafés", "cafez"), Ordering::Less);
    }

    #[test]
    fn test_title_sort_places_accented_titles_by_base_letter() {
        let catalog = catalog::parse(
            r#"[
                {"id": "Z", "title": "Zoology"},
                {"id": "E", "title": "Écologie"},
                {"id": "F", "title": "Finance"}
            ]"#,
        )
        .unwrap();

        let sorted = evaluate(&catalog, &FilterSelection::new(), SortKey::TitleAsc);
        assert_eq!(ids(&sorted), vec!["E", "F", "Z"]);

        let reversed = evaluate(&catalog, &FilterSelection::new(), SortKey::TitleDesc);
        assert_eq!(ids(&reversed), vec!["Z", "F", "E"]);
    }
}
