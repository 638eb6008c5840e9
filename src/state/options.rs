/// Filter option sets
///
/// For each filterable field, the distinct values observed in the loaded
/// catalog, sorted as strings and preceded by an "All" choice. Rebuilt in
/// full whenever the catalog is replaced.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::course::CourseRecord;
use super::query::FilterField;

/// One entry in a filter dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChoice {
    /// No constraint on this field
    All,
    Value(String),
}

impl FilterChoice {
    /// The criterion this choice stands for (`None` for "All")
    pub fn criterion(&self) -> Option<String> {
        match self {
            FilterChoice::All => None,
            FilterChoice::Value(value) => Some(value.clone()),
        }
    }

    pub fn from_criterion(criterion: Option<&str>) -> Self {
        match criterion {
            None => FilterChoice::All,
            Some(value) => FilterChoice::Value(value.to_string()),
        }
    }
}

impl fmt::Display for FilterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterChoice::All => f.write_str("All"),
            FilterChoice::Value(value) => f.write_str(value),
        }
    }
}

const ALL_ONLY: &[FilterChoice] = &[FilterChoice::All];

/// Dropdown contents for every filter field
#[derive(Debug, Clone, PartialEq)]
pub struct OptionIndex {
    fields: BTreeMap<FilterField, Vec<FilterChoice>>,
}

impl OptionIndex {
    /// Collect the distinct values of each filter field across the catalog
    ///
    /// Values are compared and sorted by their display text, so `3` and
    /// `"3"` collapse and "10" sorts before "2". Absent values are skipped.
    pub fn build(catalog: &[CourseRecord]) -> Self {
        let fields = FilterField::ALL
            .into_iter()
            .map(|field| {
                let distinct: BTreeSet<String> = catalog
                    .iter()
                    .filter_map(|course| field_text(course, field))
                    .collect();

                let choices = std::iter::once(FilterChoice::All)
                    .chain(distinct.into_iter().map(FilterChoice::Value))
                    .collect();

                (field, choices)
            })
            .collect();

        OptionIndex { fields }
    }

    /// Choices for one field; "All" is always first
    pub fn options(&self, field: FilterField) -> &[FilterChoice] {
        self.fields
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(ALL_ONLY)
    }
}

impl Default for OptionIndex {
    fn default() -> Self {
        Self::build(&[])
    }
}

fn field_text(course: &CourseRecord, field: FilterField) -> Option<String> {
    match field {
        FilterField::Level => course.level.as_ref().map(ToString::to_string),
        FilterField::Credits => course.credits.as_ref().map(ToString::to_string),
        FilterField::Instructor => Some(course.instructor.clone()),
        FilterField::Department => course.department.clone(),
    }
}
