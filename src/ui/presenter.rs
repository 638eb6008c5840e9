/// Presentation model for the course list and the detail panel
///
/// Turns the working set into plain display data; the widgets in
/// `ui::widgets` only lay this data out.
use crate::state::course::CourseRecord;

/// Notice shown instead of an empty list
pub const NO_MATCHES: &str = "No courses match the selected filters.";

/// One row of the course list
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Position in the working set
    pub position: usize,
    /// "<id> - <title> (<level>)"
    pub summary: String,
    /// At most one item is highlighted
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Empty(&'static str),
    Items(Vec<ListItem>),
}

/// Full field listing of the selected record
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub heading: String,
    pub rows: Vec<(&'static str, String)>,
}

/// Render the working set as a selectable list
pub fn render(list: &[&CourseRecord], selected: Option<usize>) -> ListView {
    if list.is_empty() {
        return ListView::Empty(NO_MATCHES);
    }

    let items = list
        .iter()
        .enumerate()
        .map(|(position, course)| ListItem {
            position,
            summary: course.summary(),
            selected: selected == Some(position),
        })
        .collect();

    ListView::Items(items)
}

/// Render the detail view of one record
pub fn render_detail(course: &CourseRecord) -> DetailView {
    DetailView {
        heading: course.heading(),
        rows: course.details(),
    }
}
