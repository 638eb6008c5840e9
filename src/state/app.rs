use super::catalog::{self, ParseError, INVALID_FILE_MESSAGE};
use super::course::CourseRecord;
use super::options::OptionIndex;
use super::query::{self, FilterSelection, SortKey};

/// Commands that drive the application state.
/// Every user interaction is translated into one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Raw text of a newly read catalog file
    FileLoaded(String),
    /// Reading the catalog file failed
    LoadFailed(ParseError),
    FilterChanged(FilterSelection),
    SortChanged(SortKey),
    /// Position of the chosen record in the working set
    ItemSelected(usize),
}

/// Identifies one file read; only the latest read is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// The AppState owns the loaded catalog and everything derived from it.
/// It is the only place the catalog, the filter/sort choices and the
/// current selection live.
pub struct AppState {
    catalog: Vec<CourseRecord>,
    options: OptionIndex,
    filter: FilterSelection,
    sort: SortKey,
    /// Position into the working set
    selected: Option<usize>,
    error: Option<ParseError>,
    status: String,
    latest_load: u64,
}

impl AppState {
    /// Create an empty state with the given initial sort key
    pub fn new(sort: SortKey) -> Self {
        AppState {
            catalog: Vec::new(),
            options: OptionIndex::default(),
            filter: FilterSelection::new(),
            sort,
            selected: None,
            error: None,
            status: "Ready. Open a course file to begin.".to_string(),
            latest_load: 0,
        }
    }

    /// Apply one command, recomputing whatever it affects
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::FileLoaded(raw) => match catalog::parse(&raw) {
                Ok(records) => self.replace_catalog(records),
                Err(err) => self.reject_load(err),
            },
            Command::LoadFailed(err) => self.reject_load(err),
            Command::FilterChanged(filter) => {
                tracing::debug!(?filter, "filter changed");
                self.filter = filter;
                self.recompute();
            }
            Command::SortChanged(sort) => {
                tracing::debug!(sort = sort.token(), "sort changed");
                self.sort = sort;
                self.recompute();
            }
            Command::ItemSelected(position) => {
                let shown = self.working_set().len();
                if position < shown {
                    tracing::debug!(position, "course selected");
                    self.selected = Some(position);
                } else {
                    tracing::warn!(position, shown, "ignoring out-of-range selection");
                }
            }
        }
    }

    /// Start a new file read; any earlier read in flight becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        LoadTicket(self.latest_load)
    }

    /// Whether a finished read is still the one the user is waiting for
    pub fn accept_load(&self, ticket: LoadTicket) -> bool {
        let current = ticket.0 == self.latest_load;
        if !current {
            tracing::warn!(ticket = ticket.0, latest = self.latest_load, "discarding stale file read");
        }
        current
    }

    /// Swap in a freshly parsed catalog in one step
    fn replace_catalog(&mut self, records: Vec<CourseRecord>) {
        tracing::info!(count = records.len(), "loaded course catalog");

        self.options = OptionIndex::build(&records);
        self.catalog = records;
        self.filter.reset();
        self.error = None;
        self.status = format!("Loaded {} courses.", self.catalog.len());
        self.recompute();
    }

    /// Keep everything as it was and surface the error
    fn reject_load(&mut self, err: ParseError) {
        tracing::warn!(error = %err, "rejected catalog file");
        self.error = Some(err);
    }

    fn recompute(&mut self) {
        self.selected = None;
        tracing::debug!(
            shown = self.working_set().len(),
            total = self.catalog.len(),
            "recomputed working set"
        );
    }

    /// The full catalog, in file order
    #[cfg(test)]
    pub fn catalog(&self) -> &[CourseRecord] {
        &self.catalog
    }

    /// The records currently shown, in display order
    pub fn working_set(&self) -> Vec<&CourseRecord> {
        query::evaluate(&self.catalog, &self.filter, self.sort)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&CourseRecord> {
        let position = self.selected?;
        self.working_set().get(position).copied()
    }

    pub fn options(&self) -> &OptionIndex {
        &self.options
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Text for the error region: empty unless the last load failed
    pub fn error_message(&self) -> &str {
        match self.error {
            Some(_) => INVALID_FILE_MESSAGE,
            None => "",
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SortKey::default())
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("courses", &self.catalog.len())
            .field("shown", &self.working_set().len())
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .finish()
    }
}
