use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use tracing_subscriber::EnvFilter;

mod config;
mod state;
mod ui;

use config::ViewerConfig;
use state::app::{AppState, Command, LoadTicket};
use state::catalog::{self, ParseError};
use state::options::FilterChoice;
use state::query::{FilterField, SortKey};
use ui::{presenter, widgets};

/// Main application state
struct CourseViewer {
    /// Catalog, filters and selection
    state: AppState,
    config: ViewerConfig,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the "Open Course File" button
    OpenFile,
    /// Background file read finished
    FileRead(LoadTicket, Result<String, ParseError>),
    /// User picked a value in one of the filter dropdowns
    FilterPicked(FilterField, FilterChoice),
    SortPicked(SortKey),
    /// User clicked a course in the list
    CourseClicked(usize),
}

impl CourseViewer {
    /// Create a new instance of the application
    fn new(config: ViewerConfig) -> (Self, Task<Message>) {
        let state = AppState::new(config.initial_sort);
        tracing::info!(sort = config.initial_sort.token(), "course viewer initialized");

        (CourseViewer { state, config }, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFile => {
                // Show the native file picker dialog
                let mut dialog = FileDialog::new()
                    .set_title("Select Course Catalog")
                    .add_filter("JSON", &["json"]);
                if let Some(dir) = &self.config.start_dir {
                    dialog = dialog.set_directory(dir);
                }

                if let Some(path) = dialog.pick_file() {
                    tracing::info!(path = %path.display(), "reading course file");

                    // A newer read supersedes any read still in flight
                    let ticket = self.state.begin_load();
                    return Task::perform(catalog::read_catalog_file(path), move |result| {
                        Message::FileRead(ticket, result)
                    });
                }

                Task::none()
            }
            Message::FileRead(ticket, result) => {
                if self.state.accept_load(ticket) {
                    self.state.handle(match result {
                        Ok(raw) => Command::FileLoaded(raw),
                        Err(err) => Command::LoadFailed(err),
                    });
                }
                Task::none()
            }
            Message::FilterPicked(field, choice) => {
                let filter = self.state.filter().with(field, choice.criterion());
                self.state.handle(Command::FilterChanged(filter));
                Task::none()
            }
            Message::SortPicked(sort) => {
                self.state.handle(Command::SortChanged(sort));
                Task::none()
            }
            Message::CourseClicked(position) => {
                self.state.handle(Command::ItemSelected(position));
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text("Course Viewer").size(32),
            button("Open Course File")
                .on_press(Message::OpenFile)
                .padding(10),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let list = widgets::course_list(presenter::render(
            &self.state.working_set(),
            self.state.selected(),
        ));

        // The detail panel only appears once a course is selected
        let detail: Element<Message> = match self.state.selected_record() {
            Some(course) => widgets::detail_panel(presenter::render_detail(course)),
            None => horizontal_space().into(),
        };

        let content = column![
            header,
            widgets::status_bar(self.state.status(), self.state.error_message()),
            widgets::filter_bar(self.state.options(), self.state.filter(), self.state.sort()),
            row![
                container(list).width(Length::FillPortion(1)),
                container(detail).width(Length::FillPortion(1)),
            ]
            .spacing(20)
            .height(Length::Fill),
        ]
        .spacing(16)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.config.dark_theme {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Log to stderr, filtered by the configured directive
fn initialize_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> iced::Result {
    let (config, config_error) = match ViewerConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (ViewerConfig::default(), Some(err)),
    };

    initialize_tracing(&config.log_filter);
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "invalid configuration, using defaults");
    }

    iced::application("Course Viewer", CourseViewer::update, CourseViewer::view)
        .theme(CourseViewer::theme)
        .centered()
        .run_with(move || CourseViewer::new(config))
}
