/// User interface module
///
/// - `presenter.rs` - plain display model of the list and detail view
/// - `widgets.rs` - iced widgets built from that model

pub mod presenter;
pub mod widgets;
