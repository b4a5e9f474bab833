//! UI Components
//!
//! `DataTableComponent` is the table itself; the other modules are the
//! pieces it is built from (cells, pagination, form, dialog).

pub mod cells;
pub mod data_table;
pub mod form;
pub mod item_dialog;
pub mod layout;
pub mod paginate;
pub mod renderer;

pub use data_table::{DataTableComponent, TableProps};
pub use layout::{calculate_main_layout, centered_popup};
pub use renderer::{CustomCell, RendererRegistry};
