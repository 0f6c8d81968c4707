//! Project flaky tests view
//!
//! Fetches flaky test statistics through [`flakeview_client`], shapes them
//! into chart series ([`chart`]), escapes test output for tooltips
//! ([`escape`]) and binds everything to the page template ([`render`]).
//! [`server`] hosts the view over HTTP.

pub mod chart;
pub mod error;
pub mod escape;
pub mod render;
pub mod route;
pub mod server;
pub mod state;
pub mod view;

pub use crate::chart::{
    classify, flaky_ratio, ChartData, ChartFormatter, ChartOptions, ChartPoint, FlakyRunsFormatter,
    ResultClass, SeriesKind,
};
pub use crate::error::{DashboardError, DashboardResult};
pub use crate::escape::{escape_text, pre_tooltip};
pub use crate::render::render_page;
pub use crate::route::ViewRoute;
pub use crate::state::{Activation, ProjectFlakyTestsState};
pub use crate::view::{FlakyTestView, FlakyTestsView};
