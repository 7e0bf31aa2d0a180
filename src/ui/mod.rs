//! egui widgets. Everything here reads [`crate::state::DashboardState`] and
//! reports interactions as [`crate::state::DashboardEvent`]s.

pub mod charts;
pub mod panels;
pub mod table;
