//! Web layer for the bus route browser.
//!
//! Serves the two tabs (favourites, bus list) and the route detail modal
//! as server-rendered pages, plus a JSON view of the route list.

mod dto;
mod routes;
mod screens;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use screens::{BusScreen, Presentation, SCREENS, Screen, Theme, detail_path, present, screen, tabs};
pub use state::{AppState, RouteDirectory};
pub use templates::*;
