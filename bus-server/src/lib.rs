//! KMB bus route browser.
//!
//! A small web application that lists Kowloon Motor Bus routes from the
//! Hong Kong transport open-data API, with search by route number.

pub mod config;
pub mod fetch;
pub mod routes;
pub mod web;
