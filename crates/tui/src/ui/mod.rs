//! UI rendering module for the terminal site.
//!
//! This module provides the runtime loop, the main view that routes input,
//! the components, and the theme.

pub mod components;
pub mod layout;
pub mod main_component;
pub mod runtime;
pub mod theme;
