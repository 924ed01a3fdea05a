//! golayers - Go syntax highlighting layers
//!
//! Modules:
//! - syntax: parsing, classification, byte -> rune offset mapping, layer aggregation
//! - theme: category -> style registry
//! - settings: JSON overrides for the theme

pub mod settings;
pub mod syntax;
pub mod theme;

pub use settings::Settings;
pub use syntax::{Category, Layer, Layers, Span, Syntax, SyntaxError, SyntaxErrors};
pub use theme::{Color, Style, Theme};
