//! User interface rendering layer with component-based architecture.
//!
//! This module orchestrates the terminal UI, transforming view models into
//! ANSI-styled frames through composable rendering components. It provides
//! theme support, responsive layout, and match highlighting.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel (+ Overlays) → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//! - [`overlay`]: Expiring notifications and shortcut help

pub mod components;
pub mod helpers;
pub mod overlay;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use overlay::Overlays;
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{EmptyState, EntryCard, FooterInfo, HeaderInfo, SearchBarInfo, ToastInfo, UIViewModel};
