//! Radial topic/item graph visualization component.
//!
//! Renders topics on a ring around the viewport center with their items
//! orbiting them, on an HTML canvas with:
//! - Deterministic radial layout rebuilt only when the data fingerprint changes
//! - Pan, zoom-at-cursor, and node dragging that survives rebuilds
//! - Topic highlight toggling and item selection
//! - Entrance animation and a pulsing ring on the focused item
//!
//! # Example
//!
//! ```ignore
//! use topic_graph::{GraphSnapshot, ItemEntity, TopicEntity, TopicGraphCanvas};
//!
//! let data = GraphSnapshot {
//!     topics: vec![TopicEntity { id: "t1".into(), name: "Rust".into(), .. }],
//!     items: vec![ItemEntity { id: "i1".into(), topic_ids: vec!["t1".into()], .. }],
//! };
//!
//! view! {
//!     <TopicGraphCanvas
//!         data=data
//!         on_item_activated=Callback::new(|id: String| log::info!("open {id}"))
//!     />
//! }
//! ```

pub mod animation;
pub mod camera;
mod component;
pub mod config;
mod error;
pub mod hit;
pub mod interaction;
pub mod model;
mod render;
pub mod scale;
pub mod state;
pub mod theme;
mod types;

pub use camera::{Camera, Point};
pub use component::TopicGraphCanvas;
pub use config::EngineConfig;
pub use error::EngineError;
pub use interaction::Outcome;
pub use model::GraphModel;
pub use theme::Theme;
pub use types::{GraphSnapshot, ItemEntity, TopicEntity};
