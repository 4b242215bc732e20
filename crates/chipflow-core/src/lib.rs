//! Core systems for chipflow.
//!
//! This crate provides the foundational components shared by the chipflow
//! widgets:
//!
//! - **Object Model**: stable identities, parent-child relations, naming
//! - **Signal/Slot System**: type-safe notifications between widgets and hosts
//! - **Logging**: `tracing` targets, object tree dumps, perf spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use chipflow_core::Signal;
//!
//! let chip_removed = Signal::<String>::new();
//! let conn_id = chip_removed.connect(|key| println!("chip {key} removed"));
//! chip_removed.emit("alice".to_string());
//! assert!(chip_removed.disconnect(conn_id));
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::{ObjectError, ObjectResult};
pub use logging::{ObjectTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use object::{global_registry, Object, ObjectBase, ObjectId, ObjectRegistry};
pub use signal::{ConnectionId, Signal};
