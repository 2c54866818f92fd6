//! Coexist – online grouping of time intervals that are active at the same time.
//!
//! Intervals are reported one at a time, in non-decreasing order of start,
//! and partitioned into *coexistence groups*: sets of intervals that
//! transitively overlap. A group is closed, and handed to the listeners, as
//! soon as no future interval can join it.
//!
//! ## Modules
//! * [`interval`] – The [`interval::Interval`] value type, with `start < end`
//!   checked at construction, and [`interval::ReferencedInterval`] which labels
//!   an interval with caller chosen context.
//! * [`group`] – [`group::IntervalList`] keeping members together with their
//!   intersection (*min borders*) and union (*max borders*), and
//!   [`group::IntervalGroup`] adding the founding *basic interval* and the
//!   admission and refinement rules.
//! * [`engine`] – The [`engine::CoexistenceEngine`], holding open groups and
//!   listeners.
//! * [`event`] – [`event::OverlapEvent`] and the [`event::OverlapListener`] trait.
//! * [`config`] – [`config::EngineConfig`], read from `coexist.toml` and
//!   `COEXIST_*` environment variables.
//! * [`input`] – A reader for textual interval streams.
//!
//! ## Grouping Rules
//! A new interval is held against every open group, in the order the groups
//! were opened:
//! * if it starts outside the group's basic interval the group can never grow
//!   again and is closed;
//! * the first group whose basic interval covers the start claims it. If the
//!   interval also starts within the min borders it is simply added. Otherwise
//!   the group is closed and replaced by a refined successor holding the
//!   members still active at that start, followed by the new interval;
//! * an interval that nobody claims opens a new group of its own.
//!
//! Only groups with more than one member are reported.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use coexist::{engine::CoexistenceEngine, event::EventCollector};
//! let engine: CoexistenceEngine = CoexistenceEngine::new();
//! let collector = Arc::new(EventCollector::<()>::new());
//! engine.register_listener(collector.clone()).unwrap();
//! engine.report_interval(0, 10).unwrap();
//! engine.report_interval(5, 15).unwrap();
//! engine.report_interval(12, 20).unwrap();
//! engine.close_reporting().unwrap();
//! assert_eq!(collector.len().unwrap(), 1);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod group;
pub mod input;
pub mod interval;

pub use error::{CoexistError, Result};
