//! # cs-metric
//!
//! Metric reference data and event-feed evaluation for Courtside.
//!
//! A [`MetricDefinition`] describes how a team statistic is derived from
//! the live event feed: which [`cs_session::EventKind`]s contribute and how
//! they aggregate. The built-in [`MetricCatalog`] is immutable reference
//! data; goals point at catalog entries by id.
//!
//! [`MetricEvaluator`] is the seam between goal evaluation and the feed:
//! the shipped [`EventAggregationEvaluator`] reads a session's events, and
//! tests substitute fixed-value evaluators.

pub mod definition;
pub mod evaluator;

pub use definition::{Aggregation, MetricCatalog, MetricCategory, MetricDefinition};
pub use evaluator::{EventAggregationEvaluator, MetricError, MetricEvaluator};
