//! The solver module contains the decomposed neighborhood search and its building blocks.
//!
//! A search round constructs a yard template with [`YardTemplateHeuristic`](crate::construction::YardTemplateHeuristic),
//! evaluates it with a [`SubproblemOracle`], improves it with cost guided neighbors, optionally
//! refines it locally and finally shakes the priority order used by the next round. Costs observed
//! in the oracle's schedules are attributed back to (vessel period, subblock) cells and guide both
//! the neighborhood and the next construction.
//!
//! # Examples
//!
//! ```
//! # use std::sync::Arc;
//! use yard_core::prelude::*;
//! use yard_core::models::{Path, VesselPeriod};
//!
//! let instance = (0..2)
//!     .fold(
//!         InstanceBuilder::new(10, 20)
//!             .add_vessel("first")
//!             .add_vessel("second")
//!             .add_period(VesselPeriod::new(0, "first-1", Interval::new(0, 3)))
//!             .add_period(VesselPeriod::new(1, "second-1", Interval::new(5, 3)))
//!             .add_road(50)
//!             .add_flow(0, 1, 15),
//!         |builder, lane| {
//!             let path = Path::new(1. + lane as Float, vec![0]);
//!             builder
//!                 .add_subblock(0, lane)
//!                 .add_route(0, lane, path.clone(), path.clone())
//!                 .add_route(1, lane, path.clone(), path)
//!         },
//!     )
//!     .build()?;
//!
//! let instance = Arc::new(instance);
//! let oracle = GreedyScheduleOracle::new(instance.clone());
//! let config = SearchConfig::default().with_shaking(2, 1, true);
//!
//! let result = DecomposedNeighborhoodSearch::new(instance, oracle, config, Environment::new_repeatable(0)).solve();
//!
//! assert!(result.best.is_some());
//! # Ok::<(), GenericError>(())
//! ```

mod attribution;
pub use self::attribution::*;

mod batch;
pub use self::batch::*;

mod config;
pub use self::config::*;

mod neighborhood;
pub use self::neighborhood::*;

mod oracle;
pub use self::oracle::*;

mod queue;
pub use self::queue::*;

mod refinement;
pub use self::refinement::*;

mod search;
pub use self::search::*;

mod shake;
pub use self::shake::*;

mod telemetry;
pub use self::telemetry::*;
