//! Single-threaded, topic-keyed publish/subscribe bus.
//!
//! The bus decouples producers from consumers inside one process: producers
//! publish a typed payload to a string topic, and every handler subscribed to
//! that topic with the same payload type is invoked synchronously.
//!
//! Modules are organized by responsibility:
//! - [`bus`] hosts [`EventBus`], the dispatch engine
//! - [`subscription`] defines the type-erased handler storage
//! - [`queue`] holds envelopes for deferred delivery
//! - [`stats`] provides the per-topic diagnostics table
//! - [`error`] defines the error type handlers return
//!
//! # Delivery guarantees
//!
//! - `publish` delivers to a snapshot of the handlers registered when dispatch
//!   begins; subscribe/unsubscribe calls made by handlers take effect on the
//!   next publish.
//! - `queue_event` never dispatches. Envelopes are delivered in FIFO order by
//!   `process_queued_events`, which drains only what was queued on entry.
//! - A handler that returns an error or panics is logged and skipped; every
//!   other handler still receives the payload.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use event_bus::EventBus;
//!
//! let bus = EventBus::new();
//! let titles = Rc::new(RefCell::new(Vec::new()));
//! let id = {
//!     let titles = Rc::clone(&titles);
//!     bus.subscribe("quest.completed", move |title: &String| {
//!         titles.borrow_mut().push(title.clone());
//!         Ok(())
//!     })
//!     .expect("topic is not empty")
//! };
//!
//! bus.publish("quest.completed", String::from("Rat Problem"));
//! assert_eq!(*titles.borrow(), vec![String::from("Rat Problem")]);
//! assert_eq!(bus.statistics().published("quest.completed"), 1);
//!
//! assert!(bus.unsubscribe("quest.completed", id));
//! ```
pub mod bus;
pub mod error;
pub mod queue;
pub mod stats;
pub mod subscription;

pub use bus::{BusConfig, EventBus};
pub use error::{HandlerError, HandlerResult};
pub use stats::{Statistics, TopicStats};
pub use subscription::SubscriptionId;
