#![cfg_attr(test, allow(clippy::expect_used))]

//! Browser-independent core of the guild panel.
//!
//! Everything that can be decided without a DOM lives here: typed commands
//! read from element attributes, request payloads, HTML fragments for every
//! server collection, countdown math, the job console state machine and the
//! Socket.IO text framing. The wasm web shell reads the DOM, hands values to
//! these modules and applies whatever they return.

pub mod accounts;
pub mod action;
pub mod api;
pub mod audit;
pub mod backup;
pub mod broadcast;
pub mod bulk;
pub mod chart;
pub mod config;
pub mod console;
pub mod countdown;
pub mod error;
pub mod form;
pub mod members;
pub mod model;
pub mod page;
pub mod permissions;
pub mod render;
pub mod socket;
pub mod stats;

pub use action::{ActionCommand, CollectionKind, Confirm, InFlight};
pub use api::{ApiEnvelope, ApiRequest, Endpoint, HttpMethod};
pub use config::PanelConfig;
pub use console::{ConsoleEffect, ConsolePhase, JobConsole, JobKind};
pub use error::{ChannelError, ConfigError, RequestError, ValidationError};
pub use form::{FieldValue, FormSnapshot, FormSubmission};
pub use page::{PageContext, PageKind};
