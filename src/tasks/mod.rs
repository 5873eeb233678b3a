//! Background tasks module
//!
//! The periodic tickers that drive a running or paused timer.

pub mod ticker;

pub(crate) use ticker::ticker_task;
