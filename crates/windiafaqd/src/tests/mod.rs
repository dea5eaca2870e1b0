//! Test suites for the daemon bootstrap and reply loop.

mod behaviour;
mod support;
