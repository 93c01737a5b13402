//! Integration test modules.

mod navigation_test;
mod screen_scenarios_test;
mod transport_mock;
