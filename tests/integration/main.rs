//! Host-side integration test harness.

mod control_loop_tests;
mod mock_hw;
