//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `rates` - annual→monthly rate conversion and prorating
//! - `loans` - amortization policies and schedule invariants
//! - `virtual_expenses` - education/medical band synthesis
//! - `engine` - full projections, phase transitions, terminal detection
//! - `scores` - readiness score mappings and bounds

mod virtual_expenses;
