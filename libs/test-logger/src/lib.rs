//! Logger for tests.
//!
//! Provides an `rstest` fixture that installs a tracing subscriber once per test binary. Events go through
//! the test harness' captured output and are filtered through `RUST_LOG`, defaulting to debug output for the matrix crates.

use rstest::fixture;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The filter used when `RUST_LOG` isn't set.
pub const DEFAULT_FILTER: &str = "matrix_engine=debug,matrix_calculator=debug,matrix_calc=debug";

/// Marker returned by the [tracing] fixture.
pub struct Tracing;

/// Installs the subscriber. Request it as a test argument to get log output for that test binary.
#[fixture]
#[once]
pub fn tracing() -> Tracing {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer().with_test_writer();

    // Another harness may have installed a global subscriber already.
    let _ = tracing_subscriber::registry().with(filter_layer).with(fmt_layer).try_init();

    Tracing
}
