mod decode;
mod fixtures;

pub use decode::*;
pub use fixtures::*;

/// Routes `log` output of the packers through the test harness.
///
/// Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
