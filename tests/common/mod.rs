pub mod template_resolver;

/// Prints the crate logs of failing tests. Run with `RUST_LOG=debug` to see them all.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
