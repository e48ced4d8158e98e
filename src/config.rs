//! Build-time constants and defaults. Runtime knobs come from the command
//! line and `RUST_LOG`.

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_INPUT: &str = "input.json";
pub const DEFAULT_OUTPUT: &str = "output.json";
/// Where results go when the input is a directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("{APP_NAME}=info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_targets_this_crate() {
        assert_eq!(default_log_filter(), "task_extract=info");
    }
}
