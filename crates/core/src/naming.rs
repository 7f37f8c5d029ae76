//! File naming for generated tests

/// Prefix shared by every generated test file
pub const TEST_FILE_PREFIX: &str = "test_";

/// Extension of generated test files
pub const TEST_FILE_SUFFIX: &str = ".py";

/// Characters replaced by `_` when turning a target into a file name
const UNSAFE_CHARS: &[char] = &[':', '.', '/', '\\'];

/// Derive the generated test file name for a target string
///
/// `pkg.utils:Parser.run` becomes `test_pkg_utils_Parser_run.py`.
pub fn generated_test_filename(target: &str) -> String {
    let safe: String = target
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect();
    format!("{TEST_FILE_PREFIX}{safe}{TEST_FILE_SUFFIX}")
}
