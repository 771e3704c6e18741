//! Version comparison between the CLI and a template store

use semver::Version;

/// Parse a version, tolerating a leading `v`
fn parse_version(version: &str) -> Option<Version> {
    let cleaned = version.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// Compare the CLI version against the version a template store declares.
///
/// Returns a warning when the store was published for a newer CLI. Versions
/// that fail to parse never produce a warning.
pub fn check_compatibility(
    cli_version: &str,
    store_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli = parse_version(cli_version)?;
    let store = parse_version(store_version)?;

    (cli < store).then(|| {
        format!(
            "These templates were published for CLI version {} or newer, you are running {}. \
             Consider updating: {}",
            store, cli, upgrade_command
        )
    })
}
