//! Integration tests for managed block merging.

use agentsync_blocks::{TOML_MARKERS, find_managed_block, merge_managed_block, wrap_managed_block};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const SERVERS: &str = "[mcp_servers.context7]\ncommand = \"npx\"\n";

fn managed(inner: &str) -> String {
    wrap_managed_block(inner, TOML_MARKERS)
}

#[test]
fn test_user_content_around_block_preserved() {
    let existing = "model = \"o3\"\n\n# === AGENTSYNC START ===\n[mcp_servers.old]\ncommand = \"old\"\n# === AGENTSYNC END ===\n\n[profiles.fast]\nmodel = \"mini\"\n";
    let merged = merge_managed_block(Some(existing), &managed(SERVERS), TOML_MARKERS);

    assert_eq!(
        merged,
        "model = \"o3\"\n\n# === AGENTSYNC START ===\n[mcp_servers.context7]\ncommand = \"npx\"\n# === AGENTSYNC END ===\n\n[profiles.fast]\nmodel = \"mini\"\n"
    );
}

#[test]
fn test_no_file_then_read_back() {
    let merged = merge_managed_block(None, &managed(SERVERS), TOML_MARKERS);
    let block = find_managed_block(&merged, TOML_MARKERS).unwrap();

    assert_eq!(merged, managed(SERVERS));
    assert!(block.inner.contains("[mcp_servers.context7]"));
}

#[test]
fn test_block_at_end_without_trailing_newline() {
    let existing = "a = 1\n# === AGENTSYNC START ===\nold\n# === AGENTSYNC END ===";
    let merged = merge_managed_block(Some(existing), &managed("new"), TOML_MARKERS);

    assert_eq!(
        merged,
        "a = 1\n# === AGENTSYNC START ===\nnew\n# === AGENTSYNC END ===\n"
    );
}

#[rstest]
#[case::empty_existing("")]
#[case::plain("model = \"o3\"")]
#[case::plain_newline("model = \"o3\"\n")]
#[case::with_block("x\n# === AGENTSYNC START ===\nold\n# === AGENTSYNC END ===\ny\n")]
#[case::stray_start("# === AGENTSYNC START ===\nhand edited\n")]
#[case::stray_end("# === AGENTSYNC END ===\n")]
fn test_merge_is_idempotent(#[case] existing: &str) {
    let block = managed(SERVERS);
    let once = merge_managed_block(Some(existing), &block, TOML_MARKERS);
    let twice = merge_managed_block(Some(&once), &block, TOML_MARKERS);
    assert_eq!(once, twice);
}

#[rstest]
#[case("model = \"o3\"", "model = \"o3\"\n\n")]
#[case("model = \"o3\"\n", "model = \"o3\"\n\n")]
#[case("a\n\n", "a\n\n\n")]
fn test_append_separator(#[case] existing: &str, #[case] prefix: &str) {
    let block = managed(SERVERS);
    let merged = merge_managed_block(Some(existing), &block, TOML_MARKERS);
    assert_eq!(merged, format!("{prefix}{block}"));
}

#[test]
fn test_stray_start_keeps_user_text() {
    let existing = "# === AGENTSYNC START ===\nhand edited\n";
    let merged = merge_managed_block(Some(existing), &managed("new"), TOML_MARKERS);

    assert!(merged.starts_with(existing));
    assert_eq!(find_managed_block(&merged, TOML_MARKERS).unwrap().inner, "new");
}

proptest! {
    #[test]
    fn prop_merge_idempotent(
        prefix in "[a-z =\n#]{0,40}",
        suffix in "[a-z =\n#]{0,40}",
        old in "[a-z =\n]{0,20}",
        inner in "[a-z =\n]{0,20}",
        with_block in any::<bool>(),
    ) {
        let existing = if with_block {
            format!("{prefix}{}{suffix}", managed(&old))
        } else {
            format!("{prefix}{suffix}")
        };
        let block = managed(&inner);
        let once = merge_managed_block(Some(&existing), &block, TOML_MARKERS);
        let twice = merge_managed_block(Some(&once), &block, TOML_MARKERS);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_append_preserves_prefix(existing in "[a-z =\n#\\[\\]]{0,60}", inner in "[a-z =\n]{0,20}") {
        let merged = merge_managed_block(Some(&existing), &managed(&inner), TOML_MARKERS);
        prop_assert!(merged.starts_with(&existing));
    }
}
