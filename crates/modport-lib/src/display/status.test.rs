use super::*;

#[test]
fn test_status_message_formatting() {
    let (status, output) = StatusDisplay::capturing();

    status.working("Copying mod files");
    status.success("rsync", "3.2.7");
    status.error("tool", "not found");
    status.warning("experimental feature");
    status.info("using default config");
    status.message("Plain message");

    assert_eq!(
        output.lines(),
        vec![
            "→ Copying mod files...",
            "✓ rsync: 3.2.7",
            "✗ tool: not found",
            "! experimental feature",
            "· using default config",
            "Plain message",
        ]
    );
}

#[test]
fn test_empty_details_are_omitted() {
    let (status, output) = StatusDisplay::capturing();

    status.success("Export successful", "");
    status.error("Export failed", "");

    assert_eq!(output.lines(), vec!["✓ Export successful", "✗ Export failed"]);
}

#[test]
fn test_list_and_section_layout() {
    let (status, output) = StatusDisplay::capturing();

    status.section("Exported files");
    status.list(&["control.lua".to_string(), "info.json".to_string()]);

    assert_eq!(
        output.lines(),
        vec!["", "Exported files", "  • control.lua", "  • info.json"]
    );
}

#[test]
fn test_tool_check_reports_missing_tool() {
    let (status, output) = StatusDisplay::capturing();

    status.tool_check("rsync", false, "");
    status.tool_check("factorio", true, "/opt/factorio/bin/x64/factorio");

    assert_eq!(
        output.lines(),
        vec![
            "✗ rsync: not found",
            "✓ factorio: /opt/factorio/bin/x64/factorio",
        ]
    );
}

#[test]
fn test_stdout_display_does_not_panic() {
    let status = StatusDisplay::new(false);
    status.info("printed to stdout");
    status.subtle("secondary");
}
