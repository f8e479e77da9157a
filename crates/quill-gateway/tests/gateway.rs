//! End-to-end gateway tests over an in-memory vault.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use quill_config::{DailyNoteSettings, StaticDailySettings};
use quill_core::{CapabilityTier, CapabilityToken, DirectoryRule};
use quill_gateway::{
    ExtensionProvider, Gateway, GatewayBuilder, GatewayResult, ToolResult,
};
use quill_resolve::FixedClock;
use quill_vault::MemoryVault;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        NaiveDate::from_ymd_opt(2023, 5, 9).expect("valid date"),
    ))
}

fn gateway(vault: MemoryVault) -> Gateway {
    GatewayBuilder::new(
        Arc::new(vault),
        Arc::new(StaticDailySettings::enabled(DailyNoteSettings::new(
            "YYYY-MM-DD",
            "daily",
        ))),
        clock(),
    )
    .build()
    .expect("gateway builds")
}

fn restricted() -> CapabilityToken {
    CapabilityToken::new("t-restricted", CapabilityTier::Restricted)
}

fn readonly() -> CapabilityToken {
    CapabilityToken::new("t-readonly", CapabilityTier::ReadOnly)
}

fn full() -> CapabilityToken {
    CapabilityToken::new("t-full", CapabilityTier::Full)
}

#[tokio::test]
async fn test_gated_tool_indistinguishable_from_unregistered() {
    let gw = gateway(MemoryVault::seeded([("a.md", "body")]));
    let token = readonly();

    let gated = gw
        .call_tool("write_document", &token, json!({"uri": "a.md", "content": "x"}))
        .await;
    let missing = gw.call_tool("write_document", &token, json!({})).await;
    assert!(gated.is_error);
    assert_eq!(gated, missing, "arguments must not matter before the gate");

    // The gated name and a never-registered name produce the same shape,
    // differing only in the echoed name.
    let unregistered = gw.call_tool("no_such_tool", &token, json!({})).await;
    assert!(unregistered.is_error);
    assert_eq!(gated.text_content(), "unknown tool: write_document");
    assert_eq!(unregistered.text_content(), "unknown tool: no_such_tool");
}

#[tokio::test]
async fn test_list_tools_filters_by_tier() {
    let gw = gateway(MemoryVault::seeded([("a.md", "")]));

    let names = |token: &CapabilityToken| -> Vec<String> {
        gw.list_tools(token).into_iter().map(|t| t.name).collect()
    };

    assert_eq!(names(&restricted()), vec!["list_resources"]);
    assert_eq!(
        names(&readonly()),
        vec![
            "list_resources",
            "read_document",
            "list_directory",
            "complete_path",
            "open_daily_note",
        ]
    );
    assert_eq!(
        names(&full()),
        vec![
            "list_resources",
            "read_document",
            "list_directory",
            "complete_path",
            "open_daily_note",
            "write_document",
            "append_document",
            "replace_in_document",
        ]
    );
}

#[tokio::test]
async fn test_read_document_leaf_and_directory() {
    let gw = gateway(MemoryVault::seeded([
        ("notes/a.md", "alpha"),
        ("notes/b.md", "beta"),
    ]));
    let token = readonly();

    let leaf = gw
        .call_tool("read_document", &token, json!({"uri": "notes/a.md"}))
        .await;
    assert!(!leaf.is_error);
    assert_eq!(leaf.text_content(), "alpha");

    let dir = gw
        .call_tool("read_document", &token, json!({"uri": "notes/"}))
        .await;
    assert!(!dir.is_error);
    assert_eq!(dir.text_content(), "a.md\nb.md");
}

#[tokio::test]
async fn test_daily_today_resolves_through_clock() {
    let gw = gateway(MemoryVault::seeded([("daily/2023-05-09.md", "today body")]));
    let token = readonly();

    let result = gw
        .call_tool("read_document", &token, json!({"uri": "daily:///today"}))
        .await;
    assert!(!result.is_error);
    assert_eq!(result.text_content(), "today body");

    // Empty daily path means "today".
    let bare = gw
        .call_tool("read_document", &token, json!({"uri": "daily:///"}))
        .await;
    assert_eq!(bare.text_content(), "today body");
}

#[tokio::test]
async fn test_daily_missing_note_mentions_create() {
    let gw = gateway(MemoryVault::seeded([("daily/2023-05-09.md", "")]));
    let result = gw
        .call_tool(
            "read_document",
            &readonly(),
            json!({"uri": "daily://tomorrow"}),
        )
        .await;
    assert!(result.is_error);
    let msg = result.text_content();
    assert!(msg.contains("tomorrow"), "message names the alias: {msg}");
    assert!(msg.contains("create"), "message offers the escape hatch: {msg}");
}

#[tokio::test]
async fn test_open_daily_note_create_requires_full_tier() {
    let gw = gateway(MemoryVault::seeded([("daily/2023-05-09.md", "")]));

    let denied = gw
        .call_tool(
            "open_daily_note",
            &readonly(),
            json!({"alias": "tomorrow", "create": true}),
        )
        .await;
    assert!(denied.is_error);
    assert_eq!(denied.text_content(), "access denied: daily/2023-05-10.md");

    let created = gw
        .call_tool(
            "open_daily_note",
            &full(),
            json!({"alias": "tomorrow", "create": true}),
        )
        .await;
    assert!(!created.is_error, "{}", created.text_content());

    // The note now exists and reads back without the create flag.
    let reread = gw
        .call_tool("open_daily_note", &readonly(), json!({"alias": "tomorrow"}))
        .await;
    assert!(!reread.is_error);
}

#[tokio::test]
async fn test_open_daily_note_explicit_date() {
    let gw = gateway(MemoryVault::seeded([("daily/2023-04-01.md", "april")]));
    let result = gw
        .call_tool("open_daily_note", &readonly(), json!({"alias": "2023-04-01"}))
        .await;
    assert!(!result.is_error);
    assert_eq!(result.text_content(), "april");
}

#[tokio::test]
async fn test_list_directory_depth_zero_collapses() {
    let gw = gateway(MemoryVault::seeded([
        ("dir2/file5.md", ""),
        ("dir2/subdir/file6.md", ""),
    ]));
    let result = gw
        .call_tool(
            "list_directory",
            &readonly(),
            json!({"path": "dir2", "depth": 0}),
        )
        .await;
    assert!(!result.is_error);
    assert_eq!(result.text_content(), "file5.md\nsubdir/");
}

#[tokio::test]
async fn test_replace_requires_exactly_one_match() {
    let gw = gateway(MemoryVault::seeded([("a.md", "x y x")]));
    let token = full();

    let ambiguous = gw
        .call_tool(
            "replace_in_document",
            &token,
            json!({"uri": "a.md", "find": "x", "replace": "z"}),
        )
        .await;
    assert!(ambiguous.is_error);
    assert!(ambiguous.text_content().contains("2 occurrences"));

    let ok = gw
        .call_tool(
            "replace_in_document",
            &token,
            json!({"uri": "a.md", "find": "y", "replace": "z"}),
        )
        .await;
    assert!(!ok.is_error);

    let content = gw
        .call_tool("read_document", &token, json!({"uri": "a.md"}))
        .await;
    assert_eq!(content.text_content(), "x z x");
}

#[tokio::test]
async fn test_longest_prefix_policy_end_to_end() {
    let gw = gateway(MemoryVault::seeded([
        ("secret/private.md", "hidden"),
        ("secret/shared/open.md", "visible"),
        ("notes/a.md", "plain"),
    ]));
    let token = readonly().with_rules([
        DirectoryRule::deny("secret"),
        DirectoryRule::allow("secret/shared"),
    ]);

    let allowed = gw
        .call_tool(
            "read_document",
            &token,
            json!({"uri": "secret/shared/open.md"}),
        )
        .await;
    assert!(!allowed.is_error);
    assert_eq!(allowed.text_content(), "visible");

    // Denied reads are not-found, never access-denied.
    let denied = gw
        .call_tool("read_document", &token, json!({"uri": "secret/private.md"}))
        .await;
    assert!(denied.is_error);
    assert_eq!(denied.text_content(), "not found: secret/private.md");

    let unruled = gw
        .call_tool("read_document", &token, json!({"uri": "notes/a.md"}))
        .await;
    assert_eq!(unruled.text_content(), "plain");
}

#[tokio::test]
async fn test_write_denial_depends_on_existence() {
    let gw = gateway(MemoryVault::seeded([("secret/existing.md", "old")]));
    let token = full().with_rules([DirectoryRule::deny("secret")]);

    let existing = gw
        .call_tool(
            "write_document",
            &token,
            json!({"uri": "secret/existing.md", "content": "new"}),
        )
        .await;
    assert!(existing.is_error);
    assert_eq!(existing.text_content(), "access denied: secret/existing.md");

    let absent = gw
        .call_tool(
            "write_document",
            &token,
            json!({"uri": "secret/new.md", "content": "new"}),
        )
        .await;
    assert!(absent.is_error);
    assert_eq!(absent.text_content(), "not found: secret/new.md");
}

#[tokio::test]
async fn test_append_creates_and_separates_lines() {
    let gw = gateway(MemoryVault::seeded([("a.md", "first")]));
    let token = full();

    let created = gw
        .call_tool(
            "append_document",
            &token,
            json!({"uri": "fresh.md", "content": "hello"}),
        )
        .await;
    assert!(!created.is_error);

    gw.call_tool(
        "append_document",
        &token,
        json!({"uri": "a.md", "content": "second"}),
    )
    .await;
    let content = gw
        .call_tool("read_document", &token, json!({"uri": "a.md"}))
        .await;
    assert_eq!(content.text_content(), "first\nsecond");
}

#[tokio::test]
async fn test_resource_scheme_listing_by_tier() {
    let gw = gateway(MemoryVault::seeded([("a.md", "")]));

    let schemes: Vec<String> = gw
        .list_resource_schemes(&readonly())
        .into_iter()
        .map(|r| r.scheme)
        .collect();
    assert_eq!(schemes, vec!["direct", "daily"]);

    assert!(gw.list_resource_schemes(&restricted()).is_empty());

    // The list_resources tool mirrors the same visibility.
    let via_tool = gw.call_tool("list_resources", &restricted(), json!({})).await;
    assert!(!via_tool.is_error);
    assert_eq!(via_tool.text_content(), "");
}

#[tokio::test]
async fn test_read_resource_by_uri() {
    let gw = gateway(MemoryVault::seeded([("notes/a.md", "alpha")]));
    let result = gw
        .read_resource("direct:///notes/a.md", &readonly())
        .await;
    assert!(!result.is_error);
    assert_eq!(result.text_content(), "alpha");

    // The daily scheme resolves and routes to its own resource type.
    let gw = gateway(MemoryVault::seeded([("daily/2023-05-09.md", "today")]));
    let result = gw.read_resource("daily:///today", &readonly()).await;
    assert_eq!(result.text_content(), "today");
}

#[tokio::test]
async fn test_complete_daily_scheme() {
    let gw = gateway(MemoryVault::seeded([("daily/2023-05-08.md", "")]));
    let out = gw.complete("daily", "to", &readonly()).await.unwrap();
    assert_eq!(out, vec!["today", "tomorrow"]);

    let out = gw.complete("daily", "2023", &readonly()).await.unwrap();
    assert_eq!(out, vec!["2023-05-08"]);
}

struct TasksProvider {
    enabled: bool,
}

#[async_trait]
impl ExtensionProvider for TasksProvider {
    fn scheme(&self) -> &str {
        "tasks"
    }

    fn description(&self) -> &str {
        "open tasks across the vault"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn list(&self, _token: &CapabilityToken) -> GatewayResult<Vec<String>> {
        Ok(vec!["open".to_string(), "done".to_string()])
    }

    async fn read(&self, path: &str, _token: &CapabilityToken) -> GatewayResult<ToolResult> {
        Ok(ToolResult::text(format!("tasks query: {path}")))
    }
}

fn gateway_with_tasks(enabled: bool) -> Gateway {
    GatewayBuilder::new(
        Arc::new(MemoryVault::seeded([("a.md", "")])),
        Arc::new(StaticDailySettings::disabled()),
        clock(),
    )
    .with_extension(Arc::new(TasksProvider { enabled }))
    .build()
    .expect("gateway builds")
}

#[tokio::test]
async fn test_extension_scheme_routed_to_provider() {
    let gw = gateway_with_tasks(true);
    let token = readonly();

    let result = gw
        .call_tool("read_document", &token, json!({"uri": "tasks:///open"}))
        .await;
    assert!(!result.is_error);
    assert_eq!(result.text_content(), "tasks query: open");

    let result = gw.read_resource("tasks:///open", &token).await;
    assert_eq!(result.text_content(), "tasks query: open");

    let listed = gw.list_resources("tasks", &token).await.unwrap();
    assert_eq!(listed, vec!["open", "done"]);
}

#[tokio::test]
async fn test_disabled_extension_reads_as_unknown_scheme() {
    let gw = gateway_with_tasks(false);
    let result = gw
        .call_tool("read_document", &readonly(), json!({"uri": "tasks:///open"}))
        .await;
    assert!(result.is_error);
    assert_eq!(result.text_content(), "unknown resource scheme: tasks");
}

#[tokio::test]
async fn test_duplicate_extension_scheme_rejected_at_build() {
    let result = GatewayBuilder::new(
        Arc::new(MemoryVault::seeded([("a.md", "")])),
        Arc::new(StaticDailySettings::disabled()),
        clock(),
    )
    .with_extension(Arc::new(TasksProvider { enabled: true }))
    .with_extension(Arc::new(TasksProvider { enabled: true }))
    .build();
    assert!(result.is_err());
}

#[tokio::test]
async fn test_rejected_uri_forms() {
    let gw = gateway(MemoryVault::seeded([("a.md", "body")]));
    let token = readonly();

    for uri in [
        "http://example.com/a.md",
        "../escape.md",
        "direct://user@host/a.md",
    ] {
        let result = gw.call_tool("read_document", &token, json!({"uri": uri})).await;
        assert!(result.is_error, "expected rejection for {uri}");
    }

    // Percent-encoded segments decode before lookup.
    let gw = gateway(MemoryVault::seeded([("my note.md", "spaced")]));
    let result = gw
        .call_tool("read_document", &token, json!({"uri": "my%20note.md"}))
        .await;
    assert_eq!(result.text_content(), "spaced");
}
