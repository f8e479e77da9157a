//! Daily-note tool.

use async_trait::async_trait;
use serde_json::Value;

use quill_core::{CapabilityTier, CapabilityToken};
use quill_policy::is_allowed;
use quill_resolve::{ResolveError, ResolveOptions};

use crate::descriptor::{GatewayContext, ToolHandler};
use crate::error::{GatewayError, GatewayResult};
use crate::tools::{optional_bool, optional_str};
use crate::types::{ToolContent, ToolResult};

/// `open_daily_note` — resolve a date alias to its note and return the
/// content.
///
/// Advertised at `ReadOnly`, but the `create` argument requires `Full`:
/// argument-level gating the per-tool minimum cannot express. Resolution
/// runs without creation first, so policy is checked before any side
/// effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenDailyNoteTool;

#[async_trait]
impl ToolHandler for OpenDailyNoteTool {
    async fn call(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult> {
        let alias = optional_str(&args, "alias").unwrap_or_else(|| "today".to_string());
        let create = optional_bool(&args, "create");
        let uri = format!("daily:///{alias}");

        let address = match ctx
            .resolver
            .resolve(&uri, ResolveOptions::default())
            .await
        {
            Ok(address) => address,
            Err(ResolveError::DailyNoteMissing { alias, path }) => {
                if !create {
                    return Err(ResolveError::DailyNoteMissing { alias, path }.into());
                }
                if token.tier < CapabilityTier::Full {
                    return Err(GatewayError::AccessDenied { path });
                }
                if !is_allowed(&path, token) {
                    return Err(GatewayError::NotFound { path });
                }
                ctx.resolver
                    .resolve(
                        &uri,
                        ResolveOptions {
                            create_if_missing: true,
                        },
                    )
                    .await?
            }
            Err(e) => return Err(e.into()),
        };

        if !is_allowed(&address.canonical_path, token) {
            return Err(GatewayError::NotFound {
                path: address.canonical_path,
            });
        }

        let text = ctx.vault.read(&address.canonical_path).await?;
        Ok(ToolResult {
            content: vec![ToolContent::Resource {
                uri: format!("daily:///{alias}"),
                text: Some(text),
            }],
            is_error: false,
        })
    }
}
