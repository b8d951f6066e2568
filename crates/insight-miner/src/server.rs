use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use insight_core::pipeline::SynthesisPipeline;

use crate::mcp_api::{
    ListTopicsResponse, SynthesizeInsightsParams, SynthesizeInsightsResponse, TopicInfo,
};

#[derive(Clone)]
pub struct InsightMinerServer {
    pipeline: Arc<SynthesisPipeline>,
    tool_router: ToolRouter<InsightMinerServer>,
}

impl InsightMinerServer {
    pub fn new(pipeline: Arc<SynthesisPipeline>) -> Self {
        Self {
            pipeline,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl InsightMinerServer {
    #[tool(
        description = "Generate categorized insights from award-winning campaigns. \
                       Query format: '<N> insights about <topic>' (e.g. '5 insights about mothers')."
    )]
    async fn synthesize_insights(
        &self,
        Parameters(params): Parameters<SynthesizeInsightsParams>,
    ) -> Result<Json<SynthesizeInsightsResponse>, String> {
        info!(query = %params.query, "synthesize_insights tool invoked");
        let response = self.pipeline.respond(&params.query).await;
        Ok(Json(response.into()))
    }

    #[tool(description = "List the topic keywords that have curated campaigns.")]
    async fn list_topics(&self) -> Result<Json<ListTopicsResponse>, String> {
        let catalog = self.pipeline.catalog();
        Ok(Json(ListTopicsResponse {
            topics: catalog.topics().into_iter().map(TopicInfo::from).collect(),
            default_campaign_count: catalog.default_campaigns().len(),
        }))
    }
}

#[tool_handler]
impl ServerHandler for InsightMinerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "insight-miner".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "InsightMiner MCP server. Use synthesize_insights with a query like \
                 '3 insights about Gen Z' to get emotional, human-truth, behavioral, cultural \
                 and religious insights drawn from real campaigns. Use list_topics to see which \
                 topics have curated campaigns; other topics use a general award-winning set."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use insight_core::catalog::Catalog;
    use insight_core::composer::FixedOpener;
    use insight_core::pipeline::SynthesisPipeline;
    use rmcp::handler::server::wrapper::Parameters;

    use super::InsightMinerServer;
    use crate::mcp_api::SynthesizeInsightsParams;

    fn server() -> InsightMinerServer {
        let pipeline = SynthesisPipeline::new(Arc::new(Catalog::builtin()))
            .with_picker(Arc::new(FixedOpener(1)));
        InsightMinerServer::new(Arc::new(pipeline))
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = InsightMinerServer::tool_router().list_all();
        for name in ["synthesize_insights", "list_topics"] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[tokio::test]
    async fn synthesize_tool_echoes_query() {
        let server = server();
        let response = server
            .synthesize_insights(Parameters(SynthesizeInsightsParams {
                query: "2 insights about sustainability".to_string(),
            }))
            .await
            .expect("tool never fails")
            .0;
        assert_eq!(response.query, "2 insights about sustainability");
        assert_eq!(response.insights.len(), 2);
        assert_eq!(response.insights[1].category, "human_truths");
        assert!(response.insights[0].text.starts_with("Emotional attachment forms when "));
    }

    #[tokio::test]
    async fn synthesize_tool_handles_blank_query() {
        let server = server();
        let response = server
            .synthesize_insights(Parameters(SynthesizeInsightsParams {
                query: "   ".to_string(),
            }))
            .await
            .expect("tool never fails")
            .0;
        assert_eq!(response.insights.len(), 1);
        assert_eq!(response.insights[0].brand, "Cannes Lions");
    }

    #[tokio::test]
    async fn list_topics_reports_catalog() {
        let response = server().list_topics().await.expect("list topics").0;
        assert!(response.topics.iter().any(|t| t.keyword == "mothers" && t.campaign_count == 4));
        assert_eq!(response.default_campaign_count, 4);
    }
}
