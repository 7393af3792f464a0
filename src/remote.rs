//! Remote copilot service client.
//!
//! The hosted service owns SQL generation, validity checking, warehouse
//! execution, chart generation and training storage; this module is the
//! typed HTTP surface over it. Every operation is a single JSON POST to
//! `{base_url}/v1/{operation}` carrying the workspace model name and the
//! operation parameters, authenticated with the service API key.
//!
//! # Operations
//!
//! | Operation | Parameters | Result |
//! |-----------|------------|--------|
//! | `generate-questions` | none | candidate questions |
//! | `generate-sql` | question | SQL text |
//! | `is-sql-valid` | sql | validity flag |
//! | `run-sql` | sql | tabular result |
//! | `should-generate-chart` | result | chart recommendation |
//! | `generate-plot-code` | question, sql, result | plotting code |
//! | `get-figure` | code, result | rendered figure |
//! | `generate-followups` | question, sql, result | follow-up questions |
//! | `generate-summary` | question, result | summary text |
//! | `get-training-data` | none | stored training examples |
//! | `connect` | project, credentials | session acknowledgement |
//! | `train` | plan | training acknowledgement |
//!
//! Failures propagate directly: there is no retry, no timeout and no local
//! interpretation of responses beyond JSON decoding. A non-2xx status maps
//! to a service error carrying the status and response body.
//!
//! # Example
//!
//! ```
//! use sql_copilot::remote::RemoteClient;
//!
//! let client = RemoteClient::new("https://copilot.internal.example", "vn-key", "flaunt-v1");
//! ```

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::{AppResult, http_error, remote_api_error},
    schema::TrainingPlan,
    table::{Figure, TabularResult}
};

/// Operations the remote service exposes to the accessor facade.
///
/// The facade is generic over this trait so handle lifecycle and
/// memoization can be exercised against scripted implementations.
#[allow(async_fn_in_trait)]
pub trait CopilotOps {
    async fn generate_questions(&self) -> AppResult<Vec<String>>;
    async fn generate_sql(&self, question: &str) -> AppResult<String>;
    async fn is_sql_valid(&self, sql: &str) -> AppResult<bool>;
    async fn run_sql(&self, sql: &str) -> AppResult<TabularResult>;
    async fn should_generate_chart(&self, df: &TabularResult) -> AppResult<bool>;
    async fn generate_plot_code(
        &self,
        question: &str,
        sql: &str,
        df: &TabularResult
    ) -> AppResult<String>;
    async fn get_figure(&self, code: &str, df: &TabularResult) -> AppResult<Figure>;
    async fn generate_followups(
        &self,
        question: &str,
        sql: &str,
        df: &TabularResult
    ) -> AppResult<Vec<String>>;
    async fn generate_summary(&self, question: &str, df: &TabularResult) -> AppResult<String>;
    async fn get_training_data(&self) -> AppResult<TabularResult>;
}

/// HTTP client for the copilot service
pub struct RemoteClient {
    http:     reqwest::Client,
    base_url: String,
    api_key:  String,
    model:    String
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    model: &'a str,
    #[serde(flatten)]
    params: &'a T
}

#[derive(Serialize)]
struct NoParams {}

#[derive(Serialize)]
struct ConnectParams<'a> {
    project_id:  &'a str,
    credentials: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    llm_api_key: Option<&'a str>
}

#[derive(Serialize)]
struct TrainParams<'a> {
    plan: &'a TrainingPlan
}

#[derive(Serialize)]
struct SqlGenParams<'a> {
    question:              &'a str,
    allow_llm_to_see_data: bool
}

#[derive(Serialize)]
struct SqlParams<'a> {
    sql: &'a str
}

#[derive(Serialize)]
struct ResultParams<'a> {
    df: &'a TabularResult
}

#[derive(Serialize)]
struct PlotCodeParams<'a> {
    question: &'a str,
    sql:      &'a str,
    df:       &'a TabularResult
}

#[derive(Serialize)]
struct FigureParams<'a> {
    code: &'a str,
    df:   &'a TabularResult
}

#[derive(Serialize)]
struct FollowupParams<'a> {
    question: &'a str,
    sql:      &'a str,
    df:       &'a TabularResult
}

#[derive(Serialize)]
struct SummaryParams<'a> {
    question: &'a str,
    df:       &'a TabularResult
}

#[derive(Deserialize)]
struct Ack {
    ok: bool
}

#[derive(Deserialize)]
struct QuestionsResponse {
    questions: Vec<String>
}

#[derive(Deserialize)]
struct SqlResponse {
    sql: String
}

#[derive(Deserialize)]
struct ValidityResponse {
    valid: bool
}

#[derive(Deserialize)]
struct ChartDecisionResponse {
    chart_recommended: bool
}

#[derive(Deserialize)]
struct PlotCodeResponse {
    code: String
}

#[derive(Deserialize)]
struct FigureResponse {
    figure: Figure
}

#[derive(Deserialize)]
struct SummaryResponse {
    summary: String
}

impl RemoteClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>
    ) -> Self {
        Self {
            http:     reqwest::Client::new(),
            base_url: base_url.into(),
            api_key:  api_key.into(),
            model:    model.into()
        }
    }

    /// Establish the server-side warehouse session for this model
    pub async fn connect_warehouse(
        &self,
        project_id: &str,
        credentials: &Value,
        llm_api_key: Option<&str>
    ) -> AppResult<()> {
        let ack: Ack = self
            .post(
                "connect",
                &ConnectParams {
                    project_id,
                    credentials,
                    llm_api_key
                }
            )
            .await?;
        if !ack.ok {
            return Err(remote_api_error("Warehouse connection rejected by service"));
        }
        Ok(())
    }

    /// Submit a derived training plan
    pub async fn train(&self, plan: &TrainingPlan) -> AppResult<()> {
        let ack: Ack = self
            .post(
                "train",
                &TrainParams {
                    plan
                }
            )
            .await?;
        if !ack.ok {
            return Err(remote_api_error("Training plan rejected by service"));
        }
        Ok(())
    }

    async fn post<P, R>(&self, operation: &str, params: &P) -> AppResult<R>
    where
        P: Serialize,
        R: DeserializeOwned
    {
        let url = format!(
            "{}/v1/{}",
            self.base_url.trim_end_matches('/'),
            operation
        );
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&Envelope {
                model: &self.model,
                params
            })
            .send()
            .await
            .map_err(http_error)?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(remote_api_error(format!(
                "Copilot API error {}: {}",
                status, text
            )));
        }
        response.json().await.map_err(http_error)
    }
}

impl CopilotOps for RemoteClient {
    async fn generate_questions(&self) -> AppResult<Vec<String>> {
        let result: QuestionsResponse = self.post("generate-questions", &NoParams {}).await?;
        Ok(result.questions)
    }

    async fn generate_sql(&self, question: &str) -> AppResult<String> {
        let result: SqlResponse = self
            .post(
                "generate-sql",
                &SqlGenParams {
                    question,
                    allow_llm_to_see_data: true
                }
            )
            .await?;
        Ok(result.sql)
    }

    async fn is_sql_valid(&self, sql: &str) -> AppResult<bool> {
        let result: ValidityResponse = self
            .post(
                "is-sql-valid",
                &SqlParams {
                    sql
                }
            )
            .await?;
        Ok(result.valid)
    }

    async fn run_sql(&self, sql: &str) -> AppResult<TabularResult> {
        self.post(
            "run-sql",
            &SqlParams {
                sql
            }
        )
        .await
    }

    async fn should_generate_chart(&self, df: &TabularResult) -> AppResult<bool> {
        let result: ChartDecisionResponse = self
            .post(
                "should-generate-chart",
                &ResultParams {
                    df
                }
            )
            .await?;
        Ok(result.chart_recommended)
    }

    async fn generate_plot_code(
        &self,
        question: &str,
        sql: &str,
        df: &TabularResult
    ) -> AppResult<String> {
        let result: PlotCodeResponse = self
            .post(
                "generate-plot-code",
                &PlotCodeParams {
                    question,
                    sql,
                    df
                }
            )
            .await?;
        Ok(result.code)
    }

    async fn get_figure(&self, code: &str, df: &TabularResult) -> AppResult<Figure> {
        let result: FigureResponse = self
            .post(
                "get-figure",
                &FigureParams {
                    code,
                    df
                }
            )
            .await?;
        Ok(result.figure)
    }

    async fn generate_followups(
        &self,
        question: &str,
        sql: &str,
        df: &TabularResult
    ) -> AppResult<Vec<String>> {
        let result: QuestionsResponse = self
            .post(
                "generate-followups",
                &FollowupParams {
                    question,
                    sql,
                    df
                }
            )
            .await?;
        Ok(result.questions)
    }

    async fn generate_summary(&self, question: &str, df: &TabularResult) -> AppResult<String> {
        let result: SummaryResponse = self
            .post(
                "generate-summary",
                &SummaryParams {
                    question,
                    df
                }
            )
            .await?;
        Ok(result.summary)
    }

    async fn get_training_data(&self) -> AppResult<TabularResult> {
        self.post("get-training-data", &NoParams {}).await
    }
}
