//! Cached accessor facade consumed by the UI layer.
//!
//! [`CopilotSession`] exposes the ten operations a UI needs, each memoized
//! independently for the lifetime of the session. An accessor digests every
//! declared argument into its cache key, fetches the current handle from the
//! factory on a miss, invokes exactly one delegated operation and returns
//! the result unchanged. Accessors never share cache entries, add no
//! validation of their own, and do not remember failures.

use crate::{
    cache::{MemoCache, memo_key},
    error::AppResult,
    factory::{Bootstrap, ClientFactory},
    remote::CopilotOps,
    table::{Figure, TabularResult}
};

/// One UI session's worth of memoized copilot accessors
pub struct CopilotSession<B: Bootstrap> {
    factory:       ClientFactory<B>,
    questions:     MemoCache<Vec<String>>,
    sql:           MemoCache<String>,
    validity:      MemoCache<bool>,
    results:       MemoCache<TabularResult>,
    chart_choices: MemoCache<bool>,
    plot_code:     MemoCache<String>,
    figures:       MemoCache<Figure>,
    followups:     MemoCache<Vec<String>>,
    summaries:     MemoCache<String>,
    training_data: MemoCache<TabularResult>
}

impl<B: Bootstrap> CopilotSession<B> {
    pub fn new(factory: ClientFactory<B>, max_entries: usize) -> Self {
        Self {
            factory,
            questions: MemoCache::new(max_entries),
            sql: MemoCache::new(max_entries),
            validity: MemoCache::new(max_entries),
            results: MemoCache::new(max_entries),
            chart_choices: MemoCache::new(max_entries),
            plot_code: MemoCache::new(max_entries),
            figures: MemoCache::new(max_entries),
            followups: MemoCache::new(max_entries),
            summaries: MemoCache::new(max_entries),
            training_data: MemoCache::new(max_entries)
        }
    }

    /// Candidate questions the service suggests for this model
    pub async fn generate_questions(&self) -> AppResult<Vec<String>> {
        self.questions
            .get_or_load(memo_key(&()), || async move {
                let handle = self.factory.handle().await?;
                handle.generate_questions().await
            })
            .await
    }

    /// SQL answering a natural-language question
    pub async fn generate_sql(&self, question: &str) -> AppResult<String> {
        self.sql
            .get_or_load(memo_key(&question), || async move {
                let handle = self.factory.handle().await?;
                handle.generate_sql(question).await
            })
            .await
    }

    /// Whether the service considers `sql` runnable
    pub async fn is_sql_valid(&self, sql: &str) -> AppResult<bool> {
        self.validity
            .get_or_load(memo_key(&sql), || async move {
                let handle = self.factory.handle().await?;
                handle.is_sql_valid(sql).await
            })
            .await
    }

    /// Execute `sql` against the connected warehouse
    pub async fn run_sql(&self, sql: &str) -> AppResult<TabularResult> {
        self.results
            .get_or_load(memo_key(&sql), || async move {
                let handle = self.factory.handle().await?;
                handle.run_sql(sql).await
            })
            .await
    }

    /// Whether a chart is warranted for this result.
    ///
    /// The key covers every declared argument even though the delegated
    /// operation only sees the result shape.
    pub async fn should_generate_chart(
        &self,
        question: &str,
        sql: &str,
        df: &TabularResult
    ) -> AppResult<bool> {
        self.chart_choices
            .get_or_load(memo_key(&(question, sql, df)), || async move {
                let handle = self.factory.handle().await?;
                handle.should_generate_chart(df).await
            })
            .await
    }

    /// Plotting code for a result
    pub async fn generate_plot_code(
        &self,
        question: &str,
        sql: &str,
        df: &TabularResult
    ) -> AppResult<String> {
        self.plot_code
            .get_or_load(memo_key(&(question, sql, df)), || async move {
                let handle = self.factory.handle().await?;
                handle.generate_plot_code(question, sql, df).await
            })
            .await
    }

    /// Execute plotting code and return the rendered figure
    pub async fn render_figure(&self, code: &str, df: &TabularResult) -> AppResult<Figure> {
        self.figures
            .get_or_load(memo_key(&(code, df)), || async move {
                let handle = self.factory.handle().await?;
                handle.get_figure(code, df).await
            })
            .await
    }

    /// Follow-up questions for an answered question
    pub async fn generate_followups(
        &self,
        question: &str,
        sql: &str,
        df: &TabularResult
    ) -> AppResult<Vec<String>> {
        self.followups
            .get_or_load(memo_key(&(question, sql, df)), || async move {
                let handle = self.factory.handle().await?;
                handle.generate_followups(question, sql, df).await
            })
            .await
    }

    /// Natural-language summary of a result
    pub async fn generate_summary(&self, question: &str, df: &TabularResult) -> AppResult<String> {
        self.summaries
            .get_or_load(memo_key(&(question, df)), || async move {
                let handle = self.factory.handle().await?;
                handle.generate_summary(question, df).await
            })
            .await
    }

    /// Training examples stored by the service
    pub async fn list_training_data(&self) -> AppResult<TabularResult> {
        self.training_data
            .get_or_load(memo_key(&()), || async move {
                let handle = self.factory.handle().await?;
                handle.get_training_data().await
            })
            .await
    }

    /// Drop the cached client handle; accessor caches are unaffected
    pub fn invalidate_handle(&self) {
        self.factory.invalidate();
    }
}
