use tracing::{info, instrument};

use siteledger_core::{DateRange, ProjectId};
use siteledger_reporting::{
    CompanySummary, LedgerSnapshot, PortfolioReport, ProjectSummary, company_summary,
    portfolio_report, project_summary,
};

use crate::error::ServiceResult;
use crate::store::LedgerStore;

/// Read-only rollups. Every call re-reads the ledger; nothing is cached.
#[derive(Debug, Clone)]
pub struct RollupService {
    store: LedgerStore,
}

impl RollupService {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    fn snapshot(&self) -> ServiceResult<LedgerSnapshot> {
        Ok(self.store.snapshot()?)
    }

    #[instrument(skip(self))]
    pub fn project_summary(
        &self,
        project_id: ProjectId,
        range: &DateRange,
    ) -> ServiceResult<ProjectSummary> {
        let summary = project_summary(&self.snapshot()?, project_id, range)?;
        info!(result = %summary.result, "project summary computed");
        Ok(summary)
    }

    #[instrument(skip(self))]
    pub fn company_summary(&self, range: &DateRange) -> ServiceResult<CompanySummary> {
        let summary = company_summary(&self.snapshot()?, range);
        info!(balance = %summary.balance, "company summary computed");
        Ok(summary)
    }

    #[instrument(skip(self))]
    pub fn portfolio_report(
        &self,
        range: &DateRange,
        project_filter: Option<ProjectId>,
    ) -> ServiceResult<PortfolioReport> {
        let report = portfolio_report(&self.snapshot()?, range, project_filter)?;
        info!(projects = report.projects.len(), "portfolio report computed");
        Ok(report)
    }
}
