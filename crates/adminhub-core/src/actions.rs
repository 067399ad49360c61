//! Backend actions
//!
//! Every write the dashboard makes goes through a [`Backend`]. The shipped
//! [`SimulatedBackend`] waits a fixed latency and reports success; a real
//! service client implements the same trait.
//!
//! [`ActionRunner`] runs actions on the tokio runtime and reports each
//! completion as a message, so the UI task stays the only owner of its state.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::export::{ExportFormat, ExportOutcome, ExportTarget, Exporter};
use crate::models::ReportRequest;
use crate::settings::Profile;

/// Identity of an action, used to track what is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    GenerateReport,
    Export(ExportTarget),
    AddPaymentMethod,
    UpgradePlan,
    DownloadInvoiceHistory,
    InviteMembers,
    UpdateRoles,
    SaveTeamSettings,
    SaveProfile,
}

/// A request to the backend
#[derive(Debug, Clone)]
pub enum Action {
    GenerateReport(ReportRequest),
    Export {
        target: ExportTarget,
        format: ExportFormat,
        rows: Vec<Value>,
    },
    AddPaymentMethod,
    UpgradePlan,
    DownloadInvoiceHistory,
    InviteMembers,
    UpdateRoles,
    SaveTeamSettings,
    SaveProfile(Profile),
}

impl Action {
    /// Export `rows` of `target` in `format`
    pub fn export<T: Serialize>(
        rows: &[T],
        target: ExportTarget,
        format: ExportFormat,
    ) -> Result<Self> {
        let rows = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self::Export {
            target,
            format,
            rows,
        })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::GenerateReport(_) => ActionKind::GenerateReport,
            Self::Export { target, .. } => ActionKind::Export(*target),
            Self::AddPaymentMethod => ActionKind::AddPaymentMethod,
            Self::UpgradePlan => ActionKind::UpgradePlan,
            Self::DownloadInvoiceHistory => ActionKind::DownloadInvoiceHistory,
            Self::InviteMembers => ActionKind::InviteMembers,
            Self::UpdateRoles => ActionKind::UpdateRoles,
            Self::SaveTeamSettings => ActionKind::SaveTeamSettings,
            Self::SaveProfile(_) => ActionKind::SaveProfile,
        }
    }

    /// Message shown once the action succeeds
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::GenerateReport(_) => "Report generated successfully!",
            Self::Export {
                format: ExportFormat::Csv,
                ..
            } => "CSV exported successfully!",
            Self::Export {
                format: ExportFormat::Pdf,
                ..
            } => "PDF export feature coming soon!",
            Self::AddPaymentMethod => "Payment method added successfully",
            Self::UpgradePlan => "Plan upgraded successfully",
            Self::DownloadInvoiceHistory => "Invoice history downloaded",
            Self::InviteMembers => "Team invitation sent successfully",
            Self::UpdateRoles => "Roles updated successfully",
            Self::SaveTeamSettings => "Team settings saved successfully",
            Self::SaveProfile(_) => "Profile updated successfully!",
        }
    }
}

/// Result of a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    /// Set for export actions
    pub export: Option<ExportOutcome>,
}

/// Something that carries out actions
#[async_trait]
pub trait Backend: Send + Sync {
    async fn perform(&self, action: Action) -> Result<Outcome>;
}

/// Backend that only waits, then succeeds.
///
/// Exports are still written for real so the produced file can be opened.
pub struct SimulatedBackend {
    latency: Duration,
    exporter: Exporter,
}

impl SimulatedBackend {
    pub fn new(latency: Duration, exporter: Exporter) -> Self {
        Self { latency, exporter }
    }
}

#[async_trait]
impl Backend for SimulatedBackend {
    async fn perform(&self, action: Action) -> Result<Outcome> {
        tokio::time::sleep(self.latency).await;

        let message = action.success_message().to_string();
        let export = match action {
            Action::Export {
                target,
                format,
                rows,
            } => Some(self.exporter.export(&rows, target.file_stem(), format)?),
            Action::GenerateReport(request) => {
                debug!(
                    report_type = ?request.report_type,
                    period = ?request.period,
                    "Report requested"
                );
                None
            }
            Action::SaveProfile(profile) => {
                debug!(name = %profile.name, email = %profile.email, "Profile saved");
                None
            }
            _ => None,
        };

        Ok(Outcome { message, export })
    }
}

/// Finished action, delivered back to the UI
#[derive(Debug)]
pub struct Completion {
    pub kind: ActionKind,
    pub result: Result<Outcome>,
}

/// Spawns actions and tracks which kinds are in flight
pub struct ActionRunner<M = Completion> {
    backend: Arc<dyn Backend>,
    tx: mpsc::UnboundedSender<M>,
    pending: HashSet<ActionKind>,
}

impl<M> ActionRunner<M>
where
    M: From<Completion> + Send + 'static,
{
    pub fn new(backend: Arc<dyn Backend>, tx: mpsc::UnboundedSender<M>) -> Self {
        Self {
            backend,
            tx,
            pending: HashSet::new(),
        }
    }

    /// Start `action` in the background.
    ///
    /// Returns false, without starting anything, while another action of the
    /// same kind is still running.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let kind = action.kind();
        if !self.pending.insert(kind) {
            debug!(action = ?kind, "Action already running");
            return false;
        }

        info!(action = ?kind, "Action started");
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = backend.perform(action).await;
            match &result {
                Ok(_) => info!(action = ?kind, "Action completed"),
                Err(e) => warn!(action = ?kind, error = %e, "Action failed"),
            }
            if tx.send(M::from(Completion { kind, result })).is_err() {
                debug!(action = ?kind, "Completion dropped, receiver closed");
            }
        });

        true
    }

    /// Mark a delivered completion as no longer pending
    pub fn finish(&mut self, completion: &Completion) {
        self.pending.remove(&completion.kind);
    }

    pub fn is_pending(&self, kind: ActionKind) -> bool {
        self.pending.contains(&kind)
    }

    pub fn any_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{seed_clients, seed_reports};
    use tokio::time::Instant;

    fn backend(dir: &std::path::Path) -> Arc<dyn Backend> {
        Arc::new(SimulatedBackend::new(Duration::from_secs(1), Exporter::new(dir)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_backend_waits_then_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());
        let started = Instant::now();

        let outcome = backend.perform(Action::UpgradePlan).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(outcome.message, "Plan upgraded successfully");
        assert!(outcome.export.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_reports_completion_and_blocks_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        let mut runner = ActionRunner::new(backend(dir.path()), tx);

        assert!(runner.dispatch(Action::InviteMembers));
        assert!(runner.is_pending(ActionKind::InviteMembers));
        assert!(!runner.dispatch(Action::InviteMembers));
        assert!(runner.dispatch(Action::UpdateRoles));

        let mut messages = Vec::new();
        for _ in 0..2 {
            let completion = rx.recv().await.unwrap();
            runner.finish(&completion);
            messages.push(completion.result.unwrap().message);
        }
        messages.sort();

        assert_eq!(
            messages,
            ["Roles updated successfully", "Team invitation sent successfully"]
        );
        assert!(!runner.any_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exports_of_different_tables_run_together() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        let mut runner = ActionRunner::new(backend(dir.path()), tx);

        let clients = Action::export(&seed_clients(), ExportTarget::Clients, ExportFormat::Csv);
        let reports = Action::export(&seed_reports(), ExportTarget::Reports, ExportFormat::Csv);
        assert!(runner.dispatch(clients.unwrap()));
        assert!(runner.dispatch(reports.unwrap()));

        let again = Action::export(&seed_clients(), ExportTarget::Clients, ExportFormat::Pdf);
        assert!(!runner.dispatch(again.unwrap()));

        for _ in 0..2 {
            let completion = rx.recv().await.unwrap();
            runner.finish(&completion);
            completion.result.unwrap();
        }

        assert!(dir.path().join("clients.csv").exists());
        assert!(dir.path().join("reports.csv").exists());
        assert!(!runner.any_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_action_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let action =
            Action::export(&seed_clients(), ExportTarget::Clients, ExportFormat::Csv).unwrap();

        let outcome = backend(dir.path()).perform(action).await.unwrap();

        assert_eq!(outcome.message, "CSV exported successfully!");
        assert_eq!(
            outcome.export,
            Some(ExportOutcome::Written {
                path: dir.path().join("clients.csv"),
                rows: 4,
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pdf_export_is_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let action =
            Action::export(&seed_clients(), ExportTarget::Clients, ExportFormat::Pdf).unwrap();

        let outcome = backend(dir.path()).perform(action).await.unwrap();

        assert_eq!(outcome.message, "PDF export feature coming soon!");
        assert_eq!(outcome.export, Some(ExportOutcome::ComingSoon(ExportFormat::Pdf)));
    }
}
