use crate::application::dto::{ExploreRequest, ExploreResponse};
use crate::application::read_models::{SnapshotMetadata, TreeSnapshotBuilder};
use crate::explorer::domain::WorkloadDefinition;
use crate::explorer::services::{ExplorerSession, TickOutcome};
use crate::ports::inbound::ExploreTreePort;
use crate::ports::outbound::{PackageDatabase, ProgressReporter, WorkloadReader};
use crate::shared::Result;
use std::cell::Cell;
use std::path::Path;
use std::sync::Arc;

/// ExploreTreeUseCase - builds, annotates and snapshots one explorer session
///
/// # Type Parameters
/// * `D` - PackageDatabase implementation
/// * `R` - WorkloadReader implementation
/// * `P` - ProgressReporter implementation
pub struct ExploreTreeUseCase<D, R, P> {
    database: D,
    workload_reader: R,
    progress_reporter: P,
}

impl<D, R, P> ExploreTreeUseCase<D, R, P>
where
    D: PackageDatabase,
    R: WorkloadReader,
    P: ProgressReporter,
{
    pub fn new(database: D, workload_reader: R, progress_reporter: P) -> Self {
        Self {
            database,
            workload_reader,
            progress_reporter,
        }
    }

    /// Loads the workload files, reporting progress per file and a warning
    /// per degraded file
    fn load_workloads(
        &self,
        session: &mut ExplorerSession<&D>,
        request: &ExploreRequest,
    ) -> Vec<Arc<WorkloadDefinition>> {
        if request.workloads.is_empty() {
            return Vec::new();
        }
        self.progress_reporter.report(&format!(
            "📂 Loading {} workload file(s)...",
            request.workloads.len()
        ));

        let reader = ReportingReader {
            inner: &self.workload_reader,
            reporter: &self.progress_reporter,
            total: request.workloads.len(),
            done: Cell::new(0),
        };
        let definitions = session.load_workloads(&reader, &request.workloads);

        for definition in definitions.iter().filter(|d| d.is_degraded()) {
            self.progress_reporter.report_error(&format!(
                "⚠️  Skipping workload {}: {}",
                definition.path.display(),
                definition.degraded.as_deref().unwrap_or_default()
            ));
        }
        definitions
    }

    fn populate_workset(session: &mut ExplorerSession<&D>, request: &ExploreRequest) {
        for subject in &request.subjects {
            session.add_subject(subject);
        }
        for name in &request.queries {
            session.add_query(name);
        }
        for reldep in &request.what_requires {
            session.add_what_requires(reldep);
        }
    }

    fn apply_selection(session: &mut ExplorerSession<&D>, request: &ExploreRequest) {
        for entry in &request.overrides {
            session.set_override(entry.key.clone(), entry.color);
        }
        session.set_active_label(request.active_label.clone());
        session.set_active_workload(request.active_workload.clone());
    }

    /// Drives the live annotation pass to completion; returns the ticks taken
    fn annotate(&self, session: &mut ExplorerSession<&D>) -> usize {
        let mut ticks = 0;
        while session.scheduler().is_live() {
            let outcome = session.tick();
            ticks += 1;
            if outcome == TickOutcome::Pending {
                self.progress_reporter
                    .report_activity(ticks, "🎨 Annotating tree");
            }
        }
        self.progress_reporter
            .report(&format!("🎨 Annotation finished after {} batch(es)", ticks));
        ticks
    }
}

impl<D, R, P> ExploreTreePort for ExploreTreeUseCase<D, R, P>
where
    D: PackageDatabase,
    R: WorkloadReader,
    P: ProgressReporter,
{
    fn explore(&self, request: ExploreRequest) -> Result<ExploreResponse> {
        request.validate()?;

        let mut session = ExplorerSession::new(&self.database, request.settings.clone());

        let definitions = self.load_workloads(&mut session, &request);
        Self::populate_workset(&mut session, &request);
        Self::apply_selection(&mut session, &request);
        let annotation_ticks = self.annotate(&mut session);

        let model = session.model();
        let roots = match request.root {
            Some(kind) => vec![model.root_index(kind)],
            None => model.root_indexes(),
        };
        let metadata = SnapshotMetadata::new(
            request.active_label.clone(),
            request.active_workload.clone(),
            session.tree().collapse_requirements(),
            request.depth,
        );
        let snapshot = TreeSnapshotBuilder::build(&model, &roots, request.depth, metadata);

        let degraded_workloads = definitions
            .iter()
            .filter_map(|d| d.degraded.clone().map(|reason| (d.path.clone(), reason)))
            .collect();

        Ok(ExploreResponse {
            snapshot,
            degraded_workloads,
            annotation_ticks,
        })
    }
}

/// Workload reader reporting per-file progress while delegating
struct ReportingReader<'a, R, P> {
    inner: &'a R,
    reporter: &'a P,
    total: usize,
    done: Cell<usize>,
}

impl<R: WorkloadReader, P: ProgressReporter> WorkloadReader for ReportingReader<'_, R, P> {
    fn read_workload(&self, path: &Path) -> Arc<WorkloadDefinition> {
        let definition = self.inner.read_workload(path);
        self.done.set(self.done.get() + 1);
        self.reporter.report_progress(
            self.done.get(),
            self.total,
            Some(&definition.display_name()),
        );
        definition
    }
}
