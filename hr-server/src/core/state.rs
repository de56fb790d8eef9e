use crate::audit::AuditRecorder;
use crate::core::Config;
use crate::db::HrStorage;
use crate::personnel::PersonnelService;
use crate::reports::ReportService;
use crate::salary::SalaryService;

/// Shared server state, one instance per process.
///
/// Holds the storage handle and the services built on top of it. Cloning is
/// cheap; every field is either small or an `Arc` internally.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | storage | embedded database handle |
/// | audit | append-only audit recorder |
/// | salary | salary change service |
/// | personnel | employee / department / project / review workflows |
/// | reports | read-only aggregates |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub storage: HrStorage,
    pub audit: AuditRecorder,
    pub salary: SalaryService,
    pub personnel: PersonnelService,
    pub reports: ReportService,
}

impl ServerState {
    /// Open the database under `config.work_dir` and wire up the services.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let storage = HrStorage::open(config.db_path())?;
        Ok(Self::with_storage(config.clone(), storage))
    }

    /// Build state around an already-open storage handle (tests use this
    /// with an in-memory backend).
    pub fn with_storage(config: Config, storage: HrStorage) -> Self {
        let policy = config.salary_policy();
        let audit = AuditRecorder::new(storage.clone());
        let salary = SalaryService::new(storage.clone(), audit.clone(), policy);
        let personnel = PersonnelService::new(storage.clone(), audit.clone(), salary.clone());
        let reports = ReportService::new(storage.clone(), policy);
        Self {
            config,
            storage,
            audit,
            salary,
            personnel,
            reports,
        }
    }
}
