use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryJobs, InMemoryNotifications, InMemoryPreferences, InMemoryStudents,
    LogMailer, Stores,
};
use crate::routes::with_workflow_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cgeip::config::{AppConfig, SchedulerConfig};
use cgeip::error::AppError;
use cgeip::seed::SeedData;
use cgeip::telemetry;
use cgeip::workflows::clock::{Clock, SystemClock};
use cgeip::workflows::eligibility::EligibilityService;
use cgeip::workflows::matching::JobMatchService;
use cgeip::workflows::scheduler::{JobMatcher, PeriodicTask, PreferenceReminder, ReminderPolicy};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

type JobMatchTask = PeriodicTask<JobMatcher<InMemoryJobs, InMemoryPreferences, InMemoryNotifications>>;
type ReminderTask = PeriodicTask<
    PreferenceReminder<InMemoryStudents, InMemoryPreferences, InMemoryNotifications, LogMailer>,
>;

struct Schedulers {
    job_matcher: JobMatchTask,
    reminders: ReminderTask,
}

impl Schedulers {
    fn start(stores: &Stores, clock: Arc<dyn Clock>, config: &SchedulerConfig) -> Self {
        let matcher = JobMatcher::new(
            stores.jobs.clone(),
            stores.preferences.clone(),
            stores.notifications.clone(),
            clock.clone(),
        );
        let reminder = PreferenceReminder::new(
            stores.students.clone(),
            stores.preferences.clone(),
            stores.notifications.clone(),
            Arc::new(LogMailer),
            clock,
            ReminderPolicy {
                cooldown: chrono::Duration::hours(config.reminder_cooldown_hours as i64),
                min_account_age: chrono::Duration::hours(
                    config.reminder_min_account_age_hours as i64,
                ),
            },
        );

        let mut job_matcher = PeriodicTask::new(Arc::new(matcher), config.job_match_interval);
        let mut reminders = PeriodicTask::new(Arc::new(reminder), config.reminder_interval);
        job_matcher.start();
        reminders.start();
        Self {
            job_matcher,
            reminders,
        }
    }

    fn stop(&mut self) {
        self.job_matcher.stop();
        self.reminders.stop();
    }
}

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if args.no_schedulers {
        config.scheduler.enabled = false;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let stores = match &config.seed_path {
        Some(path) => Stores::seeded(SeedData::load(path)?)?,
        None => Stores::default(),
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let eligibility = Arc::new(EligibilityService::new(
        stores.transcripts.clone(),
        stores.courses.clone(),
    ));
    let matching = Arc::new(JobMatchService::new(
        stores.jobs.clone(),
        stores.preferences.clone(),
        clock.clone(),
    ));

    let app = with_workflow_routes(eligibility, matching, &stores)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let mut schedulers = config
        .scheduler
        .enabled
        .then(|| Schedulers::start(&stores, clock.clone(), &config.scheduler));
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        schedulers = schedulers.is_some(),
        "qualification engine ready"
    );

    let served = axum::serve(listener, app).await;
    if let Some(schedulers) = schedulers.as_mut() {
        schedulers.stop();
    }
    served?;
    Ok(())
}
