use clap::Parser;
use std::sync::Arc;
use talk2trade::{
    cli::{self, AppContext, Cli},
    config::{self, database},
    connectivity::{ConnectivityProbe, StaticConnectivity},
    core::SettingsStore,
    errors::Result,
    language::{MockTranscriber, MockTranslator},
    notifications::{MutedNotificationSink, NotificationSink, TracingNotificationSink},
    storage::{KeyValueStore, SeaOrmKeyValueStore},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible); stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal: env vars can be set externally
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    // 3. Load configuration, defaults when config.toml is absent
    let app_config = config::load_app_config(&args.config)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open the key-value store
    let database_url = database::get_database_url(&app_config);
    database::ensure_parent_dir(&database_url)?;
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database ready at {}", database_url))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;
    let store: Arc<dyn KeyValueStore> = Arc::new(SeaOrmKeyValueStore::new(db));

    // 5. Notifications follow the persisted preference
    let notifications_enabled = SettingsStore::new(Arc::clone(&store))
        .get()
        .await
        .notifications;
    let notifier: Arc<dyn NotificationSink> = if notifications_enabled {
        Arc::new(TracingNotificationSink)
    } else {
        Arc::new(MutedNotificationSink)
    };

    let connectivity: Arc<dyn ConnectivityProbe> = Arc::new(StaticConnectivity::new(!args.offline));
    let ctx = AppContext::new(
        store,
        connectivity,
        notifier,
        Arc::new(MockTranslator::new(app_config.language.translate_delay())),
        Arc::new(MockTranscriber::new(app_config.language.transcribe_delay())),
    );

    // 6. Run the command
    let output = cli::run(&ctx, args.command)
        .await
        .inspect_err(|e| error!("{}", e))?;
    println!("{output}");

    Ok(())
}
