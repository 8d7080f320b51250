use replay_broadcaster::{settings::Settings, startup::App};
use seawatch_core::Environment;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let settings = Settings::new().unwrap();

    let level = match settings.environment {
        Environment::Local | Environment::Test => tracing::Level::DEBUG,
        Environment::Development | Environment::Production => tracing::Level::INFO,
    };

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(level).finish(),
    )
    .unwrap();

    let app = App::build(&settings);

    if let Err(e) = app.run().await {
        tracing::error!("replay broadcaster failed: {e:?}");
        std::process::exit(1);
    }
}
