mod telemetry;

use dealbird_api::Application;
use dealbird_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("dealbird_server".into(), "info".into());
    init_subscriber(subscriber);

    if let Err(e) = run_migration().await {
        panic!("Unable to run database migrations: {:?}", e);
    }

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
