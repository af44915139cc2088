use anyhow::Context;
use quill_client::App;
use quill_client::config::ClientConfig;

// store futures hold `RefCell` state, so everything stays on one thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    quill_client::init_logging();

    let config = ClientConfig::from_env()?;
    log::info!("Loading posts from {}", config.posts_url());

    let app = App::new(config);
    app.load().await.context("Failed to load posts")?;

    for line in app.summary_lines() {
        println!("{line}");
    }
    Ok(())
}
