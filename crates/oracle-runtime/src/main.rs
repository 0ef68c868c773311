//! Oracle rehearsal entry point.
//!
//! Plays one scene headlessly, from entry through divination, and prints
//! the destination it chose.

use std::error::Error;
use std::sync::Arc;

use oracle_core::audio::AudioChannel;
use oracle_core::clock::{SystemClock, Timer};
use oracle_core::rng::{DeterministicRng, SeededRng};
use oracle_divination::domain::outcome::DivinationOutcome;
use oracle_runtime::audio::LoggingAudioChannel;
use oracle_runtime::manifest::SceneManifest;
use oracle_runtime::session::{OracleSession, SessionPorts};
use oracle_runtime::settings::RuntimeSettings;
use oracle_runtime::stage::headless_stage;
use oracle_runtime::storage::JsonFileStore;
use oracle_runtime::telemetry;
use oracle_runtime::timer::TokioTimer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = RuntimeSettings::from_env()?;
    telemetry::init(settings.log_format);

    tracing::info!(manifest = %settings.manifest.display(), "Starting oracle rehearsal");

    let manifest = SceneManifest::load(&settings.manifest)?;
    let store = Arc::new(JsonFileStore::open(&settings.storage)?);
    let timer: Arc<dyn Timer> = Arc::new(TokioTimer::new(settings.pace));
    let rng: Box<dyn DeterministicRng> = match settings.seed {
        Some(seed) => Box::new(SeededRng::from_seed(seed)),
        None => Box::new(SeededRng::from_entropy()),
    };
    let (stage, navigator) = headless_stage(timer.clone());
    let audio = manifest
        .audio
        .devices(|name| -> Arc<dyn AudioChannel> { Arc::new(LoggingAudioChannel::new(name)) });

    let session = OracleSession::new(
        manifest,
        SessionPorts {
            store,
            clock: Arc::new(SystemClock),
            timer,
            rng,
            stage,
            audio,
        },
    );

    let outcome = session.rehearse().await;
    session.teardown();

    match outcome {
        DivinationOutcome::Navigated(entry) => {
            let url = navigator.destination().unwrap_or(entry.url);
            println!("{url}");
            Ok(())
        }
        DivinationOutcome::NoDestination => {
            Err("no eligible destination: the scene pool needs more scenes".into())
        }
        DivinationOutcome::Inert => Err("divination hotspot never became active".into()),
    }
}
