use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use t3_server::messaging::MOVE_ACTION;
use t3_server::{
    started_event, Action, Config, Event, GameplayService, MockProfileProvider, ServiceError,
    SessionContext, UserProfileProvider,
};

fn main() -> Result<()> {
    let config = Config::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level()?)
        .with_writer(std::io::stderr)
        .init();

    match run(&config) {
        Ok(()) => {
            info!("Session for {} completed", config.user_id);
            Ok(())
        }
        Err(e) => {
            error!("Session for {} failed: {}", config.user_id, e);
            Err(e)
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let service_id = config
        .service_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut service = GameplayService::new(service_id);
    info!("Starting {} ({})", service.details().name, service.details().service_id);

    // Lobby: load the profile into the session
    let mut session = SessionContext::new(config.user_id.clone());
    session.store_profile(MockProfileProvider.load_user_details(session.user_id()));
    if config.show_profile {
        println!("{}", serde_json::to_string(&session.profile())?);
    }

    // Matchmaking
    let announcement = service.start_match(session.user_id());
    emit(&started_event(&announcement))?;
    session.store_announcement(announcement);

    // Game screen
    let game_id = session
        .announcement()
        .map(|a| a.match_id.to_string())
        .ok_or_else(|| anyhow!("No match stored for session"))?;

    for &position in &config.moves {
        let action = Action::new(
            session.user_id(),
            MOVE_ACTION,
            json!({ "gameID": game_id, "position": position }),
        );
        match service.handle_action(&action) {
            Ok(Some(event)) => emit(&event)?,
            Ok(None) => info!("Move at {} ignored", position),
            Err(ServiceError::UnknownMatch(_)) => {
                info!("Match {} is over, skipping remaining moves", game_id);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    session.clear_match();
    Ok(())
}

fn emit(event: &Event) -> Result<()> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
