use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use commcal_core::countdown::CountdownTicker;
use commcal_core::session::Session;
use commcal_core::timezone::ZoneAwareResolver;

use crate::render::Render;

/// How often the countdown is recomputed in watch mode
const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

pub async fn run(session: &Session, watch: bool) -> Result<()> {
    if !watch {
        println!("{}", session.countdown(Utc::now()).render());
        return Ok(());
    }

    let mut ticker = CountdownTicker::new();
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Only print when the text changed since the last refresh
                if let Some(countdown) = ticker.update(Utc::now(), session.events(), &ZoneAwareResolver) {
                    println!("{}", countdown.render());
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
