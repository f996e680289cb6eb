use anyhow::Result;
use commcal_core::session::Session;

use crate::render::Render;

pub fn run(session: &mut Session, month: Option<(i32, u32)>) -> Result<()> {
    if let Some((year, month)) = month {
        session.go_to(year, month)?;
    }

    println!("{}", session.agenda().render());

    Ok(())
}
