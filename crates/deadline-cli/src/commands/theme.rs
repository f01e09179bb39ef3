use clap::Subcommand;
use deadline_core::storage::Database;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the stored theme preference
    Show,
    /// Set the theme preference
    Set {
        /// "dark" or "light"
        theme: String,
    },
    /// Flip between dark and light
    Toggle,
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ThemeAction::Show => {
            println!("{}", db.theme_get()?);
        }
        ThemeAction::Set { theme } => {
            if theme != "dark" && theme != "light" {
                eprintln!("unknown theme: {theme} (expected \"dark\" or \"light\")");
                std::process::exit(1);
            }
            db.theme_set(&theme)?;
            println!("{theme}");
        }
        ThemeAction::Toggle => {
            let next = if db.theme_get()? == "dark" {
                "light"
            } else {
                "dark"
            };
            db.theme_set(next)?;
            println!("{next}");
        }
    }
    Ok(())
}
