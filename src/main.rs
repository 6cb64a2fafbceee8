use chrono::{Local, NaiveDate};
use clap::Parser;
use daybook::application::{init, ConfigService, EntryRepository, SessionContext};
use daybook::cli::{self, Cli, Commands};
use daybook::domain::image::select_images;
use daybook::domain::{EntryPatch, Mood, NewEntry, User};
use daybook::error::{DaybookError, Result};
use daybook::infrastructure::{
    Config, EditorSession, LocalAuthService, LocalObjectStore, LocalRecordStore, Workspace,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DAYBOOK_LOG";

type Repository = EntryRepository<LocalRecordStore, LocalObjectStore>;

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let workspace = init::init(&path)?;
            println!(
                "Initialized daybook journal in {}",
                workspace.daybook_dir().display()
            );
            Ok(())
        }
        Commands::Moods => {
            print!("{}", cli::format_mood_catalog());
            Ok(())
        }
        Commands::Config { key, value, list } => run_config(key, value, list),
        command => {
            let workspace = Workspace::discover()?;
            let config = workspace.load_config()?;
            let mut session = SessionContext::new(LocalAuthService::open(&workspace, &config));
            session.refresh()?;
            run_session_command(command, &workspace, &config, &mut session)
        }
    }
}

fn run_config(key: Option<String>, value: Option<String>, list: bool) -> Result<()> {
    let service = ConfigService::new(Workspace::discover()?);

    if list {
        let config = service.list()?;
        println!("bucket = {}", config.bucket);
        println!(
            "public_url_base = {}",
            config.public_url_base.unwrap_or_default()
        );
        println!("max_images_per_entry = {}", config.max_images_per_entry);
        println!("session_ttl_minutes = {}", config.session_ttl_minutes);
        println!("editor = {}", config.editor);
        println!("created = {}", config.created.to_rfc3339());
        return Ok(());
    }

    match (key, value) {
        (Some(k), Some(v)) => {
            service.set(&k, &v)?;
            println!("Set {} = {}", k, v);
        }
        (Some(k), None) => println!("{}", service.get(&k)?),
        (None, _) => {
            println!("Usage: daybook config [--list | <key> [<value>]]");
            println!(
                "Valid keys: {}",
                daybook::application::manage_config::CONFIG_KEYS
            );
        }
    }
    Ok(())
}

fn run_session_command(
    command: Commands,
    workspace: &Workspace,
    config: &Config,
    session: &mut SessionContext<LocalAuthService>,
) -> Result<()> {
    match command {
        Commands::Signup { email, password } => {
            let password = read_password(password)?;
            let email = session.sign_up(&email, &password)?.user.email.clone();
            println!("Signed up and signed in as {}", email);
            Ok(())
        }
        Commands::Signin { email, password } => {
            let password = read_password(password)?;
            let email = session.sign_in(&email, &password)?.user.email.clone();
            println!("Signed in as {}", email);
            Ok(())
        }
        Commands::Signout => {
            session.sign_out()?;
            println!("Signed out");
            Ok(())
        }
        Commands::Whoami => {
            match session.session() {
                Some(current) => println!(
                    "{} (session expires {})",
                    current.user.email,
                    current.expires_at.with_timezone(&Local).format("%b %-d, %Y %-I:%M %p")
                ),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        command => {
            let user = session.require_user()?.clone();
            let mut repo = EntryRepository::new(
                LocalRecordStore::open(workspace),
                LocalObjectStore::open(workspace, config),
            );
            repo.load(user.id)?;
            run_entry_command(command, workspace, config, &user, &mut repo)
        }
    }
}

fn run_entry_command(
    command: Commands,
    workspace: &Workspace,
    config: &Config,
    user: &User,
    repo: &mut Repository,
) -> Result<()> {
    match command {
        Commands::New {
            title,
            content,
            mood,
            date,
            images,
        } => {
            let mood = parse_mood(&mood)?;
            let entry_date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            let images = select_images(&images, config.max_images_per_entry)?;
            let content = match content {
                Some(text) => text,
                None => EditorSession::new(config.get_editor())
                    .compose(&workspace.drafts_dir(), "")?,
            };

            let outcome = repo.create(
                user.id,
                NewEntry {
                    title,
                    content,
                    mood,
                    entry_date,
                },
                &images,
            )?;
            print!("{}", cli::format_save_outcome(&outcome));
            Ok(())
        }
        Commands::Edit {
            id,
            title,
            content,
            mood,
            images,
        } => {
            let existing = repo.resolve(&id)?;
            let entry_id = existing.id;
            let patch = EntryPatch {
                title: title.unwrap_or_else(|| existing.title.clone()),
                content: content.unwrap_or_else(|| existing.content.clone()),
                mood: match mood {
                    Some(m) => parse_mood(&m)?,
                    None => existing.mood_option().value,
                },
            };
            let images = select_images(&images, config.max_images_per_entry)?;

            let outcome = repo.update(entry_id, patch, &images)?;
            print!("{}", cli::format_save_outcome(&outcome));
            Ok(())
        }
        Commands::Delete { id, yes } => {
            let (entry_id, title) = {
                let entry = repo.resolve(&id)?;
                (entry.id, entry.title.clone())
            };

            if !yes && !confirm(&format!("Delete \"{}\"? This cannot be undone. [y/N] ", title))? {
                println!("Cancelled");
                return Ok(());
            }

            repo.delete(entry_id)?;
            println!("Deleted \"{}\"", title);
            Ok(())
        }
        Commands::List { search } => {
            let query = search.unwrap_or_default();
            let searching = !query.trim().is_empty();
            let entries = repo.search(&query);
            println!("{}", cli::format_entry_list(&entries, searching));
            Ok(())
        }
        Commands::Show { id } => {
            print!("{}", cli::format_entry_detail(repo.resolve(&id)?));
            Ok(())
        }
        other => unreachable!("{:?} is not an entry command", other),
    }
}

fn parse_mood(value: &str) -> Result<Mood> {
    Mood::from_str(value).map_err(DaybookError::InvalidMood)
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DaybookError::InvalidDate(value.to_string()))
}

fn read_password(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
