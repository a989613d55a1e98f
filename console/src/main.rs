//! Terminal front-end for the customers and contacts API.
//!
//! Reads one command per line, dispatches it to the core `App`, and prints
//! the view-model after every action. Search input is debounced: the fetch
//! fires once no `buscar` has arrived for the configured delay.

mod commands;
mod render;
mod transport;
mod ui;

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use cadastro_core::{Api, App, CadastroClient, Section};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{Command, Field, HELP};
use transport::UreqTransport;
use ui::{ConsoleUi, Prompt};

#[derive(Parser, Debug)]
#[command(name = "cadastro", version, about = "Gestão de clientes e contatos")]
struct Args {
    /// Base URL of the API (the part before `/clientes`)
    #[arg(long, env = "CADASTRO_API_URL", default_value = "http://localhost:8080/api")]
    base_url: String,

    /// Quiet period before a search is sent, in milliseconds
    #[arg(long, default_value_t = 300)]
    debounce_ms: u64,
}

enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(base_url = %args.base_url, "starting");

    let api = Api::new(CadastroClient::new(&args.base_url), Arc::new(UreqTransport::new()));
    let prompt = Prompt::stdin();
    let mut app = App::with_search_delay(
        api,
        ConsoleUi::new(prompt.clone()),
        Duration::from_millis(args.debounce_ms),
    );

    app.load().await;
    show(&app)?;

    loop {
        let deadline = app.search_deadline();
        tokio::select! {
            line = prompt.next_line() => {
                let Some(line) = line else { break };
                match Command::parse(&line) {
                    Ok(Some(command)) => {
                        if let Flow::Quit = dispatch(&mut app, command).await {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => eprintln!("{err}"),
                }
                show(&app)?;
            }
            _ = sleep_until(deadline) => {
                if app.poll_search(Instant::now()).await {
                    show(&app)?;
                }
            }
        }
    }
    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at.into()).await,
        None => std::future::pending().await,
    }
}

fn show(app: &App<ConsoleUi>) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", render::render(app.view()))?;
    write!(out, "> ")?;
    out.flush()
}

async fn dispatch(app: &mut App<ConsoleUi>, command: Command) -> Flow {
    let section = app.view().section;
    match command {
        Command::Set(field, value) => set_field(app, field, &value),
        Command::Save => match section {
            Section::Customers => app.submit_customer().await,
            Section::Contacts => app.submit_contact().await,
        },
        Command::Edit(id) => match section {
            Section::Customers => app.edit_customer(id).await,
            Section::Contacts => app.edit_contact(id),
        },
        Command::Delete(id) => match section {
            Section::Customers => app.delete_customer(id).await,
            Section::Contacts => app.delete_contact(id).await,
        },
        Command::Cancel => match section {
            Section::Customers => app.cancel_customer_edit(),
            Section::Contacts => app.cancel_contact_edit(),
        },
        Command::Search(term) => app.input_search(&term, Instant::now()),
        Command::OpenContacts(id) => app.open_contacts(id).await,
        Command::Back => app.close_contacts().await,
        Command::List => app.reload().await,
        Command::Help => println!("{HELP}"),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn set_field(app: &mut App<ConsoleUi>, field: Field, value: &str) {
    match field {
        Field::Name => app.customer_form_mut().name = value.to_string(),
        Field::Cpf => app.customer_form_mut().input_cpf(value),
        Field::BirthDate => app.customer_form_mut().birth_date = value.to_string(),
        Field::Address => app.customer_form_mut().address = value.to_string(),
        Field::Kind => app.contact_form_mut().kind = value.to_string(),
        Field::Value => app.contact_form_mut().value = value.to_string(),
        Field::Observation => app.contact_form_mut().observation = value.to_string(),
    }
}
