use anyhow::{bail, Context, Result};
use clap::Parser;
use pokedex_app::{render, Applied, Args, Command, Controller, UreqTransport};
use pokedex_core::catalog;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is for the screen; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_app=info,pokedex_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(base_url = %args.base_url, "starting");
    let mut controller = Controller::new(args.client(), args.locale(), UreqTransport::new());

    match args.command.clone().unwrap_or(Command::Interactive) {
        Command::List => print!("{}", render::catalog(controller.screen())),
        Command::Show { name, id, json } => {
            let id = match (id, name) {
                (Some(id), _) => id,
                (None, Some(name)) => catalog::lookup(&name)?,
                (None, None) => bail!("give a pokemon name or --id"),
            };
            let pending = controller.start_id(id);
            match controller.finish(pending).await {
                Applied::Shown => {}
                Applied::Failed(e) => return Err(e).with_context(|| format!("lookup of #{id} failed")),
                Applied::Stale => bail!("lookup of #{id} was superseded"),
            }
            if let Some(details) = controller.screen().display() {
                if json {
                    println!("{}", serde_json::to_string_pretty(details)?);
                } else {
                    print!("{}", render::details(details));
                }
            }
        }
        Command::Interactive => interactive(&mut controller).await?,
    }
    Ok(())
}

/// Read selections from stdin: an index or a name selects and triggers,
/// an empty line re-triggers the current selection, `q` quits.
async fn interactive(controller: &mut Controller<UreqTransport>) -> Result<()> {
    print!("{}", render::catalog(controller.screen()));
    println!("Pick a number or name (q to quit):");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input == "q" {
            break;
        }
        if !input.is_empty() {
            let selected = match input.parse::<usize>() {
                Ok(n) if n >= 1 => controller.screen_mut().select(n - 1),
                _ => controller.screen_mut().select_name(input),
            };
            if let Err(e) = selected {
                eprintln!("{e}");
                continue;
            }
        }

        match controller.trigger().await {
            Applied::Shown => {
                if let Some(details) = controller.screen().display() {
                    print!("{}", render::details(details));
                }
            }
            Applied::Failed(e) => eprintln!("could not load {}: {e}", controller.screen().selected().name),
            Applied::Stale => {}
        }
    }
    Ok(())
}
