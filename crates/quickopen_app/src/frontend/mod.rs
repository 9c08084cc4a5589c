//! Line-oriented terminal front-end standing in for a host UI.
mod command;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use quickopen_engine::{
    ClientSettings, Collaborators, CommandRegistry, ReqwestQueryClient, SearchCoordinator,
};
use quickopen_logging::qo_info;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::CliArgs;
use crate::persistence::{self, StoredSettings};
use command::Command;
use terminal::{TerminalOpener, TerminalSidebar, TerminalView};

const HELP: &str = "\
Type to search; each line replaces the search box content.
  :open <category/file>  open an entry
  :cd <path>             change the browse directory
  :activate              re-run the search for the current input
  :reload                reload settings from disk
  :quit                  exit
  ::text                 search for text starting with ':'";

pub(crate) async fn run(
    args: CliArgs,
    stored: StoredSettings,
    settings_path: PathBuf,
) -> anyhow::Result<()> {
    let client = ReqwestQueryClient::new(ClientSettings {
        base_url: args.server_url.clone(),
        token: args.token.clone(),
        ..ClientSettings::default()
    })
    .context("building HTTP client")?;

    let registry = CommandRegistry::new();
    let (coordinator, task) = SearchCoordinator::spawn(
        stored.settings,
        stored.timing,
        Collaborators {
            client: Arc::new(client),
            view: Box::new(TerminalView::default()),
            registry: Box::new(registry.clone()),
            opener: Box::new(TerminalOpener),
            sidebar: Box::new(TerminalSidebar),
        },
    );
    qo_info!("Quick open started against {}", args.server_url);

    println!("{HELP}");
    coordinator.set_browse_path(args.browse_path.clone());
    let mut input = String::new();
    coordinator.activate(input.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match Command::parse(&line) {
            Command::Input(text) => {
                input = text.to_string();
                coordinator.input_changed(text);
            }
            Command::Open(id) => {
                if !registry.execute(id) {
                    println!("no entry {id:?}");
                }
            }
            Command::ChangeDir(path) => coordinator.set_browse_path(path),
            Command::Activate => coordinator.activate(input.clone()),
            Command::Reload => {
                let reloaded = persistence::load_settings(&settings_path);
                coordinator.update_settings(reloaded.settings);
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    drop(coordinator);
    task.await.context("search coordinator task failed")?;
    Ok(())
}
