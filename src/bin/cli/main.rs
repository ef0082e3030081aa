use std::{env, sync::Arc};

use anyhow::Result;
use dotenvy::dotenv;
use reedline::Signal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use booksearch::{
    config::Config,
    connectivity::{FixedProbe, InterfaceProbe},
    fetch::HttpFetcher,
    traits::ConnectivityProbe,
    LoaderState, SearchLoader,
};

mod command_parser;
mod prompt;
mod repl;
mod view;

use view::TerminalView;

type Loader = SearchLoader<TerminalView>;

enum Flow {
    Continue,
    Exit,
}

async fn handle_line(line: &str, loader: &mut Loader) -> Result<Flow> {
    let Some(command) = shlex::split(line) else {
        anyhow::bail!("Invalid command");
    };
    if command.is_empty() {
        return Ok(Flow::Continue);
    }
    handle_command(command, loader).await
}

async fn handle_command(command: Vec<String>, loader: &mut Loader) -> Result<Flow> {
    let args = command_parser::arg_parser_repl();
    let matches = args.try_get_matches_from(command)?;
    match matches.subcommand() {
        Some(("search", matches)) => {
            let query = matches
                .get_many::<String>("terms")
                .map(|terms| terms.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            search(&query, loader).await;
        }
        Some(("open", matches)) => {
            if let Some(index) = matches.get_one::<usize>("index") {
                loader.sink().print_link(*index);
            }
        }
        Some(("exit", _)) => return Ok(Flow::Exit),
        Some((name, _)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(Flow::Continue)
}

/// Runs one search to completion; Ctrl-C while it is loading cancels it.
async fn search(query: &str, loader: &mut Loader) {
    let request = loader.start_search(query);
    debug!("Issued {:?}", request);
    let interrupted = tokio::select! {
        _ = loader.settle() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        loader.cancel();
        if let LoaderState::Cancelled { generation } = loader.state() {
            info!("Cancelled search generation {generation}");
            loader.sink().print_cancelled(&request.query);
        }
    }
}

fn build_loader(config: Arc<Config>) -> Result<Loader> {
    let probe: Arc<dyn ConnectivityProbe> = if config.force_offline {
        Arc::new(FixedProbe::new(false))
    } else {
        Arc::new(InterfaceProbe)
    };
    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeouts())?);
    Ok(SearchLoader::new(
        config.query_builder()?,
        probe,
        fetcher,
        TerminalView::new(config),
    ))
}

async fn run_repl(config: &Config, loader: &mut Loader) -> Result<()> {
    let mut repl = repl::Repl::new(command_parser::generate_completions(), &config.history_file)?;
    if let Some(query) = &config.initial_query {
        search(query, loader).await;
        repl.set_status(loader.sink().status());
    }
    loop {
        match repl.read_line()? {
            Signal::Success(buffer) => match handle_line(&buffer, loader).await {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => repl.set_status(loader.sink().status()),
                Err(e) => println!("Error: {}", e),
            },
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nAborted!");
                break;
            }
            #[allow(unreachable_patterns)]
            x => debug!("Event: {:?}", x),
        }
    }
    // Nothing issued before this point may print after the loop is gone.
    loader.reset();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args_parsed = command_parser::arg_parser_cli().get_matches_from(env::args_os().skip(1));

    if let Some(("config", _)) = args_parsed.subcommand() {
        print!("{}", Config::default_as_string()?);
        return Ok(());
    }

    let config = Arc::new(Config::read_config()?);
    let mut loader = build_loader(Arc::clone(&config))?;

    if let Some(("repl", _)) = args_parsed.subcommand() {
        run_repl(&config, &mut loader).await?;
    } else {
        let args = env::args_os()
            .skip(1)
            .map(|x| x.to_string_lossy().into_owned())
            .collect::<Vec<String>>();
        handle_command(args, &mut loader).await?;
    }

    Ok(())
}
