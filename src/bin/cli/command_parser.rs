use clap::{Arg, ArgAction, Command};

pub fn arg_parser() -> Command {
    Command::new("booksearch")
        .about("Search the Google Books catalog")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("search")
                .about("Search for books matching the given terms")
                .arg(
                    Arg::new("terms")
                        .num_args(0..)
                        .action(ArgAction::Append)
                        .trailing_var_arg(true),
                ),
        )
        .subcommand(
            Command::new("open")
                .about("Show the link of a book from the last search")
                .arg(
                    Arg::new("index")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}

pub fn arg_parser_repl() -> Command {
    arg_parser()
        .subcommand(Command::new("exit").about("Leave the read eval print loop"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser()
        .subcommand(Command::new("repl").about("Launch a read eval print loop"))
        .subcommand(Command::new("config").about("Print the default configuration"))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser_repl();
    let mut subcmds = cmd
        .get_subcommands()
        .map(|subcmd| subcmd.get_name().to_string())
        .collect::<Vec<String>>();
    subcmds.sort();
    subcmds
}
