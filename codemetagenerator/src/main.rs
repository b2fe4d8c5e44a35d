mod add;
mod edit;
mod generate;
mod licenses;
mod logging;
mod new;
mod options;
mod prompt;
mod store;

use std::io::{self, Write as _};
use std::process::exit;

use anyhow::Result;
use clap::{CommandFactory as _, Parser, Subcommand};
use edit::{Mutation, PathArgs, PathValueArgs};
use licenses::{HttpLicenseSource, LicenseCatalog};
use options::Options;
use prompt::Prompter;
use store::Store;

fn main() {
    let args = Args::parse();
    handle_result(run_args(args));
}

fn run_args(args: Args) -> Result<()> {
    let mut logger = logging::set_up(logging::Options {
        verbose: args.options.verbose,
        color: args.options.use_color(&io::stderr()),
    })?;
    let r = run_command(&args);
    logger.tear_down()?;
    r
}

fn run_command(args: &Args) -> Result<()> {
    let options = &args.options;
    let mut out = io::stdout().lock();
    match &args.command {
        Commands::New => {
            let store = Store::open(options)?;
            let catalog = LicenseCatalog::load(&store, &HttpLicenseSource::default())?;
            new::new(&store, &catalog, &mut prompter(options))
        }
        Commands::Add(sub) => {
            let store = Store::open(options)?;
            match sub {
                Add::Author => add::author(&store, &mut prompter(options)),
                Add::Contributor => add::contributor(&store, &mut prompter(options)),
                Add::Keyword { keywords } => add::keywords(&store, keywords, &mut out),
            }
        }
        Commands::Insert(PathValueArgs { path, value }) => {
            let mutation = Mutation::Insert(edit::parse_value(value));
            edit::mutate(&Store::open(options)?, path, mutation, &mut out)
        }
        Commands::Set(PathValueArgs { path, value }) => {
            let mutation = Mutation::Set(edit::parse_value(value));
            edit::mutate(&Store::open(options)?, path, mutation, &mut out)
        }
        Commands::Edit(PathValueArgs { path, value }) => {
            let mutation = Mutation::Edit(edit::parse_value(value));
            edit::mutate(&Store::open(options)?, path, mutation, &mut out)
        }
        Commands::Delete(PathArgs { path }) => {
            edit::mutate(&Store::open(options)?, path, Mutation::Delete, &mut out)
        }
        Commands::Generate(sub) => generate::generate(&Store::open(options)?, sub, &mut out),
        Commands::Validate(sub) => generate::validate(&Store::open(options)?, sub, &mut out),
        Commands::Licenses { command } => {
            let store = Store::open(options)?;
            let source = HttpLicenseSource::default();
            match command {
                None => licenses::list(&store, &source, &mut out),
                Some(Licenses::Refresh) => licenses::refresh(&store, &source, &mut out),
            }
        }
        Commands::Clean => {
            let store = Store::open(options)?;
            if store.clean()? {
                writeln!(out, "Successfully cleaned {}.", store.home().display())?;
            } else {
                writeln!(out, "Nothing to clean at {}.", store.home().display())?;
            }
            Ok(())
        }
        Commands::GenerateMan => {
            let man = clap_mangen::Man::new(Args::command());
            let mut buffer: Vec<u8> = Default::default();
            man.render(&mut buffer)?;
            writeln!(out, "{}", String::from_utf8(buffer)?)?;
            Ok(())
        }
        Commands::GenerateMarkdown => {
            let opts = clap_markdown::MarkdownOptions::new().show_footer(false);
            let markdown: String = clap_markdown::help_markdown_custom::<Args>(&opts);
            writeln!(out, "{}", markdown)?;
            Ok(())
        }
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Args::command();
            clap_complete::generate(*shell, &mut cmd, "codemetagenerator", &mut out);
            Ok(())
        }
    }
}

fn prompter(options: &Options) -> Prompter<io::StdinLock<'static>, io::Stdout> {
    let stdout = io::stdout();
    let color = options.use_color(&stdout);
    Prompter::new(io::stdin().lock(), stdout, color)
}

fn handle_result(r: Result<()>) {
    match r {
        Ok(()) => {}
        Err(e) => {
            eprintln!("codemetagenerator error: {:#}", e);
            exit(1);
        }
    }
}

/// Build a codemeta.json file for your software, one step at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand, Debug)]
enum Add {
    /// Add an author (person or organization) to the in-progress codemeta.json file
    Author,

    /// Add a contributor (person or organization) to the in-progress codemeta.json file
    Contributor,

    /// Add keywords to the in-progress codemeta.json file
    Keyword {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum Licenses {
    /// Download the SPDX license list again
    Refresh,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new in-progress codemeta.json file, replacing any previous one
    New,

    /// Add authors, contributors or keywords
    #[command(subcommand)]
    Add(Add),

    /// Insert a new key
    Insert(PathValueArgs),

    /// Set a key, creating it if needed; `key[-1]` appends to a list
    Set(PathValueArgs),

    /// Change the value of an existing key
    Edit(PathValueArgs),

    /// Delete a key or a list element; `key[-1]` removes the last element
    #[command(visible_alias = "remove")]
    Delete(PathArgs),

    /// Validate the in-progress codemeta.json file and write it out
    Generate(generate::GenerateArgs),

    /// Check a codemeta.json file against the codemeta schema
    Validate(generate::ValidateArgs),

    /// List the SPDX license identifiers
    Licenses {
        #[command(subcommand)]
        command: Option<Licenses>,
    },

    /// Remove the .codemetagenerator directory with all its state
    Clean,

    /// Generate markdown documentation for codemetagenerator
    #[command(hide = true)]
    GenerateMarkdown,

    /// Generate a manpage for codemetagenerator
    #[command(hide = true)]
    GenerateMan,

    /// Generate shell completion for codemetagenerator
    #[command(hide = true)]
    GenerateCompletion {
        /// The shell to generate completion for
        #[arg(long)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let args = Args::try_parse_from(["codemetagenerator", "remove", "author[-1]"]).unwrap();
        assert!(
            matches!(args.command, Commands::Delete(PathArgs { ref path }) if path == "author[-1]")
        );

        let args = Args::try_parse_from([
            "codemetagenerator",
            "set",
            "--base-dir",
            "/tmp/x",
            "name",
            "Tool",
        ])
        .unwrap();
        assert!(matches!(args.command, Commands::Set(ref sub) if sub.value == "Tool"));
        assert_eq!(args.options.base_dir().unwrap(), std::path::PathBuf::from("/tmp/x"));

        let args = Args::try_parse_from(["codemetagenerator", "licenses", "refresh"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Licenses {
                command: Some(Licenses::Refresh)
            }
        ));

        let args =
            Args::try_parse_from(["codemetagenerator", "generate", "-o", "codemeta.json"]).unwrap();
        assert!(matches!(args.command, Commands::Generate(ref sub) if sub.output.is_some()));
    }

    #[test]
    fn test_keyword_needs_a_value() {
        assert!(Args::try_parse_from(["codemetagenerator", "add", "keyword"]).is_err());
        let args =
            Args::try_parse_from(["codemetagenerator", "-v", "add", "keyword", "a", "b"]).unwrap();
        assert!(args.options.verbose);
        assert!(matches!(
            args.command,
            Commands::Add(Add::Keyword { ref keywords }) if keywords.len() == 2
        ));
    }
}
