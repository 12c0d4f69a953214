use anyhow::Result;
use clap::{Parser, Subcommand};
use kit::areas::repository::Repository;
use kit::artifacts::errors::KitError;

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "kit is a local, single-user version-control system: a \
    content-addressed object store, a commit history chain, a staging index, \
    and named branch pointers. It is a learning project, not a git replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for addition")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        path: String,
    },
    #[command(
        name = "rm",
        about = "Un-stage a file or stage it for removal",
        long_about = "Un-stages a pending addition; a file tracked by the head commit is \
        staged for removal and deleted from the working directory."
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        path: String,
    },
    #[command(name = "commit", about = "Record the staged snapshot as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "branch", about = "Create a new branch at the current head commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or restore files",
        long_about = "Three forms: `checkout <branch>` switches branches, \
        `checkout -- <file>` restores a file from the head commit, and \
        `checkout <commit> -- <file>` restores a file from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or commit id")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore")]
        path: Option<String>,
    },
    #[command(name = "log", about = "Show the history of the active branch")]
    Log,
    #[command(name = "status", about = "Show branches and staging state")]
    Status,
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command pretty-prints an object stored in the repository. \
        It requires the id of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object id to print")]
        sha: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // every failure path prints its specific diagnostic and exits non-zero
    if let Err(err) = run(&cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_repository()?,
            };

            repository.init().await?
        }
        Commands::Add { path } => open_repository()?.add(path).await?,
        Commands::Rm { path } => open_repository()?.rm(path).await?,
        Commands::Commit { message } => open_repository()?.commit(message).await?,
        Commands::Branch { name } => open_repository()?.branch(name).await?,
        Commands::RmBranch { name } => open_repository()?.rm_branch(name).await?,
        Commands::Checkout { target, path } => {
            let mut repository = open_repository()?;

            match (target, path) {
                (None, Some(path)) => repository.checkout_file(path).await?,
                (Some(commit_id), Some(path)) => {
                    repository.checkout_file_from(commit_id, path).await?
                }
                (Some(branch_name), None) => repository.checkout_branch(branch_name).await?,
                (None, None) => {
                    anyhow::bail!(KitError::UserInput("Incorrect operands.".to_string()))
                }
            }
        }
        Commands::Log => open_repository()?.log().await?,
        Commands::Status => open_repository()?.status().await?,
        Commands::CatFile { sha } => open_repository()?.cat_file(sha)?,
    }

    Ok(())
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}
